//! Git command execution layer
//!
//! This module provides a trait-based abstraction over invoking the git
//! backend, so the promotion workflows can run against a real repository or
//! against a recording substitute in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [GitExecutor] trait. The concrete
//! implementations are:
//!
//! - [cli::GitCli]: shells out to the git program and queries the repository with `git2`
//! - [mock::RecordingExecutor]: records every call and returns programmed outcomes
//!
//! # Usage
//!
//! Workflow code depends on the [GitExecutor] trait only; the executor is
//! chosen once, when the [crate::workflow::WorkflowManager] is constructed.
//!
//! ```rust
//! # use git_promote::git::GitExecutor;
//! # fn example<E: GitExecutor>(git: &E) -> git_promote::Result<()> {
//! if git.is_working_tree_clean()? {
//!     git.run(&["checkout", "Nightly"])?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::RecordingExecutor;

use crate::error::Result;

/// Capability to drive the version-control backend.
///
/// Calls are synchronous and run to completion; there is no timeout.
///
/// ## Implementations
///
/// - [GitCli](cli::GitCli): production executor
/// - [RecordingExecutor](mock::RecordingExecutor): test substitute
pub trait GitExecutor {
    /// Run git with the given arguments.
    ///
    /// The operator sees the backend's own output while it runs.
    ///
    /// # Returns
    /// * `Ok(())` - The backend exited successfully
    /// * `Err` - The backend reported failure; the error carries its diagnostic text
    fn run(&self, args: &[&str]) -> Result<()>;

    /// Report whether the working tree has no pending changes.
    ///
    /// Untracked, modified and staged files all count as pending.
    ///
    /// # Returns
    /// * `Ok(true)` - Nothing pending
    /// * `Ok(false)` - At least one pending change
    /// * `Err` - The backend could not be queried at all
    fn is_working_tree_clean(&self) -> Result<bool>;

    /// Report whether a local branch with this exact name exists.
    fn branch_exists(&self, branch: &str) -> Result<bool>;
}

impl<E: GitExecutor + ?Sized> GitExecutor for &E {
    fn run(&self, args: &[&str]) -> Result<()> {
        (**self).run(args)
    }

    fn is_working_tree_clean(&self) -> Result<bool> {
        (**self).is_working_tree_clean()
    }

    fn branch_exists(&self, branch: &str) -> Result<bool> {
        (**self).branch_exists(branch)
    }
}
