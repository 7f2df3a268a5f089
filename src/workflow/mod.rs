//! Branch promotion workflows
//!
//! [WorkflowManager] composes a handful of primitive git steps (checkout,
//! pull, fetch, merge, push) into the named promotion, merge and hotfix
//! workflows. Every workflow is a fixed sequence: a step runs only after all
//! earlier steps succeeded, and the first failure is returned wrapped with
//! the label of the step that produced it. Nothing is rolled back; the
//! repository is left as the backend left it.
//!
//! The workflows themselves live in:
//! - `feature` - feature branch creation, refresh and consumption
//! - `promotion` - Development to Nightly/Release, and the reset onto main
//! - `hotfix` - hotfix branches cut from main and merged back

mod feature;
mod hotfix;
mod promotion;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::domain::branch::{BranchNames, BranchRole};
use crate::error::Result;
use crate::git::GitExecutor;
use crate::ui;

/// Default remote every workflow fetches from and pushes to
pub const DEFAULT_REMOTE: &str = "origin";

/// Runs the promotion workflows against one executor.
///
/// The executor is fixed at construction and never swapped.
pub struct WorkflowManager<E: GitExecutor> {
    executor: E,
    branches: BranchNames,
    remote: String,
    date: Option<NaiveDate>,
}

impl<E: GitExecutor> WorkflowManager<E> {
    /// Create a manager using the default branch names and `origin`
    pub fn new(executor: E) -> Self {
        Self::with_branches(executor, BranchNames::default(), DEFAULT_REMOTE)
    }

    /// Create a manager with explicit branch names and remote
    pub fn with_branches(executor: E, branches: BranchNames, remote: impl Into<String>) -> Self {
        WorkflowManager {
            executor,
            branches,
            remote: remote.into(),
            date: None,
        }
    }

    /// Pin the date used in backup tags and release merge messages
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// The executor every step goes through
    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn branches(&self) -> &BranchNames {
        &self.branches
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    fn branch(&self, role: BranchRole) -> &str {
        self.branches.name(role)
    }

    /// `<remote>/<branch>`
    fn remote_ref(&self, branch: &str) -> String {
        format!("{}/{}", self.remote, branch)
    }

    fn conflict_guidance(&self, branch: &str) -> String {
        ui::format_conflict_guidance(&self.remote, branch)
    }

    // -------------------------------------------------------------------------
    // Helper primitives: one executor call each. The command line travels in
    // the executor's error, so the workflow only adds the step label.

    fn checkout(&self, branch: &str) -> Result<()> {
        ui::display_status(&format!("Switching to branch: {}", branch));
        self.executor.run(&["checkout", branch])
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        ui::display_status(&format!("Creating new branch: {}", branch));
        self.executor.run(&["checkout", "-b", branch])
    }

    fn pull(&self, branch: &str) -> Result<()> {
        ui::display_status(&format!(
            "Pulling latest changes for {} from {}...",
            branch,
            self.remote_ref(branch)
        ));
        self.executor.run(&["pull", self.remote.as_str(), branch])
    }

    fn fetch_all(&self) -> Result<()> {
        ui::display_status(&format!("Fetching latest changes from {}...", self.remote));
        self.executor.run(&["fetch", self.remote.as_str()])
    }

    fn merge(&self, source: &str, no_ff: bool, message: &str) -> Result<()> {
        let mut args = vec!["merge", source];
        if no_ff {
            args.push("--no-ff");
        }
        if !message.is_empty() {
            args.push("-m");
            args.push(message);
        }

        ui::display_status(&format!("Merging {} into current branch...", source));
        debug!(source, no_ff, "merge");
        self.executor.run(&args)
    }

    /// Publish `branch`, or every local tag when `tags` is set.
    fn push(&self, branch: &str, force: bool, tags: bool) -> Result<()> {
        let mut args = vec!["push", self.remote.as_str()];
        if force {
            args.push("--force");
        }
        if tags {
            args.push("--tags");
            ui::display_status(&format!("Pushing tags to {}...", self.remote));
        } else {
            args.push(branch);
            ui::display_status(&format!("Pushing {} to {}...", branch, self.remote));
        }
        self.executor.run(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::RecordingExecutor;

    fn manager() -> WorkflowManager<RecordingExecutor> {
        WorkflowManager::new(RecordingExecutor::new())
    }

    #[test]
    fn test_merge_arguments() {
        let wm = manager();
        wm.merge("feature/a", false, "").unwrap();
        wm.merge("origin/Development", true, "").unwrap();
        wm.merge("Development", true, "chore: promote").unwrap();

        assert_eq!(
            wm.executor().calls(),
            vec![
                "merge feature/a",
                "merge origin/Development --no-ff",
                "merge Development --no-ff -m chore: promote",
            ]
        );
    }

    #[test]
    fn test_push_arguments() {
        let wm = manager();
        wm.push("Nightly", false, false).unwrap();
        wm.push("Development", true, false).unwrap();
        wm.push("", false, true).unwrap();

        assert_eq!(
            wm.executor().calls(),
            vec![
                "push origin Nightly",
                "push origin --force Development",
                "push origin --tags",
            ]
        );
    }

    #[test]
    fn test_pull_and_fetch_use_configured_remote() {
        let wm = WorkflowManager::with_branches(
            RecordingExecutor::new(),
            BranchNames::default(),
            "upstream",
        );
        wm.fetch_all().unwrap();
        wm.pull("main").unwrap();

        assert_eq!(
            wm.executor().calls(),
            vec!["fetch upstream", "pull upstream main"]
        );
    }

    #[test]
    fn test_helper_failure_carries_command_line() {
        let wm = WorkflowManager::new(RecordingExecutor::new().fail_on(&["checkout"]));
        let err = wm.checkout("Nightly").unwrap_err();
        assert!(err.to_string().contains("git checkout Nightly"));
    }

    #[test]
    fn test_today_uses_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let wm = manager().with_date(date);
        assert_eq!(wm.today(), date);
    }
}
