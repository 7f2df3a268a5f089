use crate::error::{FlowError, Result};
use crate::git::GitExecutor;
use std::cell::RefCell;
use std::collections::HashSet;

/// Line recorded for a working tree status query
pub const STATUS_CALL: &str = "status --porcelain";

/// Executor that records invocations instead of touching a repository.
///
/// Every call, queries included, is logged as its space-joined argument
/// line. Outcomes are programmed up front with the builder methods.
pub struct RecordingExecutor {
    calls: RefCell<Vec<String>>,
    failing_prefixes: Vec<Vec<String>>,
    failing_call: Option<usize>,
    clean: bool,
    status_error: Option<String>,
    branches: HashSet<String>,
}

impl RecordingExecutor {
    /// Executor on which every call succeeds and the working tree is clean
    pub fn new() -> Self {
        RecordingExecutor {
            calls: RefCell::new(Vec::new()),
            failing_prefixes: Vec::new(),
            failing_call: None,
            clean: true,
            status_error: None,
            branches: HashSet::new(),
        }
    }

    /// Fail every `run` whose arguments start with `prefix`
    pub fn fail_on(mut self, prefix: &[&str]) -> Self {
        self.failing_prefixes
            .push(prefix.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Fail the call at this zero-based position in the log, whatever it is
    pub fn fail_at(mut self, index: usize) -> Self {
        self.failing_call = Some(index);
        self
    }

    /// Report uncommitted changes
    pub fn dirty(mut self) -> Self {
        self.clean = false;
        self
    }

    /// Make the status query itself fail
    pub fn status_unavailable(mut self, reason: impl Into<String>) -> Self {
        self.status_error = Some(reason.into());
        self
    }

    /// Declare a local branch as existing
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branches.insert(branch.into());
        self
    }

    /// Recorded calls, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Forget recorded calls, keeping the programmed outcomes
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Log a call; true when it was programmed to fail by position
    fn record(&self, line: String) -> bool {
        let mut calls = self.calls.borrow_mut();
        let index = calls.len();
        calls.push(line);
        self.failing_call == Some(index)
    }

    fn matches_prefix(&self, args: &[&str]) -> bool {
        self.failing_prefixes.iter().any(|prefix| {
            prefix.len() <= args.len() && prefix.iter().zip(args).all(|(p, a)| p == a)
        })
    }
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor for RecordingExecutor {
    fn run(&self, args: &[&str]) -> Result<()> {
        let line = args.join(" ");
        let positional = self.record(line.clone());

        if positional || self.matches_prefix(args) {
            Err(FlowError::command(
                format!("git {}", line),
                "simulated failure",
            ))
        } else {
            Ok(())
        }
    }

    fn is_working_tree_clean(&self) -> Result<bool> {
        let positional = self.record(STATUS_CALL.to_string());

        match &self.status_error {
            Some(reason) => Err(FlowError::command(
                format!("git {}", STATUS_CALL),
                reason.clone(),
            )),
            None if positional => Err(FlowError::command(
                format!("git {}", STATUS_CALL),
                "simulated failure",
            )),
            None => Ok(self.clean),
        }
    }

    fn branch_exists(&self, branch: &str) -> Result<bool> {
        let line = format!("show-ref --verify --quiet refs/heads/{}", branch);
        if self.record(line.clone()) {
            return Err(FlowError::command(format!("git {}", line), "simulated failure"));
        }
        Ok(self.branches.contains(branch))
    }
}
