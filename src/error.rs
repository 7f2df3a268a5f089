use thiserror::Error;

/// Unified error type for git-promote operations
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("`{command}` failed: {reason}")]
    Command { command: String, reason: String },

    #[error("{step}: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<FlowError>,
    },

    #[error("{step}. Please resolve manually: {source}\n\n{guidance}")]
    MergeConflict {
        step: String,
        guidance: String,
        #[source]
        source: Box<FlowError>,
    },

    #[error("{branch} has uncommitted changes")]
    DirtyWorkingTree { branch: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-promote
pub type Result<T> = std::result::Result<T, FlowError>;

impl FlowError {
    /// Create a command failure for the given argument line
    pub fn command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        FlowError::Command {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        FlowError::Config(msg.into())
    }

    /// True when this error, or the error it wraps, is a merge conflict
    pub fn is_merge_conflict(&self) -> bool {
        match self {
            FlowError::MergeConflict { .. } => true,
            FlowError::Step { source, .. } => source.is_merge_conflict(),
            _ => false,
        }
    }

    /// Label of the outermost workflow step that failed, if any
    pub fn step_label(&self) -> Option<&str> {
        match self {
            FlowError::Step { step, .. } | FlowError::MergeConflict { step, .. } => Some(step),
            _ => None,
        }
    }
}

/// Attach workflow step context to a failing result.
///
/// Labels are built lazily so the success path does not allocate.
pub trait StepContext<T> {
    /// Wrap a failure with the label of the step that produced it
    fn with_step<F>(self, label: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Wrap a failed merge, attaching the manual resolution guidance
    fn with_merge_step<F>(self, label: F, guidance: String) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> StepContext<T> for Result<T> {
    fn with_step<F>(self, label: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| FlowError::Step {
            step: label(),
            source: Box::new(source),
        })
    }

    fn with_merge_step<F>(self, label: F, guidance: String) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| FlowError::MergeConflict {
            step: label(),
            guidance,
            source: Box::new(source),
        })
    }
}
