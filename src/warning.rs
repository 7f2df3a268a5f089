use std::fmt;

/// Non-fatal failures of cleanup that runs after a workflow's critical steps.
///
/// "Already deleted" and "deletion failed" are not told apart; both surface
/// as the backend's message.
#[derive(Debug, Clone, PartialEq)]
pub enum CleanupWarning {
    /// Deleting the local branch failed
    LocalBranchNotDeleted { branch: String, reason: String },
    /// Deleting the branch on the remote failed
    RemoteBranchNotDeleted {
        remote: String,
        branch: String,
        reason: String,
    },
}

impl fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupWarning::LocalBranchNotDeleted { branch, reason } => {
                write!(f, "Failed to delete local hotfix branch {}: {}", branch, reason)
            }
            CleanupWarning::RemoteBranchNotDeleted {
                remote,
                branch,
                reason,
            } => {
                write!(
                    f,
                    "Failed to delete remote hotfix branch {}/{}: {}",
                    remote, branch, reason
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_warning_display() {
        let warning = CleanupWarning::LocalBranchNotDeleted {
            branch: "hotfix/crash".to_string(),
            reason: "error: branch 'hotfix/crash' not found.".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Failed to delete local hotfix branch hotfix/crash: error: branch 'hotfix/crash' not found."
        );
    }

    #[test]
    fn test_remote_warning_display() {
        let warning = CleanupWarning::RemoteBranchNotDeleted {
            remote: "origin".to_string(),
            branch: "hotfix/crash".to_string(),
            reason: "remote ref does not exist".to_string(),
        };
        assert!(warning.to_string().contains("origin/hotfix/crash"));
    }
}
