//! Workflow dispatch
//!
//! Maps one parsed command onto one [WorkflowManager] call. Kept free of
//! clap so workflows can be driven programmatically.

use crate::error::Result;
use crate::git::GitExecutor;
use crate::warning::CleanupWarning;
use crate::workflow::WorkflowManager;

/// One invocation of a named workflow with its argument
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowCommand {
    UpdateFeature { branch: String },
    UpdateDevelopment,
    PromoteBasic,
    CreateFeature { name: String },
    ConsumeFeature { branch: String },
    Promote,
    Release { tag: Option<String> },
    SyncDevelopment,
    CreateHotfix { name: String },
    UpdateMain { branch: String },
}

impl WorkflowCommand {
    /// Subcommand name
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowCommand::UpdateFeature { .. } => "update-feature",
            WorkflowCommand::UpdateDevelopment => "update-development",
            WorkflowCommand::PromoteBasic => "promote-basic",
            WorkflowCommand::CreateFeature { .. } => "create-feature",
            WorkflowCommand::ConsumeFeature { .. } => "consume-feature",
            WorkflowCommand::Promote => "promote",
            WorkflowCommand::Release { .. } => "release",
            WorkflowCommand::SyncDevelopment => "sync-development",
            WorkflowCommand::CreateHotfix { .. } => "create-hotfix",
            WorkflowCommand::UpdateMain { .. } => "update-main",
        }
    }

    /// Rewrites remote history
    pub fn is_destructive(&self) -> bool {
        matches!(self, WorkflowCommand::SyncDevelopment)
    }
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowReport {
    /// Subcommand that ran
    pub workflow: &'static str,

    /// Non-fatal cleanup problems, only ever set by `update-main`
    pub warnings: Vec<CleanupWarning>,
}

/// Run the workflow selected by `command`.
///
/// # Returns
///
/// The report on success, or the first failing step's error
pub fn run_workflow<E: GitExecutor>(
    manager: &WorkflowManager<E>,
    command: &WorkflowCommand,
) -> Result<WorkflowReport> {
    let mut warnings = Vec::new();

    match command {
        WorkflowCommand::UpdateFeature { branch } => manager.update_feature_branch(branch)?,
        WorkflowCommand::UpdateDevelopment => manager.update_development()?,
        WorkflowCommand::PromoteBasic => manager.promote_basic()?,
        WorkflowCommand::CreateFeature { name } => manager.create_feature_branch(name)?,
        WorkflowCommand::ConsumeFeature { branch } => manager.consume_feature(branch)?,
        WorkflowCommand::Promote => manager.promote_validated()?,
        WorkflowCommand::Release { tag } => manager.development_to_release(tag.as_deref())?,
        WorkflowCommand::SyncDevelopment => manager.sync_development_with_main()?,
        WorkflowCommand::CreateHotfix { name } => manager.create_hotfix(name)?,
        WorkflowCommand::UpdateMain { branch } => {
            warnings = manager.update_main_with_hotfix(branch)?;
        }
    }

    Ok(WorkflowReport {
        workflow: command.name(),
        warnings,
    })
}
