use tracing::{instrument, warn};

use super::WorkflowManager;
use crate::domain::branch::{forward_port_message, hotfix_branch, BranchRole};
use crate::error::{Result, StepContext};
use crate::git::GitExecutor;
use crate::ui;
use crate::warning::CleanupWarning;

impl<E: GitExecutor> WorkflowManager<E> {
    /// Cut `hotfix/<name>` from the latest main and publish it.
    #[instrument(skip(self))]
    pub fn create_hotfix(&self, name: &str) -> Result<()> {
        ui::display_banner("Creating Hotfix Branch");
        let main = self.branch(BranchRole::Main);

        self.checkout(main)
            .with_step(|| format!("failed to checkout {} branch", main))?;
        self.pull(main)
            .with_step(|| format!("failed to pull {} branch", main))?;

        let branch = hotfix_branch(name);
        self.create_branch(&branch)
            .with_step(|| format!("failed to create new hotfix branch {}", branch))?;
        self.push(&branch, false, false)
            .with_step(|| format!("failed to push hotfix branch {} to remote", branch))?;

        ui::display_banner("Hotfix Branch Created and Pushed Successfully");
        Ok(())
    }

    /// Merge a hotfix into main, forward-port it to Development, then delete it.
    ///
    /// Deleting the hotfix branch is best effort: failures are returned as
    /// warnings and do not fail the workflow.
    #[instrument(skip(self))]
    pub fn update_main_with_hotfix(&self, branch: &str) -> Result<Vec<CleanupWarning>> {
        ui::display_banner("Updating main with Hotfix and Forward-Porting");
        let main = self.branch(BranchRole::Main);
        let dev = self.branch(BranchRole::Development);

        self.checkout(main)
            .with_step(|| format!("failed to checkout {} branch", main))?;
        self.merge(branch, true, "").with_merge_step(
            || format!("merge conflict detected during hotfix merge to {}", main),
            self.conflict_guidance(main),
        )?;
        self.push(main, false, false)
            .with_step(|| format!("failed to push {} after hotfix merge", main))?;

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {} for forward-port", dev))?;
        let message = forward_port_message(branch);
        self.merge(branch, true, &message).with_merge_step(
            || format!("merge conflict detected during hotfix forward-port to {}", dev),
            self.conflict_guidance(dev),
        )?;
        self.push(dev, false, false)
            .with_step(|| format!("failed to push {} after forward-port", dev))?;

        let warnings = self.delete_hotfix_branch(branch);
        for warning in &warnings {
            warn!(%warning, "hotfix cleanup");
            ui::display_cleanup_warning(warning);
        }

        ui::display_banner("main Updated and Hotfix Forward-Ported Successfully");
        Ok(warnings)
    }

    fn delete_hotfix_branch(&self, branch: &str) -> Vec<CleanupWarning> {
        ui::display_status(&format!("Cleaning up hotfix branch: {}...", branch));
        let mut warnings = Vec::new();

        if let Err(e) = self.executor.run(&["branch", "-d", branch]) {
            warnings.push(CleanupWarning::LocalBranchNotDeleted {
                branch: branch.to_string(),
                reason: e.to_string(),
            });
        }

        if let Err(e) = self
            .executor
            .run(&["push", self.remote.as_str(), "--delete", branch])
        {
            warnings.push(CleanupWarning::RemoteBranchNotDeleted {
                remote: self.remote.clone(),
                branch: branch.to_string(),
                reason: e.to_string(),
            });
        }

        warnings
    }
}
