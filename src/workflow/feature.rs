use tracing::instrument;

use super::WorkflowManager;
use crate::domain::branch::{feature_branch, BranchRole};
use crate::error::{Result, StepContext};
use crate::git::GitExecutor;
use crate::ui;

impl<E: GitExecutor> WorkflowManager<E> {
    /// Cut `feature/<name>` from the local Development tip.
    #[instrument(skip(self))]
    pub fn create_feature_branch(&self, name: &str) -> Result<()> {
        ui::display_banner("Creating Feature Branch");
        let dev = self.branch(BranchRole::Development);

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {}", dev))?;

        let branch = feature_branch(name);
        self.create_branch(&branch)
            .with_step(|| format!("failed to create new feature branch {}", branch))?;

        ui::display_banner("Feature Branch Created Successfully");
        Ok(())
    }

    /// Bring the latest remote Development into a feature branch and publish it.
    #[instrument(skip(self))]
    pub fn update_feature_branch(&self, branch: &str) -> Result<()> {
        ui::display_banner("Updating Feature Branch");

        self.checkout(branch)
            .with_step(|| format!("failed to checkout feature branch {}", branch))?;
        self.fetch_all()
            .with_step(|| format!("failed to fetch {}", self.remote))?;

        // Lowercase remote-tracking ref, as feature branches have always tracked it.
        let upstream = self.remote_ref(&self.branch(BranchRole::Development).to_lowercase());
        self.merge(&upstream, false, "").with_merge_step(
            || format!("merge conflict detected or merge of {} failed", upstream),
            self.conflict_guidance(branch),
        )?;

        self.push(branch, false, false)
            .with_step(|| format!("failed to push updated feature branch {}", branch))?;

        ui::display_banner("Feature Branch Updated Successfully");
        Ok(())
    }

    /// Merge a finished feature branch into Development.
    ///
    /// Development is first merged into the feature so conflicts are resolved
    /// on the feature branch, then the feature is merged back and Development
    /// is published.
    #[instrument(skip(self))]
    pub fn consume_feature(&self, branch: &str) -> Result<()> {
        ui::display_banner("Consuming Feature Branch into Development");
        let dev = self.branch(BranchRole::Development);

        self.checkout(branch)
            .with_step(|| format!("failed to checkout feature branch {}", branch))?;
        self.pull(branch)
            .with_step(|| format!("failed to pull feature branch {}", branch))?;

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {} branch", dev))?;
        self.pull(dev)
            .with_step(|| format!("failed to pull {} before merging feature", dev))?;

        self.checkout(branch)
            .with_step(|| format!("failed to checkout feature branch {}", branch))?;
        self.merge(dev, false, "").with_merge_step(
            || format!("merge conflict detected when merging {} into {}", dev, branch),
            self.conflict_guidance(branch),
        )?;

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {} branch for final merge", dev))?;
        self.merge(branch, false, "").with_merge_step(
            || format!("merge conflict detected when merging {} into {}", branch, dev),
            self.conflict_guidance(dev),
        )?;

        self.push(dev, false, false)
            .with_step(|| format!("failed to push updated {} branch", dev))?;

        ui::display_banner("Feature Consumed into Development Successfully");
        Ok(())
    }
}
