use tracing::{info, instrument};

use super::WorkflowManager;
use crate::domain::branch::{backup_tag, release_merge_message, release_tag_message, BranchRole};
use crate::error::{FlowError, Result, StepContext};
use crate::git::GitExecutor;
use crate::ui;

impl<E: GitExecutor> WorkflowManager<E> {
    /// Sync the local Development branch with its remote.
    #[instrument(skip(self))]
    pub fn update_development(&self) -> Result<()> {
        ui::display_banner("Updating Development Branch");
        let dev = self.branch(BranchRole::Development);

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {} branch", dev))?;

        if let Err(e) = self.pull(dev) {
            ui::display_conflict_guidance(&self.remote, dev);
            return Err(e).with_step(|| format!("failed to pull {}", self.remote_ref(dev)));
        }

        ui::display_banner("Development Branch Updated Successfully");
        Ok(())
    }

    /// Bring Nightly up to Development without forcing a merge record.
    #[instrument(skip(self))]
    pub fn promote_basic(&self) -> Result<()> {
        ui::display_banner("Promoting Development to Nightly (Basic)");
        let dev = self.branch(BranchRole::Development);
        let nightly = self.branch(BranchRole::Nightly);

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {} branch", dev))?;
        self.pull(dev)
            .with_step(|| format!("failed to pull {} before promoting", dev))?;

        self.checkout(nightly)
            .with_step(|| format!("failed to checkout {} branch", nightly))?;
        self.pull(nightly)
            .with_step(|| format!("failed to pull {} before merge", nightly))?;
        self.fetch_all()
            .with_step(|| format!("failed to fetch {}", self.remote))?;

        let upstream = self.remote_ref(dev);
        self.merge(&upstream, false, "").with_merge_step(
            || format!("merge conflict detected during {} to {}", dev, nightly),
            self.conflict_guidance(nightly),
        )?;

        self.push(nightly, false, false)
            .with_step(|| format!("failed to push updated {} branch", nightly))?;

        ui::display_banner("Development to Nightly (Basic) Completed Successfully");
        Ok(())
    }

    /// Promote Development to Nightly with an explicit merge record.
    ///
    /// Refuses to do anything beyond the initial checkout when Development
    /// has uncommitted changes.
    #[instrument(skip(self))]
    pub fn promote_validated(&self) -> Result<()> {
        ui::display_banner("Promoting Development to Nightly with validation");
        let dev = self.branch(BranchRole::Development);
        let nightly = self.branch(BranchRole::Nightly);

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {}", dev))?;

        let clean = self
            .executor
            .is_working_tree_clean()
            .with_step(|| "failed to check working tree status".to_string())?;
        if !clean {
            return Err(FlowError::DirtyWorkingTree {
                branch: dev.to_string(),
            });
        }

        self.fetch_all()
            .with_step(|| format!("failed to fetch {}", self.remote))?;
        self.pull(dev)
            .with_step(|| format!("failed to pull {}", self.remote_ref(dev)))?;

        self.checkout(nightly)
            .with_step(|| format!("failed to checkout {}", nightly))?;

        let upstream = self.remote_ref(dev);
        self.merge(&upstream, true, "").with_merge_step(
            || format!("merge conflict during {} to {} promotion", dev, nightly),
            self.conflict_guidance(nightly),
        )?;

        self.push(nightly, false, false)
            .with_step(|| format!("failed to push {}", nightly))?;

        ui::display_banner("Development Promoted to Nightly Successfully");
        Ok(())
    }

    /// Promote Development into Release, creating Release on first use.
    ///
    /// A non-empty `tag` is created as an annotated tag on the new Release
    /// tip and all tags are pushed.
    #[instrument(skip(self))]
    pub fn development_to_release(&self, tag: Option<&str>) -> Result<()> {
        ui::display_banner("Promoting Development to Release");
        let dev = self.branch(BranchRole::Development);
        let release = self.branch(BranchRole::Release);

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {}", dev))?;
        self.pull(dev)
            .with_step(|| format!("failed to pull {}", dev))?;

        let exists = self
            .executor
            .branch_exists(release)
            .with_step(|| format!("failed to check whether {} exists", release))?;

        if exists {
            self.checkout(release)
                .with_step(|| format!("failed to checkout {} branch", release))?;
            self.pull(release)
                .with_step(|| format!("failed to pull {} branch", release))?;
        } else {
            info!(branch = release, "release branch missing, creating it");
            self.create_branch(release)
                .with_step(|| format!("failed to create {} branch", release))?;
        }

        let message = release_merge_message(self.today());
        self.merge(dev, true, &message).with_merge_step(
            || format!("merge conflict during {} to {} promotion", dev, release),
            self.conflict_guidance(release),
        )?;

        self.push(release, false, false)
            .with_step(|| format!("failed to push {} branch", release))?;

        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            ui::display_status(&format!("Tagging release as {}...", tag));
            let annotation = release_tag_message(tag);
            self.executor
                .run(&["tag", "-a", tag, "-m", annotation.as_str()])
                .with_step(|| format!("failed to create tag {}", tag))?;
            self.push("", false, true)
                .with_step(|| format!("failed to push tag {}", tag))?;
        }

        ui::display_banner("Development Promoted to Release Successfully");
        Ok(())
    }

    /// Back up Development under a dated tag, then reset it onto main.
    ///
    /// Destructive: the remote Development history is overwritten and only
    /// survives through the backup tag.
    #[instrument(skip(self))]
    pub fn sync_development_with_main(&self) -> Result<()> {
        ui::display_banner("Backing up Development and resetting to main");
        let dev = self.branch(BranchRole::Development);
        let main = self.branch(BranchRole::Main);

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {} for backup", dev))?;

        let backup = backup_tag(self.today());
        ui::display_status(&format!("Creating backup tag: {}", backup));
        self.executor
            .run(&["tag", backup.as_str()])
            .with_step(|| format!("failed to create backup tag {}", backup))?;
        self.push("", false, true)
            .with_step(|| "failed to push backup tag".to_string())?;

        self.checkout(dev)
            .with_step(|| format!("failed to checkout {} for reset", dev))?;
        self.fetch_all()
            .with_step(|| format!("failed to fetch {} before resetting {}", self.remote, dev))?;

        let target = self.remote_ref(main);
        ui::display_warning(&format!(
            "Hard resetting {} to {} (this discards local {} changes)",
            dev, target, dev
        ));
        self.executor
            .run(&["reset", "--hard", target.as_str()])
            .with_step(|| format!("failed to hard reset {} to {}", dev, target))?;

        ui::display_warning(&format!(
            "Force pushing {} to {} (this overwrites remote {})",
            dev, self.remote, dev
        ));
        self.push(dev, true, false)
            .with_step(|| format!("failed to force push {}", dev))?;

        ui::display_banner("Development Backup and Sync with main Completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::FlowError;
    use crate::git::mock::STATUS_CALL;
    use crate::git::RecordingExecutor;
    use crate::workflow::WorkflowManager;
    use chrono::NaiveDate;

    fn pinned(git: RecordingExecutor) -> WorkflowManager<RecordingExecutor> {
        WorkflowManager::new(git).with_date(NaiveDate::from_ymd_opt(2024, 5, 9).unwrap())
    }

    #[test]
    fn test_update_development_sequence() {
        let wm = pinned(RecordingExecutor::new());
        wm.update_development().unwrap();
        assert_eq!(
            wm.executor().calls(),
            vec!["checkout Development", "pull origin Development"]
        );
    }

    #[test]
    fn test_update_development_pull_failure() {
        let wm = pinned(RecordingExecutor::new().fail_on(&["pull"]));
        let err = wm.update_development().unwrap_err();
        assert_eq!(err.step_label(), Some("failed to pull origin/Development"));
    }

    #[test]
    fn test_promote_basic_sequence() {
        let wm = pinned(RecordingExecutor::new());
        wm.promote_basic().unwrap();
        assert_eq!(
            wm.executor().calls(),
            vec![
                "checkout Development",
                "pull origin Development",
                "checkout Nightly",
                "pull origin Nightly",
                "fetch origin",
                "merge origin/Development",
                "push origin Nightly",
            ]
        );
    }

    #[test]
    fn test_promote_validated_sequence() {
        let wm = pinned(RecordingExecutor::new());
        wm.promote_validated().unwrap();
        assert_eq!(
            wm.executor().calls(),
            vec![
                "checkout Development",
                STATUS_CALL,
                "fetch origin",
                "pull origin Development",
                "checkout Nightly",
                "merge origin/Development --no-ff",
                "push origin Nightly",
            ]
        );
    }

    #[test]
    fn test_promote_validated_dirty_tree_aborts() {
        let wm = pinned(RecordingExecutor::new().dirty());
        let err = wm.promote_validated().unwrap_err();

        assert!(matches!(err, FlowError::DirtyWorkingTree { ref branch } if branch == "Development"));
        assert_eq!(
            wm.executor().calls(),
            vec!["checkout Development", STATUS_CALL]
        );
    }

    #[test]
    fn test_promote_validated_status_unavailable() {
        let wm = pinned(RecordingExecutor::new().status_unavailable("not a git repository"));
        let err = wm.promote_validated().unwrap_err();

        assert_eq!(err.step_label(), Some("failed to check working tree status"));
        assert!(err.to_string().contains("not a git repository"));
        assert_eq!(wm.executor().call_count(), 2);
    }

    #[test]
    fn test_release_created_when_missing() {
        let wm = pinned(RecordingExecutor::new());
        wm.development_to_release(None).unwrap();
        assert_eq!(
            wm.executor().calls(),
            vec![
                "checkout Development",
                "pull origin Development",
                "show-ref --verify --quiet refs/heads/Release",
                "checkout -b Release",
                "merge Development --no-ff -m chore: Promote Development to Release [2024-05-09]",
                "push origin Release",
            ]
        );
    }

    #[test]
    fn test_release_checked_out_when_present() {
        let wm = pinned(RecordingExecutor::new().with_branch("Release"));
        wm.development_to_release(None).unwrap();

        let calls = wm.executor().calls();
        assert_eq!(calls[3], "checkout Release");
        assert_eq!(calls[4], "pull origin Release");
        assert!(!calls.iter().any(|c| c.starts_with("checkout -b")));
    }

    #[test]
    fn test_release_tagging() {
        let wm = pinned(RecordingExecutor::new().with_branch("Release"));
        wm.development_to_release(Some("v2.1.0")).unwrap();

        let calls = wm.executor().calls();
        assert_eq!(calls.len(), 9);
        assert_eq!(calls[7], "tag -a v2.1.0 -m Release candidate v2.1.0");
        assert_eq!(calls[8], "push origin --tags");
    }

    #[test]
    fn test_release_empty_tag_is_ignored() {
        let wm = pinned(RecordingExecutor::new());
        wm.development_to_release(Some("")).unwrap();
        assert!(!wm.executor().calls().iter().any(|c| c.starts_with("tag")));
    }

    #[test]
    fn test_release_merge_conflict_skips_push_and_tag() {
        let wm = pinned(RecordingExecutor::new().fail_on(&["merge"]));
        let err = wm.development_to_release(Some("v1.0.0")).unwrap_err();

        assert!(err.is_merge_conflict());
        assert!(err.to_string().contains("git push origin Release"));
        assert!(wm.executor().calls().last().unwrap().starts_with("merge"));
    }

    #[test]
    fn test_sync_development_with_main_sequence() {
        let wm = pinned(RecordingExecutor::new());
        wm.sync_development_with_main().unwrap();
        assert_eq!(
            wm.executor().calls(),
            vec![
                "checkout Development",
                "tag backup/development-20240509",
                "push origin --tags",
                "checkout Development",
                "fetch origin",
                "reset --hard origin/main",
                "push origin --force Development",
            ]
        );
    }

    #[test]
    fn test_sync_backup_failure_prevents_reset() {
        let wm = pinned(RecordingExecutor::new().fail_on(&["tag"]));
        assert!(wm.sync_development_with_main().is_err());
        assert!(!wm.executor().calls().iter().any(|c| c.starts_with("reset")));
    }

    #[test]
    fn test_sync_reset_failure_prevents_force_push() {
        let wm = pinned(RecordingExecutor::new().fail_on(&["reset"]));
        let err = wm.sync_development_with_main().unwrap_err();

        assert_eq!(
            err.step_label(),
            Some("failed to hard reset Development to origin/main")
        );
        assert_eq!(wm.executor().call_count(), 6);
    }
}
