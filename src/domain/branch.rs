use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four long-lived branches of the promotion model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchRole {
    Development,
    Nightly,
    Release,
    Main,
}

impl BranchRole {
    /// Default branch name for this role
    pub fn default_name(&self) -> &'static str {
        match self {
            BranchRole::Development => "Development",
            BranchRole::Nightly => "Nightly",
            BranchRole::Release => "Release",
            BranchRole::Main => "main",
        }
    }
}

impl fmt::Display for BranchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

fn default_development() -> String {
    BranchRole::Development.default_name().to_string()
}

fn default_nightly() -> String {
    BranchRole::Nightly.default_name().to_string()
}

fn default_release() -> String {
    BranchRole::Release.default_name().to_string()
}

fn default_main() -> String {
    BranchRole::Main.default_name().to_string()
}

/// Concrete branch names for each role.
///
/// Names are used verbatim; no character set or length checks are applied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BranchNames {
    #[serde(default = "default_development")]
    pub development: String,

    #[serde(default = "default_nightly")]
    pub nightly: String,

    #[serde(default = "default_release")]
    pub release: String,

    #[serde(default = "default_main")]
    pub main: String,
}

impl BranchNames {
    /// Name configured for a role
    pub fn name(&self, role: BranchRole) -> &str {
        match role {
            BranchRole::Development => &self.development,
            BranchRole::Nightly => &self.nightly,
            BranchRole::Release => &self.release,
            BranchRole::Main => &self.main,
        }
    }
}

impl Default for BranchNames {
    fn default() -> Self {
        BranchNames {
            development: default_development(),
            nightly: default_nightly(),
            release: default_release(),
            main: default_main(),
        }
    }
}

/// `feature/<name>`
pub fn feature_branch(name: &str) -> String {
    format!("feature/{}", name)
}

/// `hotfix/<name>`
pub fn hotfix_branch(name: &str) -> String {
    format!("hotfix/{}", name)
}

/// Tag preserving Development's history before it is reset onto main
pub fn backup_tag(date: NaiveDate) -> String {
    format!("backup/development-{}", date.format("%Y%m%d"))
}

/// Merge record description for a Development to Release promotion
pub fn release_merge_message(date: NaiveDate) -> String {
    format!(
        "chore: Promote Development to Release [{}]",
        date.format("%Y-%m-%d")
    )
}

/// Annotation for a caller-supplied release tag
pub fn release_tag_message(tag: &str) -> String {
    format!("Release candidate {}", tag)
}

/// Merge record description when a hotfix is carried into Development
pub fn forward_port_message(hotfix: &str) -> String {
    format!("chore: Forward-port {} to Development", hotfix)
}
