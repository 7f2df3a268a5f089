//! Domain logic - branch roles and naming rules independent of git operations

pub mod branch;

pub use branch::{BranchNames, BranchRole};
