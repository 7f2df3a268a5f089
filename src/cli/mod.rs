//! Command-line plumbing shared by the binary and tests

pub mod orchestration;

pub use orchestration::{run_workflow, WorkflowCommand, WorkflowReport};
