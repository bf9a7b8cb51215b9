//! Command line workflow

pub mod orchestration;

pub use orchestration::{build_source, run_workflow, WorkflowArgs, WorkflowResult};
