//! Execution planning for a simulated rename.

pub mod plan;

pub use plan::{dependency_chain, plan, ExecutionStep, Phase, VALIDATION_TARGET};
