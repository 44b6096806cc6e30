// src/graph/mod.rs

//! Dependency graph derived from a step set.
//!
//! - [`graph`] indexes which steps produce and depend on each type.
//! - [`validate`] proves the graph is well-formed before anything runs.
//! - [`batches`] levels the validated steps into parallel-safe batches.
//!
//! The graph is rebuilt from the step set at the start of every build;
//! nothing here is cached across builds.

pub mod batches;
pub mod graph;
pub mod validate;

pub use batches::plan_batches;
pub use graph::StepGraph;
pub use validate::validate_steps;
