// src/engine/mod.rs

//! Build engine.
//!
//! This module ties together:
//! - the pipeline façade that callers hand their step set and parameters to
//! - the batch runner that executes a build:
//!   - one store snapshot per batch
//!   - concurrent step execution within a batch
//!   - commit-after-batch, abort on the first step failure

pub mod pipeline;
pub mod runner;

pub use pipeline::Pipeline;
