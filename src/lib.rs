// src/lib.rs

pub mod cli;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod listing;
pub mod logging;
pub mod step;
pub mod store;
pub mod tag;

pub use engine::Pipeline;
pub use errors::{BuildError, StepFailure, StoreError, TypeMismatch};
pub use step::{Step, TypedStep, into_step};
pub use store::{Store, StoreValue};
pub use tag::TypeTag;
