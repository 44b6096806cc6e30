// src/step/mod.rs

//! Step abstraction.
//!
//! - [`Step`] is the object-safe trait the engine schedules and runs.
//! - [`typed`] adapts strongly typed step implementations onto it, caching
//!   the name, output tag and dependency list at construction.

pub mod typed;

use async_trait::async_trait;

use crate::errors::StepFailure;
use crate::store::{Store, StoreValue};
use crate::tag::TypeTag;

pub use typed::{TypedStep, into_step};

/// A unit of work: produces exactly one typed value, consumes zero or more.
///
/// `execute` must be a pure function of the store snapshot it is given plus
/// the step's own collaborators. Steps never write to the store; the runner
/// commits their outputs at the batch boundary.
#[async_trait]
pub trait Step: Send + Sync {
    /// Identity carried in errors and logs.
    fn name(&self) -> &str;

    /// Tag of the value this step commits into the store.
    fn output(&self) -> TypeTag;

    /// Tags this step reads. Declared once at construction, never
    /// recomputed per call; the step's own output must not appear here.
    fn dependencies(&self) -> &[TypeTag];

    /// Run against a read-only store snapshot.
    ///
    /// `Ok(None)` is a legal "nothing produced" result: the runner commits
    /// nothing for this step and the build continues.
    async fn execute(&self, store: &Store) -> Result<Option<StoreValue>, StepFailure>;
}
