// src/errors.rs

//! Error taxonomy for validation, scheduling and step execution.
//!
//! Graph-shape errors (`DuplicateProducers`, `MissingProducer`,
//! `CycleDetected`) abort a build before any step runs. `StepFailed` wraps
//! whatever went wrong inside one step and aborts the build without
//! committing that batch. `SchedulingInvariant` means validation and
//! scheduling disagree and should never surface from a correct graph.

use thiserror::Error;

use crate::tag::TypeTag;

/// Lookup failure from the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no value of type '{0}' in the store")]
    Missing(TypeTag),
}

/// A value was offered to the store under a tag it does not match.
///
/// This is a caller contract violation (a step returned a value of a
/// different type than it declared), not a user-facing condition.
#[derive(Debug, Error)]
#[error("value of type '{actual}' cannot be stored under '{expected}'")]
pub struct TypeMismatch {
    pub expected: TypeTag,
    pub actual: TypeTag,
}

/// Why a single step failed.
///
/// The variants stay distinguishable on purpose: a missing store lookup
/// after validation passed points at a scheduler bug, while a business
/// failure is an expected runtime condition.
#[derive(Debug, Error)]
pub enum StepFailure {
    /// A `require` lookup found nothing. Unreachable once validation has
    /// passed, unless the step reads a type it never declared.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The step's own logic failed.
    #[error(transparent)]
    Business(#[from] anyhow::Error),

    /// The step panicked while running on a worker task.
    #[error("step panicked: {0}")]
    Panicked(String),
}

/// Single failure type surfaced to the caller of a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no steps were supplied to the pipeline")]
    NoSteps,

    #[error("duplicate producers for types: {}", join_tags(.types))]
    DuplicateProducers { types: Vec<TypeTag> },

    #[error("step '{step}' depends on '{dependency}', but no step produces it")]
    MissingProducer { step: String, dependency: TypeTag },

    #[error("cycle detected involving type '{tag}'")]
    CycleDetected { tag: TypeTag },

    #[error("step '{step}' failed")]
    StepFailed {
        step: String,
        #[source]
        source: StepFailure,
    },

    #[error("step '{step}' produced a value of type '{actual}' but declared '{expected}'")]
    ProducedTypeMismatch {
        step: String,
        expected: TypeTag,
        actual: TypeTag,
    },

    #[error("scheduler made no progress with {remaining} steps remaining; validation and scheduling disagree")]
    SchedulingInvariant { remaining: usize },
}

fn join_tags(tags: &[TypeTag]) -> String {
    tags.iter()
        .map(|t| t.short_name())
        .collect::<Vec<_>>()
        .join(", ")
}
