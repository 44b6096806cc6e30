// src/step/typed.rs

//! Strongly typed layer over the object-safe [`Step`] trait.
//!
//! Implementations declare their output as an associated type and their
//! dependencies as an explicit tag list, instead of the marker-interface
//! reflection some frameworks use. [`into_step`] captures name, output tag
//! and dependencies once and erases the output type for the engine.

use std::any::type_name;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StepFailure;
use crate::step::Step;
use crate::store::{Store, StoreValue};
use crate::tag::TypeTag;

/// A step with a concrete output type.
#[async_trait]
pub trait TypedStep: Send + Sync + 'static {
    /// The one type this step produces.
    type Output: Send + Sync + 'static;

    /// Identity for errors and logs; defaults to the implementing type's
    /// name without its module path.
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Tags this step reads from the store. Empty by default.
    fn dependencies(&self) -> Vec<TypeTag> {
        Vec::new()
    }

    /// Run against a read-only store snapshot. `Ok(None)` produces nothing.
    async fn run(&self, store: &Store) -> Result<Option<Self::Output>, StepFailure>;
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Adapter erasing a [`TypedStep`]'s output type.
///
/// Name, output tag and dependency list are computed exactly once here, so
/// the engine never re-derives them during a build.
struct Typed<S: TypedStep> {
    name: String,
    output: TypeTag,
    dependencies: Vec<TypeTag>,
    inner: S,
}

#[async_trait]
impl<S: TypedStep> Step for Typed<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn output(&self) -> TypeTag {
        self.output
    }

    fn dependencies(&self) -> &[TypeTag] {
        &self.dependencies
    }

    async fn execute(&self, store: &Store) -> Result<Option<StoreValue>, StepFailure> {
        Ok(self.inner.run(store).await?.map(StoreValue::new))
    }
}

/// Wrap a typed step into the shared representation the engine schedules.
pub fn into_step<S: TypedStep>(step: S) -> Arc<dyn Step> {
    Arc::new(Typed {
        name: step.name().to_string(),
        output: TypeTag::of::<S::Output>(),
        dependencies: step.dependencies(),
        inner: step,
    })
}
