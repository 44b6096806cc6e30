// src/engine/pipeline.rs

use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::runner::run_batches;
use crate::errors::BuildError;
use crate::graph::{StepGraph, plan_batches, validate_steps};
use crate::step::Step;
use crate::store::Store;

/// Façade over one build: fixed step set in, final store out.
///
/// The step set is supplied once at construction; the pipeline does not
/// discover steps itself. Every build re-derives the dependency graph,
/// validates it, levels it into batches and runs them. The caller either
/// receives a fully populated store or a single [`BuildError`], never a
/// partially populated store.
pub struct Pipeline {
    steps: Vec<Arc<dyn Step>>,
}

impl Pipeline {
    /// Create a pipeline over a fixed step collection.
    ///
    /// Rejects an empty collection; everything else is checked per build.
    pub fn new(steps: Vec<Arc<dyn Step>>) -> Result<Self, BuildError> {
        if steps.is_empty() {
            return Err(BuildError::NoSteps);
        }
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Validate and level the step set without executing anything.
    ///
    /// Returns the step names of each batch in execution order; useful for
    /// dry-run output and for asserting leveling in tests.
    pub fn plan(&self) -> Result<Vec<Vec<String>>, BuildError> {
        let graph = StepGraph::from_steps(&self.steps);
        validate_steps(&self.steps, &graph)?;
        let batches = plan_batches(&self.steps, &graph)?;

        Ok(batches
            .iter()
            .map(|batch| {
                batch
                    .iter()
                    .map(|&idx| self.steps[idx].name().to_string())
                    .collect()
            })
            .collect())
    }

    /// Run a build with no seeded parameters.
    pub async fn build(&self) -> Result<Store, BuildError> {
        self.run(Store::new()).await
    }

    /// Run a build with `params` seeded into the store under its own type
    /// before the first batch executes.
    ///
    /// Seeded types are readable by any step but are not producers: a step
    /// must not declare a seeded type as a dependency, since validation
    /// only accepts dependencies some step produces.
    pub async fn build_with<P: Send + Sync + 'static>(
        &self,
        params: P,
    ) -> Result<Store, BuildError> {
        let mut store = Store::new();
        store.insert(params);
        self.run(store).await
    }

    async fn run(&self, store: Store) -> Result<Store, BuildError> {
        debug!(steps = self.steps.len(), "starting build");

        let graph = StepGraph::from_steps(&self.steps);
        validate_steps(&self.steps, &graph)?;

        let batches = plan_batches(&self.steps, &graph)?;
        info!(
            steps = self.steps.len(),
            batches = batches.len(),
            "step graph validated and scheduled"
        );

        let store = run_batches(&self.steps, &batches, store).await?;
        info!(values = store.len(), "build completed");
        Ok(store)
    }
}
