// src/engine/runner.rs

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{BuildError, StepFailure};
use crate::step::Step;
use crate::store::{Store, StoreValue};

/// Drive a build batch by batch.
///
/// Every step of a batch runs as its own tokio task against the same store
/// snapshot, so siblings never observe each other's output and sequential
/// and concurrent execution are observably equivalent. Results are
/// committed only after the whole batch succeeded; a failing batch commits
/// nothing and aborts the build.
pub(crate) async fn run_batches(
    steps: &[Arc<dyn Step>],
    batches: &[Vec<usize>],
    mut store: Store,
) -> Result<Store, BuildError> {
    for (batch_idx, batch) in batches.iter().enumerate() {
        debug!(batch = batch_idx, steps = batch.len(), "executing batch");

        // Shallow clone: the snapshot shares the stored values, and later
        // commits to `store` stay invisible to in-flight steps.
        let snapshot = Arc::new(store.clone());

        let mut handles = Vec::with_capacity(batch.len());
        for &idx in batch {
            let step = Arc::clone(&steps[idx]);
            let snapshot = Arc::clone(&snapshot);
            handles.push((idx, tokio::spawn(async move { step.execute(&snapshot).await })));
        }

        // Await in the batch's declaration order. When several steps fail
        // concurrently, the first one in that order wins; this is the
        // documented tie-break policy.
        let mut produced: Vec<(usize, StoreValue)> = Vec::with_capacity(batch.len());
        let mut first_failure: Option<BuildError> = None;

        for (idx, handle) in handles {
            let step = &steps[idx];
            let result = match handle.await {
                Ok(result) => result,
                Err(join_error) => Err(StepFailure::Panicked(join_error.to_string())),
            };

            match result {
                Ok(Some(value)) => produced.push((idx, value)),
                Ok(None) => {
                    debug!(step = step.name(), batch = batch_idx, "step produced nothing");
                }
                Err(failure) => {
                    warn!(
                        step = step.name(),
                        batch = batch_idx,
                        error = %failure,
                        "step failed; aborting build without committing this batch"
                    );
                    if first_failure.is_none() {
                        first_failure = Some(BuildError::StepFailed {
                            step: step.name().to_string(),
                            source: failure,
                        });
                    }
                }
            }
        }

        if let Some(err) = first_failure {
            return Err(err);
        }

        // Commit phase: the runner is the only writer, strictly after all
        // of the batch's executions finished.
        for (idx, value) in produced {
            let step = &steps[idx];
            store
                .insert_raw(step.output(), value)
                .map_err(|mismatch| BuildError::ProducedTypeMismatch {
                    step: step.name().to_string(),
                    expected: mismatch.expected,
                    actual: mismatch.actual,
                })?;
        }
    }

    Ok(store)
}
