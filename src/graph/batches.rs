// src/graph/batches.rs

use std::sync::Arc;

use tracing::debug;

use crate::errors::BuildError;
use crate::graph::graph::StepGraph;
use crate::step::Step;

/// Level a validated step set into batches via Kahn's algorithm over steps.
///
/// Each batch is a group of step indices whose dependencies were all
/// produced in earlier batches: zero-dependency steps land in batch 0, and
/// a step's batch index is one plus the highest batch of its producers.
/// Order within a batch carries no meaning.
///
/// An empty ready set while steps remain means validation and scheduling
/// disagree; cycle detection should have made that unreachable.
pub fn plan_batches(
    steps: &[Arc<dyn Step>],
    graph: &StepGraph,
) -> Result<Vec<Vec<usize>>, BuildError> {
    let mut indegree: Vec<usize> = steps.iter().map(|s| s.dependencies().len()).collect();
    let mut placed = vec![false; steps.len()];
    let mut remaining = steps.len();
    let mut batches = Vec::new();

    while remaining > 0 {
        let ready: Vec<usize> = (0..steps.len())
            .filter(|&idx| !placed[idx] && indegree[idx] == 0)
            .collect();

        if ready.is_empty() {
            return Err(BuildError::SchedulingInvariant { remaining });
        }

        for &idx in &ready {
            placed[idx] = true;
            remaining -= 1;
            for &dependent in graph.dependents_of(steps[idx].output()) {
                if !placed[dependent] {
                    indegree[dependent] -= 1;
                }
            }
        }

        debug!(batch = batches.len(), steps = ready.len(), "planned batch");
        batches.push(ready);
    }

    Ok(batches)
}
