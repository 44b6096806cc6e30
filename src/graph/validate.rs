// src/graph/validate.rs

use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::BuildError;
use crate::graph::graph::StepGraph;
use crate::step::Step;
use crate::tag::TypeTag;

/// Prove a step set is well-formed before anything executes.
///
/// Checks, in order, failing fast on the first violation:
/// 1. every type is produced by at most one step
/// 2. every declared dependency has a producing step
/// 3. the type graph (edges dep -> produced) is acyclic
///
/// A self-dependency counts as a cycle. A build whose step set fails here
/// performs zero side effects.
pub fn validate_steps(steps: &[Arc<dyn Step>], graph: &StepGraph) -> Result<(), BuildError> {
    check_duplicate_producers(graph)?;
    check_missing_producers(steps, graph)?;
    check_cycles(steps)?;
    debug!(steps = steps.len(), "step graph validated");
    Ok(())
}

fn check_duplicate_producers(graph: &StepGraph) -> Result<(), BuildError> {
    let mut duplicated: Vec<TypeTag> = graph
        .produced_tags()
        .filter(|tag| graph.producers_of(*tag).len() > 1)
        .collect();

    if duplicated.is_empty() {
        return Ok(());
    }

    // Sort by name so the error message is deterministic.
    duplicated.sort_by_key(|tag| tag.name());
    Err(BuildError::DuplicateProducers { types: duplicated })
}

fn check_missing_producers(
    steps: &[Arc<dyn Step>],
    graph: &StepGraph,
) -> Result<(), BuildError> {
    for step in steps {
        for dep in step.dependencies() {
            if graph.producers_of(*dep).is_empty() {
                return Err(BuildError::MissingProducer {
                    step: step.name().to_string(),
                    dependency: *dep,
                });
            }
        }
    }
    Ok(())
}

fn check_cycles(steps: &[Arc<dyn Step>]) -> Result<(), BuildError> {
    // A step depending on its own output is a one-node cycle; report it
    // directly rather than relying on the graph pass.
    for step in steps {
        if step.dependencies().contains(&step.output()) {
            return Err(BuildError::CycleDetected { tag: step.output() });
        }
    }

    // Edge direction: dependency -> produced type. A topological sort
    // fails exactly when the type graph has a cycle.
    let mut type_graph: DiGraphMap<TypeTag, ()> = DiGraphMap::new();

    for step in steps {
        type_graph.add_node(step.output());
    }

    for step in steps {
        for dep in step.dependencies() {
            type_graph.add_edge(*dep, step.output(), ());
        }
    }

    match toposort(&type_graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(BuildError::CycleDetected {
            tag: cycle.node_id(),
        }),
    }
}
