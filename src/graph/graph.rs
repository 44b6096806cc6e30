// src/graph/graph.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::step::Step;
use crate::tag::TypeTag;

/// Producer and dependent indices over a step set, keyed by type.
///
/// Indices refer into the slice the graph was built from. This is
/// intentionally lightweight adjacency bookkeeping; well-formedness
/// (unique producers, no cycles) is proven separately in [`validate`].
///
/// [`validate`]: crate::graph::validate
#[derive(Debug, Default)]
pub struct StepGraph {
    /// For each produced type, the steps that declare it as their output.
    /// More than one entry is a duplicate-producer violation.
    producers: HashMap<TypeTag, Vec<usize>>,
    /// For each type, the steps that declare it as a dependency.
    dependents: HashMap<TypeTag, Vec<usize>>,
}

impl StepGraph {
    pub fn from_steps(steps: &[Arc<dyn Step>]) -> Self {
        let mut producers: HashMap<TypeTag, Vec<usize>> = HashMap::new();
        let mut dependents: HashMap<TypeTag, Vec<usize>> = HashMap::new();

        for (idx, step) in steps.iter().enumerate() {
            producers.entry(step.output()).or_default().push(idx);
            for dep in step.dependencies() {
                dependents.entry(*dep).or_default().push(idx);
            }
        }

        Self {
            producers,
            dependents,
        }
    }

    /// Steps producing the given type.
    pub fn producers_of(&self, tag: TypeTag) -> &[usize] {
        self.producers.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Steps that declared the given type as a dependency.
    pub fn dependents_of(&self, tag: TypeTag) -> &[usize] {
        self.dependents.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All produced types, in no particular order.
    pub fn produced_tags(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.producers.keys().copied()
    }
}
