// src/graph/validate.rs

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use crate::graph::builder::{TaskGraph, TaskId};

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A task declared a dependency on a name no task carries.
    MissingDependency { task: String, missing: String },
    /// The graph contains at least one dependency cycle.
    ///
    /// Reported once per graph; identifying the cycle members is not part
    /// of the contract.
    CircularDependency,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingDependency { task, missing } => {
                write!(f, "task '{task}' depends on missing task '{missing}'")
            }
            Violation::CircularDependency => {
                write!(f, "circular dependency detected in task graph")
            }
        }
    }
}

/// Outcome of validating a [`TaskGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The graph is well-formed; `order` is a topological order over all
    /// task ids.
    Valid { order: Vec<TaskId> },
    /// The graph is not well-formed; `violations` lists every problem found.
    Invalid { violations: Vec<Violation> },
}

/// Validate a built graph.
///
/// Two steps, in a fixed order:
///
/// 1. Reference check: every unresolved dependency name becomes a
///    [`Violation::MissingDependency`], all of them collected in declaration
///    order rather than stopping at the first.
/// 2. Cycle check, only when step 1 found nothing — cycle analysis over a
///    graph with dangling references is meaningless. Kahn's algorithm with
///    eligible nodes drawn lowest-id-first, so ties among simultaneously
///    eligible tasks break by declaration order and the resulting
///    topological order is deterministic.
pub fn validate(graph: &TaskGraph) -> Validation {
    let mut violations = Vec::new();

    for node in graph.nodes() {
        for missing in &node.unresolved {
            violations.push(Violation::MissingDependency {
                task: node.name.clone(),
                missing: missing.clone(),
            });
        }
    }

    if !violations.is_empty() {
        return Validation::Invalid { violations };
    }

    match topological_order(graph) {
        Some(order) => Validation::Valid { order },
        None => Validation::Invalid {
            violations: vec![Violation::CircularDependency],
        },
    }
}

/// Kahn's algorithm over the dense graph.
///
/// Returns `None` when not every node can be removed, i.e. a cycle exists.
fn topological_order(graph: &TaskGraph) -> Option<Vec<TaskId>> {
    let mut in_degree: Vec<usize> = graph
        .nodes()
        .iter()
        .map(|node| node.deps.len())
        .collect();

    // Min-heap over ids: among all currently eligible tasks, the one
    // declared first is removed first.
    let mut eligible: BinaryHeap<Reverse<TaskId>> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &deg)| deg == 0)
        .map(|(id, _)| Reverse(id))
        .collect();

    let mut order = Vec::with_capacity(graph.len());

    while let Some(Reverse(id)) = eligible.pop() {
        order.push(id);
        for &dependent in graph.dependents_of(id) {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                eligible.push(Reverse(dependent));
            }
        }
    }

    if order.len() == graph.len() {
        Some(order)
    } else {
        None
    }
}
