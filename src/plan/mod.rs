// src/plan/mod.rs

//! Critical-path planning over a validated graph.
//!
//! Standard longest-path-in-a-DAG: walking tasks in topological order means
//! every dependency's finish time is known before it is needed, so one pass
//! over nodes and edges suffices.

use crate::graph::{TaskGraph, TaskId};

/// Derived schedule times for one task, in seconds from time 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntry {
    pub earliest_start: u64,
    pub earliest_finish: u64,
}

/// Critical-path plan for a whole graph.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Topological execution order the plan was computed in.
    pub order: Vec<TaskId>,
    /// Per-task times, indexed by [`TaskId`].
    pub entries: Vec<PlanEntry>,
    /// Length of the longest dependency chain, in seconds. Lower-bounds the
    /// wall-clock makespan of any execution.
    pub expected_makespan: u64,
}

/// Compute earliest start/finish times and the expected makespan.
///
/// `order` must be a topological order over `graph`, as produced by
/// [`crate::graph::validate`].
pub fn critical_path(graph: &TaskGraph, order: &[TaskId]) -> Plan {
    let mut entries = vec![
        PlanEntry {
            earliest_start: 0,
            earliest_finish: 0,
        };
        graph.len()
    ];
    let mut expected_makespan = 0;

    for &id in order {
        let node = graph.node(id);
        let earliest_start = node
            .deps
            .iter()
            .map(|&dep| entries[dep].earliest_finish)
            .max()
            .unwrap_or(0);
        let earliest_finish = earliest_start + node.duration;

        entries[id] = PlanEntry {
            earliest_start,
            earliest_finish,
        };
        expected_makespan = expected_makespan.max(earliest_finish);
    }

    Plan {
        order: order.to_vec(),
        entries,
        expected_makespan,
    }
}
