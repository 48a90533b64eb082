// src/graph/builder.rs

use std::collections::HashMap;

use crate::errors::StructuralError;
use crate::input::TaskRecord;

/// Index of a task in the graph's dense node array.
///
/// Ids follow declaration order: the first `[[task]]` entry is id 0.
pub type TaskId = usize;

/// One node of the dependency graph.
#[derive(Debug, Clone)]
pub struct TaskNode {
    /// Unique task name.
    pub name: String,
    /// Declared duration in seconds. Non-negative once the builder accepts it.
    pub duration: u64,
    /// Resolved direct dependencies: tasks that must finish before this one.
    pub deps: Vec<TaskId>,
    /// Declared dependency names that did not resolve to any task.
    ///
    /// The builder keeps these instead of erroring so the validator can
    /// report every missing reference in one pass.
    pub unresolved: Vec<String>,
    /// Resolved direct dependents: tasks that list this one as a dependency.
    pub dependents: Vec<TaskId>,
}

/// In-memory dependency graph over a task collection.
///
/// Tasks live in a dense array in declaration order; dependency names are
/// resolved to indices once, here, so the validator, planner and scheduler
/// all work on integer ids.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
    index: HashMap<String, TaskId>,
}

impl TaskGraph {
    /// Build a graph from task records.
    ///
    /// Fails only on structurally malformed input (a duplicate task name or
    /// a negative duration); unresolvable dependency names are deferred to
    /// [`crate::graph::validate`].
    pub fn build(records: &[TaskRecord]) -> Result<Self, StructuralError> {
        let mut index: HashMap<String, TaskId> = HashMap::with_capacity(records.len());
        let mut nodes: Vec<TaskNode> = Vec::with_capacity(records.len());

        // First pass: create nodes and the name index, rejecting structural
        // problems immediately.
        for record in records {
            if record.duration < 0 {
                return Err(StructuralError::InvalidDuration {
                    task: record.name.clone(),
                    duration: record.duration,
                });
            }
            if index.insert(record.name.clone(), nodes.len()).is_some() {
                return Err(StructuralError::DuplicateTask {
                    name: record.name.clone(),
                });
            }
            nodes.push(TaskNode {
                name: record.name.clone(),
                duration: record.duration as u64,
                deps: Vec::new(),
                unresolved: Vec::new(),
                dependents: Vec::new(),
            });
        }

        // Second pass: resolve dependency names to ids and populate the
        // reverse (dependents) adjacency.
        for (id, record) in records.iter().enumerate() {
            for dep_name in &record.after {
                match index.get(dep_name) {
                    Some(&dep_id) => {
                        nodes[id].deps.push(dep_id);
                        nodes[dep_id].dependents.push(id);
                    }
                    None => nodes[id].unresolved.push(dep_name.clone()),
                }
            }
        }

        Ok(Self { nodes, index })
    }

    /// Number of tasks in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node for a given id. Panics on an out-of-range id, which cannot be
    /// produced by this module's public API.
    pub fn node(&self, id: TaskId) -> &TaskNode {
        &self.nodes[id]
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> &[TaskNode] {
        &self.nodes
    }

    /// Look up a task id by name.
    pub fn id_of(&self, name: &str) -> Option<TaskId> {
        self.index.get(name).copied()
    }

    /// Immediate resolved dependencies of a task.
    pub fn dependencies_of(&self, id: TaskId) -> &[TaskId] {
        &self.nodes[id].deps
    }

    /// Immediate dependents of a task.
    pub fn dependents_of(&self, id: TaskId) -> &[TaskId] {
        &self.nodes[id].dependents
    }
}
