// src/engine/scheduler.rs

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::engine::runtime::TaskOutcome;
use crate::graph::{TaskGraph, TaskId};

/// Per-run state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    /// Waiting on dependencies.
    Pending,
    /// Dispatched to the executor and currently occupying a slot.
    Running,
    /// Completed successfully.
    DoneSuccess,
    /// The execution unit reported failure.
    DoneFailed,
    /// Never released: an upstream dependency failed.
    Skipped,
}

impl RunState {
    fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::DoneSuccess | RunState::DoneFailed | RunState::Skipped
        )
    }
}

/// Description of a task the scheduler wants the executor to run now.
#[derive(Debug, Clone)]
pub struct ReleasedTask {
    pub id: TaskId,
    pub name: String,
    /// Declared duration in seconds.
    pub duration: u64,
}

/// Per-run state machine over a validated graph.
///
/// It is responsible for:
/// - releasing a task the instant all its dependencies have completed
/// - re-evaluating exactly the completed task's dependents on completion
/// - marking transitive dependents of a failed task as skipped, leaving
///   independent chains unaffected
pub struct Scheduler<'g> {
    graph: &'g TaskGraph,
    states: Vec<RunState>,
}

impl<'g> Scheduler<'g> {
    /// Construct a scheduler over a validated graph, all tasks pending.
    pub fn new(graph: &'g TaskGraph) -> Self {
        Self {
            graph,
            states: vec![RunState::Pending; graph.len()],
        }
    }

    /// Release every root task (no dependencies) at run start.
    pub fn release_roots(&mut self) -> Vec<ReleasedTask> {
        let roots: Vec<TaskId> = (0..self.graph.len())
            .filter(|&id| self.graph.dependencies_of(id).is_empty())
            .collect();
        self.release_eligible(&roots)
    }

    /// Handle completion of a task's execution unit.
    ///
    /// - On success, re-evaluate the task's direct dependents and return
    ///   those whose full dependency set is now satisfied.
    /// - On failure, mark all still-pending transitive dependents as
    ///   skipped; they will never be released.
    pub fn handle_completion(&mut self, id: TaskId, outcome: &TaskOutcome) -> Vec<ReleasedTask> {
        if self.states[id] != RunState::Running {
            warn!(
                task = %self.graph.node(id).name,
                state = ?self.states[id],
                "completion for a task that is not running; ignoring"
            );
            return Vec::new();
        }

        match outcome {
            TaskOutcome::Success => {
                self.states[id] = RunState::DoneSuccess;
                debug!(task = %self.graph.node(id).name, "task completed successfully");
                let dependents = self.graph.dependents_of(id).to_vec();
                self.release_eligible(&dependents)
            }
            TaskOutcome::Failed(reason) => {
                self.states[id] = RunState::DoneFailed;
                warn!(
                    task = %self.graph.node(id).name,
                    reason = %reason,
                    "task failed; skipping dependents"
                );
                self.skip_dependents(id);
                Vec::new()
            }
        }
    }

    /// Number of tasks in the underlying graph.
    pub fn graph_len(&self) -> usize {
        self.graph.len()
    }

    /// Name of a task by id.
    pub fn task_name(&self, id: TaskId) -> &str {
        &self.graph.node(id).name
    }

    /// True once every task is in a terminal state.
    pub fn is_done(&self) -> bool {
        self.states.iter().all(|state| state.is_terminal())
    }

    /// Names of tasks whose execution unit failed.
    pub fn failed_tasks(&self) -> BTreeSet<String> {
        self.tasks_in_state(RunState::DoneFailed)
    }

    /// Names of tasks never released because of an upstream failure.
    pub fn skipped_tasks(&self) -> BTreeSet<String> {
        self.tasks_in_state(RunState::Skipped)
    }

    fn tasks_in_state(&self, wanted: RunState) -> BTreeSet<String> {
        self.states
            .iter()
            .enumerate()
            .filter(|&(_, &state)| state == wanted)
            .map(|(id, _)| self.graph.node(id).name.clone())
            .collect()
    }

    /// Mark the given candidates as running if they are pending and all their
    /// dependencies have completed, and return them for dispatch.
    fn release_eligible(&mut self, candidates: &[TaskId]) -> Vec<ReleasedTask> {
        let mut released = Vec::new();

        for &id in candidates {
            if self.states[id] == RunState::Pending && self.deps_satisfied(id) {
                self.states[id] = RunState::Running;
                let node = self.graph.node(id);
                debug!(task = %node.name, "dependencies satisfied; releasing task");
                released.push(ReleasedTask {
                    id,
                    name: node.name.clone(),
                    duration: node.duration,
                });
            }
        }

        released
    }

    fn deps_satisfied(&self, id: TaskId) -> bool {
        self.graph
            .dependencies_of(id)
            .iter()
            .all(|&dep| self.states[dep] == RunState::DoneSuccess)
    }

    /// Mark all still-pending transitive dependents of a failed task as
    /// skipped. Tasks already running are left to finish; their own
    /// dependents are unaffected by this failure unless they also fail.
    fn skip_dependents(&mut self, failed: TaskId) {
        let mut stack: Vec<TaskId> = self.graph.dependents_of(failed).to_vec();

        while let Some(id) = stack.pop() {
            if self.states[id] == RunState::Pending {
                self.states[id] = RunState::Skipped;
                debug!(
                    task = %self.graph.node(id).name,
                    "skipping task due to upstream failure"
                );
                stack.extend(self.graph.dependents_of(id));
            }
        }
    }
}
