// src/engine/runtime.rs

use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::engine::scheduler::{ReleasedTask, Scheduler};
use crate::graph::TaskId;

/// Result of a task's execution unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed(String),
}

/// Events sent into the runtime by the executor.
#[derive(Debug, Clone)]
pub enum RunEvent {
    TaskCompleted { task: TaskId, outcome: TaskOutcome },
}

/// Options that influence how a run behaves.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Wall-clock length of one declared duration unit.
    ///
    /// One second matches the manifest's meaning of `duration`; tests dial
    /// this down to milliseconds to exercise real concurrency quickly.
    pub time_unit: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            time_unit: Duration::from_secs(1),
        }
    }
}

/// Observed start/finish of one task, relative to the run's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTiming {
    pub start: Duration,
    pub finish: Duration,
}

/// Outcome of a whole run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Span from the first task start to the last task finish.
    pub actual_makespan: Duration,
    /// Per-task timings, indexed by [`TaskId`]. `None` for tasks that were
    /// skipped and never started.
    pub timings: Vec<Option<TaskTiming>>,
    /// Tasks whose execution unit failed.
    pub failed: BTreeSet<String>,
    /// Tasks never released because an upstream dependency failed.
    pub skipped: BTreeSet<String>,
}

/// The run-to-completion event loop.
///
/// Dispatches released tasks to the executor, consumes completion events,
/// and keeps the timing bookkeeping. Dependency bookkeeping lives in the
/// [`Scheduler`] and is only ever touched here, one completion event at a
/// time, so two completions can never race on a shared successor's
/// eligibility.
pub struct Runtime<'g> {
    scheduler: Scheduler<'g>,

    /// Completion events from the executor.
    events_rx: mpsc::Receiver<RunEvent>,

    /// Channel to the executor: released tasks are sent here.
    exec_tx: mpsc::Sender<ReleasedTask>,
}

impl<'g> Runtime<'g> {
    pub fn new(
        scheduler: Scheduler<'g>,
        events_rx: mpsc::Receiver<RunEvent>,
        exec_tx: mpsc::Sender<ReleasedTask>,
    ) -> Self {
        Self {
            scheduler,
            events_rx,
            exec_tx,
        }
    }

    /// Run every task to a terminal state and report timings.
    ///
    /// Ordering guarantee: a dependent's recorded start is always ≥ its
    /// dependency's recorded finish, because a finish is recorded before
    /// the completion is propagated and dependents are dispatched.
    pub async fn run(mut self) -> Result<RunReport> {
        info!("task run started");
        let started = Instant::now();
        let task_count = self.scheduler.graph_len();
        let mut timings: Vec<Option<TaskTiming>> = vec![None; task_count];

        let roots = self.scheduler.release_roots();
        self.dispatch(roots, started, &mut timings).await?;

        while !self.scheduler.is_done() {
            let event = self.events_rx.recv().await.ok_or_else(|| {
                anyhow!("executor channel closed before all tasks finished")
            })?;
            debug!(?event, "runtime received event");

            let RunEvent::TaskCompleted { task, outcome } = event;
            let now = started.elapsed();
            if let Some(timing) = timings[task].as_mut() {
                timing.finish = now;
            }

            match &outcome {
                TaskOutcome::Success => {
                    info!(task = %self.scheduler.task_name(task), finish = ?now, "task completed")
                }
                TaskOutcome::Failed(reason) => {
                    warn!(task = %self.scheduler.task_name(task), reason = %reason, "task failed")
                }
            }

            let newly_ready = self.scheduler.handle_completion(task, &outcome);
            self.dispatch(newly_ready, started, &mut timings).await?;
        }

        let first_start = timings
            .iter()
            .flatten()
            .map(|t| t.start)
            .min()
            .unwrap_or_default();
        let last_finish = timings
            .iter()
            .flatten()
            .map(|t| t.finish)
            .max()
            .unwrap_or_default();

        let report = RunReport {
            actual_makespan: last_finish - first_start,
            timings,
            failed: self.scheduler.failed_tasks(),
            skipped: self.scheduler.skipped_tasks(),
        };

        info!(makespan = ?report.actual_makespan, "task run finished");
        Ok(report)
    }

    /// Record start times and hand released tasks to the executor.
    async fn dispatch(
        &mut self,
        tasks: Vec<ReleasedTask>,
        started: Instant,
        timings: &mut [Option<TaskTiming>],
    ) -> Result<()> {
        for task in tasks {
            let start = started.elapsed();
            timings[task.id] = Some(TaskTiming {
                start,
                finish: start,
            });
            debug!(task = %task.name, ?start, "dispatching task to executor");
            self.exec_tx
                .send(task)
                .await
                .map_err(|err| anyhow!("failed to send task to executor: {err}"))?;
        }
        Ok(())
    }
}
