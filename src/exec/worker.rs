// src/exec/worker.rs

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::runtime::{RunEvent, TaskOutcome};
use crate::engine::scheduler::ReleasedTask;

/// Spawn the background executor loop.
///
/// The returned sender is what the runtime uses as `exec_tx`. Each task is
/// executed in its own Tokio task, so any number of independent tasks can
/// run in parallel.
pub fn spawn_executor(
    time_unit: Duration,
    runtime_tx: mpsc::Sender<RunEvent>,
) -> mpsc::Sender<ReleasedTask> {
    let (tx, mut rx) = mpsc::channel::<ReleasedTask>(32);

    tokio::spawn(async move {
        debug!("executor loop started");
        while let Some(task) = rx.recv().await {
            let runtime_tx = runtime_tx.clone();
            tokio::spawn(async move {
                run_task(task, time_unit, runtime_tx).await;
            });
        }
        debug!("executor loop finished (channel closed)");
    });

    tx
}

/// Occupy a slot for the task's declared duration, then report completion.
async fn run_task(task: ReleasedTask, time_unit: Duration, runtime_tx: mpsc::Sender<RunEvent>) {
    info!(task = %task.name, duration = task.duration, "task started");

    tokio::time::sleep(scaled_duration(task.duration, time_unit)).await;

    let completed = RunEvent::TaskCompleted {
        task: task.id,
        outcome: TaskOutcome::Success,
    };
    if runtime_tx.send(completed).await.is_err() {
        warn!(task = %task.name, "runtime gone; dropping completion event");
    }
}

fn scaled_duration(units: u64, time_unit: Duration) -> Duration {
    time_unit.saturating_mul(units.min(u32::MAX as u64) as u32)
}
