// src/engine/mod.rs

//! Concurrent task execution engine.
//!
//! This module ties together:
//! - the per-run scheduler state machine (which tasks may start now)
//! - the runtime event loop that reacts to task completions
//!
//! Independent tasks run concurrently; a task is released the instant its
//! last dependency completes. A run is synchronous from the caller's
//! perspective: [`execute`] returns once every task is in a terminal state.

pub mod runtime;
pub mod scheduler;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::graph::TaskGraph;

pub use runtime::{RunEvent, RunOptions, RunReport, Runtime, TaskOutcome, TaskTiming};
pub use scheduler::{ReleasedTask, Scheduler};

/// Execute all tasks of a validated graph and collect timing results.
///
/// Wires the duration executor to the runtime over mpsc channels: the
/// runtime sends [`ReleasedTask`]s out, the executor sends
/// [`RunEvent::TaskCompleted`] back.
pub async fn execute(graph: &TaskGraph, options: RunOptions) -> Result<RunReport> {
    let (rt_tx, rt_rx) = mpsc::channel::<RunEvent>(64);
    let exec_tx = crate::exec::spawn_executor(options.time_unit, rt_tx);

    let runtime = Runtime::new(Scheduler::new(graph), rt_rx, exec_tx);
    runtime.run().await
}
