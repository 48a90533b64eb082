use std::collections::HashSet;
use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;

use taskrun::graph::{validate, TaskGraph, Validation};
use taskrun::input::TaskRecord;
use taskrun::engine::{
    execute, ReleasedTask, RunEvent, RunOptions, RunReport, Runtime, Scheduler, TaskOutcome,
};

type TestResult = Result<(), Box<dyn Error>>;

const UNIT: Duration = Duration::from_millis(25);

fn build_valid(records: &[TaskRecord]) -> Result<TaskGraph, Box<dyn Error>> {
    let graph = TaskGraph::build(records)?;
    match validate(&graph) {
        Validation::Valid { .. } => Ok(graph),
        Validation::Invalid { violations } => {
            Err(format!("expected valid graph, got {violations:?}").into())
        }
    }
}

/// Executor that sleeps like the real one but reports failure for the
/// given task names.
fn spawn_failing_executor(
    time_unit: Duration,
    fail: HashSet<String>,
    runtime_tx: mpsc::Sender<RunEvent>,
) -> mpsc::Sender<ReleasedTask> {
    let (tx, mut rx) = mpsc::channel::<ReleasedTask>(32);

    tokio::spawn(async move {
        while let Some(task) = rx.recv().await {
            let runtime_tx = runtime_tx.clone();
            let fails = fail.contains(&task.name);
            tokio::spawn(async move {
                tokio::time::sleep(time_unit * task.duration as u32).await;
                let outcome = if fails {
                    TaskOutcome::Failed("synthetic failure".into())
                } else {
                    TaskOutcome::Success
                };
                let _ = runtime_tx
                    .send(RunEvent::TaskCompleted {
                        task: task.id,
                        outcome,
                    })
                    .await;
            });
        }
    });

    tx
}

async fn run_with_failures(
    graph: &TaskGraph,
    fail: HashSet<String>,
) -> Result<RunReport, Box<dyn Error>> {
    let (rt_tx, rt_rx) = mpsc::channel::<RunEvent>(64);
    let exec_tx = spawn_failing_executor(UNIT, fail, rt_tx);
    let runtime = Runtime::new(Scheduler::new(graph), rt_rx, exec_tx);
    Ok(runtime.run().await?)
}

#[tokio::test]
async fn independent_chains_run_in_parallel() -> TestResult {
    // A(2)->B(5) in parallel with C(1)->D(1)->E(1): critical path is 7
    // units; running the chains back-to-back would take 10.
    let records = vec![
        TaskRecord::new("a", 2, &[]),
        TaskRecord::new("b", 5, &["a"]),
        TaskRecord::new("c", 1, &[]),
        TaskRecord::new("d", 1, &["c"]),
        TaskRecord::new("e", 1, &["d"]),
    ];
    let graph = build_valid(&records)?;

    let report = execute(&graph, RunOptions { time_unit: UNIT }).await?;

    assert!(report.failed.is_empty());
    assert!(report.skipped.is_empty());
    assert!(
        report.actual_makespan >= UNIT * 7,
        "makespan {:?} below the critical path",
        report.actual_makespan
    );
    assert!(
        report.actual_makespan < UNIT * 9,
        "makespan {:?} suggests the chains ran sequentially",
        report.actual_makespan
    );
    Ok(())
}

#[tokio::test]
async fn dependents_start_only_after_dependencies_finish() -> TestResult {
    let records = vec![
        TaskRecord::new("a", 1, &[]),
        TaskRecord::new("b", 1, &["a"]),
        TaskRecord::new("c", 1, &["a", "b"]),
    ];
    let graph = build_valid(&records)?;

    let report = execute(&graph, RunOptions { time_unit: UNIT }).await?;

    for id in 0..graph.len() {
        let timing = report.timings[id].ok_or("task never started")?;
        for &dep in graph.dependencies_of(id) {
            let dep_timing = report.timings[dep].ok_or("dependency never started")?;
            assert!(
                timing.start >= dep_timing.finish,
                "{} started at {:?} before {} finished at {:?}",
                graph.node(id).name,
                timing.start,
                graph.node(dep).name,
                dep_timing.finish
            );
        }
    }
    Ok(())
}

#[tokio::test]
async fn failure_blocks_dependents_but_not_independent_chains() -> TestResult {
    let records = vec![
        TaskRecord::new("a", 1, &[]),
        TaskRecord::new("b", 1, &["a"]),
        TaskRecord::new("c", 1, &["b"]),
        TaskRecord::new("x", 1, &[]),
        TaskRecord::new("y", 1, &["x"]),
    ];
    let graph = build_valid(&records)?;

    let fail: HashSet<String> = ["a".to_string()].into();
    let report = run_with_failures(&graph, fail).await?;

    assert_eq!(report.failed.iter().collect::<Vec<_>>(), ["a"]);
    assert_eq!(report.skipped.iter().collect::<Vec<_>>(), ["b", "c"]);

    // The independent chain still ran to completion.
    let y = graph.id_of("y").unwrap();
    assert!(report.timings[y].is_some());

    // Skipped tasks never started.
    let b = graph.id_of("b").unwrap();
    assert!(report.timings[b].is_none());
    Ok(())
}

#[tokio::test]
async fn mid_graph_failure_keeps_completed_work() -> TestResult {
    let records = vec![
        TaskRecord::new("a", 1, &[]),
        TaskRecord::new("b", 1, &["a"]),
        TaskRecord::new("c", 1, &["b"]),
    ];
    let graph = build_valid(&records)?;

    let fail: HashSet<String> = ["b".to_string()].into();
    let report = run_with_failures(&graph, fail).await?;

    let a = graph.id_of("a").unwrap();
    assert!(report.timings[a].is_some());
    assert_eq!(report.failed.iter().collect::<Vec<_>>(), ["b"]);
    assert_eq!(report.skipped.iter().collect::<Vec<_>>(), ["c"]);
    Ok(())
}

#[tokio::test]
async fn single_task_run_reports_its_duration() -> TestResult {
    let records = vec![TaskRecord::new("only", 2, &[])];
    let graph = build_valid(&records)?;

    let report = execute(&graph, RunOptions { time_unit: UNIT }).await?;

    assert!(report.actual_makespan >= UNIT * 2);
    let timing = report.timings[0].ok_or("task never started")?;
    assert!(timing.finish >= timing.start);
    Ok(())
}
