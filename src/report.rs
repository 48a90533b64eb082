// src/report.rs

//! Plain-text presentation of plans, violations and run results.

use crate::graph::{TaskGraph, Violation};
use crate::plan::Plan;
use crate::engine::RunReport;

/// Print the execution plan: expected makespan plus the topological order
/// with per-task durations, earliest start times and dependencies.
pub fn print_plan(graph: &TaskGraph, plan: &Plan) {
    println!("Expected total runtime: {} seconds", plan.expected_makespan);
    println!("Execution order:");

    for (i, &id) in plan.order.iter().enumerate() {
        let node = graph.node(id);
        let entry = plan.entries[id];
        let deps = if node.deps.is_empty() {
            "none".to_string()
        } else {
            node.deps
                .iter()
                .map(|&dep| graph.node(dep).name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{}. {} (duration: {}s, earliest start: {}s, dependencies: {})",
            i + 1,
            node.name,
            node.duration,
            entry.earliest_start,
            deps
        );
    }
}

/// Print every validation problem, one per line.
pub fn print_violations(violations: &[Violation]) {
    println!("Task validation failed:");
    for violation in violations {
        println!("  - {violation}");
    }
}

/// Print execution results: expected vs actual makespan plus per-task
/// expected vs actual durations.
///
/// Durations are printed in seconds assuming the default one-second time
/// unit, which is what the CLI runs with.
pub fn print_results(graph: &TaskGraph, plan: &Plan, report: &RunReport) {
    let expected = plan.expected_makespan as f64;
    let actual = report.actual_makespan.as_secs_f64();

    println!("Execution results:");
    println!("Expected runtime: {expected:.2} seconds");
    println!("Actual runtime: {actual:.2} seconds");
    println!("Difference: {:+.2} seconds", actual - expected);

    println!("Task execution details:");
    for &id in &plan.order {
        let node = graph.node(id);
        match report.timings[id] {
            Some(timing) => {
                let actual_duration = (timing.finish - timing.start).as_secs_f64();
                let diff = actual_duration - node.duration as f64;
                println!(
                    "{}: expected {}s, actual {actual_duration:.2}s, diff {diff:+.2}s",
                    node.name, node.duration
                );
            }
            None => println!("{}: not started", node.name),
        }
    }

    if !report.failed.is_empty() {
        let failed: Vec<&str> = report.failed.iter().map(String::as_str).collect();
        println!("Failed tasks: {}", failed.join(", "));
    }
    if !report.skipped.is_empty() {
        let skipped: Vec<&str> = report.skipped.iter().map(String::as_str).collect();
        println!("Skipped tasks (upstream failure): {}", skipped.join(", "));
    }
}
