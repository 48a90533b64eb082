// src/lib.rs

pub mod cli;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod graph;
pub mod input;
pub mod logging;
pub mod plan;
pub mod report;

use anyhow::{bail, Result};
use tracing::debug;

use crate::cli::CliArgs;
use crate::engine::RunOptions;
use crate::graph::{validate, TaskGraph, Validation};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - manifest loading
/// - graph building + validation
/// - critical-path planning
/// - (with `--run`) concurrent execution and the results report
pub async fn run(args: CliArgs) -> Result<()> {
    let records = input::load_tasks(&args.task_file)?;
    debug!(count = records.len(), "loaded task records");

    let graph = TaskGraph::build(&records)?;

    let order = match validate(&graph) {
        Validation::Valid { order } => order,
        Validation::Invalid { violations } => {
            report::print_violations(&violations);
            bail!("task validation failed with {} problem(s)", violations.len());
        }
    };

    let plan = plan::critical_path(&graph, &order);
    report::print_plan(&graph, &plan);

    if args.validate {
        return Ok(());
    }

    if args.run {
        println!();
        println!("Starting execution...");
        let outcome = engine::execute(&graph, RunOptions::default()).await?;
        println!();
        report::print_results(&graph, &plan, &outcome);

        if !outcome.failed.is_empty() {
            bail!("{} task(s) failed", outcome.failed.len());
        }
        return Ok(());
    }

    println!();
    println!("Use --run to execute tasks or --validate to just validate");
    Ok(())
}
