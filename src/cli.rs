// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskrun",
    version,
    about = "Schedule and run tasks in parallel according to their dependencies.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task manifest (TOML).
    #[arg(value_name = "TASK_FILE")]
    pub task_file: String,

    /// Validate the task list and print the execution plan without running.
    #[arg(long)]
    pub validate: bool,

    /// Run the tasks and report actual vs expected runtime.
    #[arg(long)]
    pub run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
