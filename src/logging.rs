// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Level selection: the `--log-level` flag wins, then the `TASKRUN_LOG`
//! environment variable, then `info`.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = cli_level.map(Level::from).unwrap_or_else(|| {
        std::env::var("TASKRUN_LOG")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(Level::INFO)
    });

    fmt().with_max_level(level).with_target(true).init();

    Ok(())
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
