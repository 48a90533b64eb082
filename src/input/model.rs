// src/input/model.rs

use serde::Deserialize;

/// Top-level manifest as read from a TOML file.
///
/// Tasks are declared as an array of tables, which keeps their declaration
/// order — the validator uses that order to break ties deterministically:
///
/// ```toml
/// [[task]]
/// name = "build"
/// duration = 2
///
/// [[task]]
/// name = "test"
/// duration = 5
/// after = ["build"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    /// All tasks from `[[task]]` entries, in declaration order.
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskRecord>,
}

/// One `[[task]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskRecord {
    /// Unique task name.
    pub name: String,

    /// Declared duration in whole seconds.
    ///
    /// Kept signed so that a negative value survives deserialization and is
    /// rejected by the graph builder with a proper error instead of a serde
    /// range message.
    pub duration: i64,

    /// Dependency list: this task waits for all tasks listed here.
    #[serde(default)]
    pub after: Vec<String>,
}

impl TaskRecord {
    /// Convenience constructor, mostly for tests and embedding callers.
    pub fn new(name: impl Into<String>, duration: i64, after: &[&str]) -> Self {
        Self {
            name: name.into(),
            duration,
            after: after.iter().map(|s| s.to_string()).collect(),
        }
    }
}
