// src/errors.rs

//! Structured errors for the graph layer.
//!
//! Structural problems in the input (duplicate names, negative durations)
//! abort before any graph analysis. Missing dependencies and cycles are
//! *not* errors at this level; the validator collects them as
//! [`crate::graph::Violation`]s so the caller can display all of them at
//! once.

use thiserror::Error;

/// Fatal problems with the task collection itself, detected while building
/// the graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("duplicate task name '{name}'")]
    DuplicateTask { name: String },

    #[error("task '{task}' has a negative duration ({duration}s)")]
    InvalidDuration { task: String, duration: i64 },
}
