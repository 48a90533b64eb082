// src/input/loader.rs

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::input::model::{TaskFile, TaskRecord};

/// Load a task manifest from a given path and return the raw `TaskFile`.
///
/// This only performs TOML deserialization; it does **not** check graph
/// invariants (unique names, dependency resolution, acyclicity). Those are
/// the graph builder's and validator's job.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<TaskFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading task manifest at {:?}", path))?;

    let manifest: TaskFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML manifest from {:?}", path))?;

    Ok(manifest)
}

/// Load a manifest and return its task records in declaration order.
///
/// This is the recommended entry point for the rest of the application.
/// An empty manifest is rejected here: a scheduler run over zero tasks is
/// almost certainly a user mistake (wrong file, wrong section name).
pub fn load_tasks(path: impl AsRef<Path>) -> Result<Vec<TaskRecord>> {
    let manifest = load_from_path(&path)?;
    if manifest.tasks.is_empty() {
        return Err(anyhow!(
            "no tasks found in {:?} (expected at least one [[task]] entry)",
            path.as_ref()
        ));
    }
    Ok(manifest.tasks)
}
