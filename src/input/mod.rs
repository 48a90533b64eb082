// src/input/mod.rs

//! Task manifest loading.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a manifest file from disk (`loader.rs`).
//!
//! The core engine never touches files; it receives the ordered
//! [`TaskRecord`]s produced here.

pub mod loader;
pub mod model;

pub use loader::{load_from_path, load_tasks};
pub use model::{TaskFile, TaskRecord};
