// src/exec/mod.rs

//! Task execution layer.
//!
//! "Running" a task means occupying a concurrency slot for its declared
//! duration, standing in for real work. Each released task gets its own
//! Tokio task, so independent tasks advance concurrently; completion is
//! reported back to the engine as a `RunEvent`.

pub mod worker;

pub use worker::spawn_executor;
