// src/graph/mod.rs

//! Dependency-graph construction and validation.
//!
//! - [`builder`] turns task records into a dense, index-based graph.
//! - [`validate`] checks reference integrity and acyclicity, producing a
//!   topological order for well-formed graphs.

pub mod builder;
pub mod validate;

pub use builder::{TaskGraph, TaskId, TaskNode};
pub use validate::{validate, Validation, Violation};
