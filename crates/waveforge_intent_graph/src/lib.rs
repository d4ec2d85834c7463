//! # Waveforge Intent Graph
//!
//! Holds the validated intent backlog for a single planning session and
//! exposes dependency lookups the Wave Partitioner and Assignment Solver
//! build on. See §4.2 of the specification.

pub mod error;
pub mod graph;

pub use error::GraphError;
pub use graph::IntentGraph;
