//! # Waveforge Wave Partitioner
//!
//! Splits a validated intent graph into dependency-respecting parallel
//! waves using a breadth-first topological sort (Kahn's algorithm). See
//! §4.3 of the specification.

pub mod error;
pub mod partitioner;

pub use error::PartitionError;
pub use partitioner::partition;
