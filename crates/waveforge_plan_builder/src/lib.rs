//! # Waveforge Plan Builder
//!
//! Combines the Wave Partitioner, Profile Router, and Assignment Solver
//! into a single serializable [`waveforge_types::Plan`]. See §4.5 of the
//! specification.

pub mod builder;
pub mod critical_path;
pub mod error;

pub use builder::build_plan;
pub use error::PlanBuilderError;
