//! # Waveforge Assignment Solver
//!
//! Produces an [`waveforge_types::Assignment`] binding every intent to a
//! concrete agent, minimizing the global cost objective under the hard
//! constraints from §3 and §4.2 of the specification: one agent per
//! intent, capability coverage, quality floor, and per-agent capacity.

pub mod config;
pub mod error;
pub mod report;
pub mod solver;

pub use config::SolverConfig;
pub use error::SolverError;
pub use report::SolverReport;
pub use solver::solve;
