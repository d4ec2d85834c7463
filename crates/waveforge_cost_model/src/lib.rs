//! # Waveforge Cost Model
//!
//! Computes per-assignment cost for a single (intent, agent) pair, and the
//! global objective over a full candidate assignment. See §4.1 of the
//! specification for the four additive terms and the context-affinity
//! bonus this crate implements.

pub mod error;
pub mod model;
pub mod weights;

pub use error::CostModelError;
pub use model::{global_objective, pair_cost, AssignmentContext};
pub use weights::CostWeights;
