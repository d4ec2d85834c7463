//! # Waveforge Agent Registry
//!
//! A static, immutable agent pool built once at session start and queried
//! by the Assignment Solver and Profile Router for the remainder of a
//! planning session.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{AgentRegistry, RegistryBuilder};
