//! Errors raised while building or querying an agent registry.

use thiserror::Error;
use waveforge_types::{AgentName, TypesError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("agent {0} already registered")]
    DuplicateAgent(AgentName),

    #[error("agent {0} not found in registry")]
    AgentNotFound(AgentName),

    #[error("registry has no agents")]
    EmptyRegistry,

    #[error(transparent)]
    InvalidAgent(#[from] TypesError),
}
