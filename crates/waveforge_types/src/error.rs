//! Validation errors for the shared data model.

use thiserror::Error;

use crate::intent::IntentId;

/// Errors raised while constructing or validating shared data-model types.
#[derive(Error, Debug)]
pub enum TypesError {
    #[error("intent {0} has an empty identifier")]
    EmptyIntentId(IntentId),

    #[error("intent {0} has an invalid quality floor {1} (must be in [0,1])")]
    InvalidQualityFloor(IntentId, f64),

    #[error("intent {0} has a non-positive estimated token count {1}")]
    InvalidTokenEstimate(IntentId, i64),

    #[error("intent {0} depends on itself")]
    SelfDependency(IntentId),

    #[error("agent {0} has an invalid quality score {1} (must be in [0,1])")]
    InvalidAgentQuality(String, f64),

    #[error("agent {0} has a non-positive capacity {1}")]
    InvalidAgentCapacity(String, i64),

    #[error("agent {0} has a negative token rate {1}")]
    InvalidTokenRate(String, f64),
}
