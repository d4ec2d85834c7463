//! Errors raised while constructing or querying an intent graph.

use thiserror::Error;
use waveforge_types::{IntentId, TypesError};

/// Fatal, session-level errors raised before any planning work begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("duplicate intent id: {0}")]
    DuplicateIntentId(IntentId),

    #[error("intent {intent} depends on unknown intent {dependency}")]
    DanglingDependency {
        intent: IntentId,
        dependency: IntentId,
    },

    #[error(transparent)]
    InvalidIntent(#[from] TypesError),
}
