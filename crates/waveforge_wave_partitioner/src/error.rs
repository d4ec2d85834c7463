//! Errors raised while partitioning an intent graph into waves.

use thiserror::Error;
use waveforge_types::IntentId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartitionError {
    /// A dependency cycle was found. `intent` is one id on the cycle;
    /// `cycle` is the full path, starting and ending at `intent`.
    #[error("dependency cycle detected at intent {intent}: {cycle:?}")]
    DependencyCycle {
        intent: IntentId,
        cycle: Vec<IntentId>,
    },
}
