//! Errors raised by the cost model.

use thiserror::Error;

/// Errors raised while computing assignment cost.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostModelError {
    /// The (intent, agent) pair is infeasible: the agent's quality is below
    /// the intent's floor, or its capability set doesn't cover the
    /// intent's complexity tier. Per §4.1, this is signalled as a
    /// structured error rather than a numeric sentinel.
    #[error("agent {agent} cannot serve intent {intent}: {reason}")]
    Infeasible {
        intent: String,
        agent: String,
        reason: String,
    },

    #[error("weight {name} must be non-negative, got {value}")]
    NegativeWeight { name: &'static str, value: f64 },
}
