//! Errors raised while solving for an assignment.

use thiserror::Error;
use waveforge_cost_model::CostModelError;
use waveforge_types::IntentId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// No registered agent meets these intents' quality floor and
    /// complexity capability. Every offending intent in the backlog is
    /// reported at once rather than stopping at the first, so the registry
    /// or backlog can be fixed in a single pass.
    #[error("{} intent(s) have no agent meeting their quality floor and capability requirements: {intents:?}", intents.len())]
    Infeasible { intents: Vec<IntentId> },

    /// At least one eligible agent exists for each of these intents, but
    /// every one of them is already at capacity by the time the greedy
    /// pass reaches it — §4.2's "aggregate capacity < intent count" failure
    /// mode. Every intent still unplaceable once capacity runs out is
    /// reported, not just the first, mirroring `Infeasible`.
    #[error("{} intent(s) could not be placed: all eligible agents are at capacity: {intents:?}", intents.len())]
    CapacityExhausted { intents: Vec<IntentId> },

    /// The configured cost weights themselves are invalid (e.g. negative),
    /// a fatal configuration error caught before any cost computation runs.
    #[error(transparent)]
    InvalidWeights(#[from] CostModelError),
}
