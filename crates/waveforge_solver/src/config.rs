//! Solver configuration: weight knobs, a wall-clock time budget, and the
//! exhaustive-search node cap.

use std::time::Duration;

use waveforge_cost_model::CostWeights;

/// Inputs to [`crate::solve`] beyond the intents, registry and waves
/// themselves. See §4.2 and §6 of the specification.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub weights: CostWeights,
    /// Wall-clock budget for the branch-and-bound refinement pass. The
    /// greedy baseline always completes regardless of this budget.
    ///
    /// §4.2 requires the solver to be deterministic given identical inputs
    /// and a fixed seed; that guarantee holds for the refinement pass only
    /// when `max_nodes`, not this wall-clock budget, is the constraint that
    /// actually cuts the search off. If the search is still running when
    /// `time_budget` elapses first, the cutoff point — and so the returned
    /// assignment — depends on real elapsed time (machine load, scheduling
    /// jitter), matching §4.2's "time-budget-exhausted" outcome
    /// (`proven_optimal = false`) rather than the determinism guarantee.
    /// Deployments that need reproducible refinement results across runs
    /// should set `max_nodes` low enough to bind before `time_budget` does.
    pub time_budget: Duration,
    /// Seed reserved for an admissible randomized backend (e.g. simulated
    /// annealing); unused by the deterministic greedy/branch-and-bound
    /// algorithms implemented here.
    pub random_seed: u64,
    /// Upper bound on DFS nodes explored during refinement, independent of
    /// the time budget. The sole deterministic cutoff: identical inputs and
    /// `max_nodes` always explore the same nodes in the same order.
    pub max_nodes: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            weights: CostWeights::default(),
            time_budget: Duration::from_millis(500),
            random_seed: 0,
            max_nodes: 50_000,
        }
    }
}
