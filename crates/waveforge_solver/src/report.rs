//! Solver report: what the solver achieved and how hard it tried.

use std::time::Duration;

/// Diagnostic output accompanying a solved [`waveforge_types::Assignment`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolverReport {
    pub objective_value: f64,
    pub wall_time: Duration,
    /// True only when the branch-and-bound refinement pass exhausted the
    /// full search space within its time and node budgets. False means the
    /// returned assignment is feasible and at least as good as the greedy
    /// baseline, but optimality is not guaranteed.
    pub proven_optimal: bool,
    pub nodes_explored: u64,
}
