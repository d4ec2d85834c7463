//! Errors surfaced by the Plan Builder, wrapping each upstream component's
//! own error type so callers see exactly which stage failed.

use thiserror::Error;

use waveforge_intent_graph::GraphError;
use waveforge_solver::SolverError;
use waveforge_wave_partitioner::PartitionError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanBuilderError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}
