//! Errors raised while constructing or running the Wave Executor.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutorError {
    #[error("max_workers must be at least 1")]
    InvalidMaxWorkers,

    #[error("max_retries must be at least 1")]
    InvalidMaxRetries,

    #[error("min_wave_quality must be in [0, 1], got {0}")]
    InvalidMinWaveQuality(f64),
}
