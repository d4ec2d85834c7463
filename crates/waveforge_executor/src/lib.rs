//! # Waveforge Executor
//!
//! The Wave Executor: a concurrent orchestrator that runs a [`Plan`] wave
//! by wave, dispatching intents through an [`ExecutionBackend`], applying
//! Gate 1 after each attempt, retrying and escalating failing intents up
//! the agent-quality ladder, applying Gate 2 after each wave, and Gate 3
//! once the session completes. See §4.7, §4.8, and §5 of the
//! specification.
//!
//! [`Plan`]: waveforge_types::Plan

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod event_sink;
pub mod executor;
pub mod result;

pub use backend::ExecutionBackend;
pub use config::ExecutorConfig;
pub use context::{CancellationHandle, DispatchContext};
pub use error::ExecutorError;
pub use event_sink::{EventSink, LoggingEventSink};
pub use executor::WaveExecutor;
pub use result::{ExecutionResult, IntentOutcome, IntentOutcomeRecord, WaveOutcome};

#[cfg(any(test, feature = "testing"))]
pub mod testing;
