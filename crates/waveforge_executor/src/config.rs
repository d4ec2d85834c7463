//! Wave Executor configuration, validated at construction time.

use std::time::Duration;

use crate::error::ExecutorError;

/// Configuration for a single execution session. Validated once at
/// construction rather than re-checked on every call, matching the
/// teacher's `RegistryConfig`/`PlanningConfig` pattern of plain structs
/// built through a fallible constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorConfig {
    /// Maximum number of intents dispatched concurrently, across the whole
    /// session, not just within one wave.
    pub max_workers: u32,
    /// Hard cap on attempts per intent; the retry/escalation ladder itself
    /// recommends human review by attempt 3, so this rarely binds.
    pub max_retries: u32,
    /// Minimum per-intent quality score Gate 2 requires for a wave to pass.
    pub min_wave_quality: f64,
    /// Wall-clock budget for the whole session.
    pub session_timeout: Duration,
    /// When true, a failing Gate 2 verdict aborts the session instead of
    /// merely being recorded in the Execution Result — a deployment
    /// policy choice left open by §9.
    pub gate2_strict: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_workers: 8,
            max_retries: 4,
            min_wave_quality: 0.70,
            session_timeout: Duration::from_secs(3600),
            gate2_strict: false,
        }
    }
}

impl ExecutorConfig {
    pub fn validate(&self) -> Result<(), ExecutorError> {
        if self.max_workers == 0 {
            return Err(ExecutorError::InvalidMaxWorkers);
        }
        if self.max_retries == 0 {
            return Err(ExecutorError::InvalidMaxRetries);
        }
        if !(0.0..=1.0).contains(&self.min_wave_quality) {
            return Err(ExecutorError::InvalidMinWaveQuality(self.min_wave_quality));
        }
        Ok(())
    }
}
