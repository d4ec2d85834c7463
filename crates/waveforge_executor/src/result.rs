//! The Execution Result: what a Wave Executor session produced. Always a
//! complete, structured record — §7 requires that an aborted session
//! "always returns a complete Execution Result structure describing what
//! happened", never an unstructured error.

use waveforge_quality_gates::FinalReview;
use waveforge_types::{GateVerdict, IntentId, IntentResult};

/// Terminal state of one intent from the executor's point of view. Only
/// `Passed` and `HumanReview` are reachable terminals per §4.7's state
/// machine; `NotDispatched` covers an intent in a wave that was never
/// attempted because the session was cancelled or aborted first.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    Passed {
        result: IntentResult,
        verdict: GateVerdict,
    },
    HumanReview {
        /// The last attempt's Intent Result, carried so Gate 2 still sees a
        /// complete per-intent record for this wave instead of a gap.
        result: IntentResult,
        attempts: u32,
        last_error: Option<String>,
    },
    NotDispatched,
}

impl IntentOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, IntentOutcome::Passed { .. })
    }

    pub fn is_human_review(&self) -> bool {
        matches!(self, IntentOutcome::HumanReview { .. })
    }
}

/// One intent's outcome, paired with its id for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentOutcomeRecord {
    pub intent_id: IntentId,
    pub outcome: IntentOutcome,
}

/// The outcome of one completed (or aborted) wave.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveOutcome {
    pub wave: usize,
    pub gate2: GateVerdict,
    pub intents: Vec<IntentOutcomeRecord>,
}

/// Everything the Wave Executor produced for a session: every wave's
/// outcome, the final review (best-effort over whatever results exist),
/// and the summary counts callers need without re-walking the wave list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub waves: Vec<WaveOutcome>,
    pub final_review: Option<FinalReview>,
    pub passed: usize,
    pub failed: usize,
    pub human_review: usize,
    /// Set when a cancellation signal was observed before every wave ran.
    pub cancelled: bool,
    /// Set when the session ended before producing a result for every
    /// intent in the plan — cancellation, a session timeout, or a strict
    /// Gate 2 failure aborting the run.
    pub incomplete: bool,
}

impl ExecutionResult {
    pub fn empty() -> Self {
        Self {
            waves: Vec::new(),
            final_review: None,
            passed: 0,
            failed: 0,
            human_review: 0,
            cancelled: false,
            incomplete: false,
        }
    }

    /// All intent results that reached a passing verdict, across every
    /// wave, in wave order — the input Gate 3 evaluates over.
    pub fn passed_results(&self) -> Vec<&IntentResult> {
        self.waves
            .iter()
            .flat_map(|w| &w.intents)
            .filter_map(|record| match &record.outcome {
                IntentOutcome::Passed { result, .. } => Some(result),
                _ => None,
            })
            .collect()
    }
}
