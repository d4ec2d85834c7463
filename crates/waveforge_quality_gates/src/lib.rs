//! # Waveforge Quality Gates
//!
//! Per-intent (Gate 1), per-wave (Gate 2), and final-review (Gate 3)
//! evaluators, plus the retry/escalation recommender. See §4.6 of the
//! specification.

pub mod gate1;
pub mod gate2;
pub mod gate3;
pub mod retry;

pub use gate1::{DefaultGate1Evaluator, Gate1Evaluator};
pub use gate2::{DefaultGate2Evaluator, Gate2Evaluator};
pub use gate3::{DefaultGate3Evaluator, FinalReview, Gate3Evaluator};
pub use retry::{recommend, RetryAction};
