//! Gate 2 — per-wave aggregation over a completed wave's Gate 1 verdicts.

use log::debug;

use waveforge_types::{GateVerdict, IntentResult, IntentStatus};

use crate::gate1::{DefaultGate1Evaluator, Gate1Evaluator};

pub trait Gate2Evaluator {
    fn evaluate(&self, results: &[IntentResult], min_quality: f64) -> GateVerdict;
}

/// The default evaluator: pass requires every intent completed, every
/// quality score at or above the threshold, and every tests-passed flag
/// true. Score is the arithmetic mean of the wave's Gate 1 scores.
#[derive(Debug, Clone, Default)]
pub struct DefaultGate2Evaluator {
    gate1: DefaultGate1Evaluator,
}

impl Gate2Evaluator for DefaultGate2Evaluator {
    fn evaluate(&self, results: &[IntentResult], min_quality: f64) -> GateVerdict {
        if results.is_empty() {
            return GateVerdict::passing(100.0);
        }

        let scores: Vec<f64> = results.iter().map(|r| self.gate1.evaluate(r).score).collect();
        let mean_score = scores.iter().sum::<f64>() / scores.len() as f64;

        let mut issues = Vec::new();
        for result in results {
            if result.status != IntentStatus::Completed {
                issues.push(format!("{}: status is {:?}", result.intent_id, result.status));
            }
            if result.quality_score < min_quality {
                issues.push(format!(
                    "{}: quality {:.2} below wave threshold {:.2}",
                    result.intent_id, result.quality_score, min_quality
                ));
            }
            if !result.tests_passed {
                issues.push(format!("{}: tests did not pass", result.intent_id));
            }
        }

        let pass = issues.is_empty();
        debug!(
            "gate 2 over {} intent(s): pass={} mean_score={:.1}",
            results.len(),
            pass,
            mean_score
        );

        GateVerdict {
            pass,
            score: mean_score,
            issues,
            recommendations: Vec::new(),
        }
    }
}
