//! Gate 3 — final review over every Intent Result from every wave.

use log::info;

use waveforge_types::{AgentProfile, FinalVerdict, IntentResult};

/// The three weighted sub-scores behind a Gate 3 aggregate, plus the
/// resulting verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalReview {
    pub verdict: FinalVerdict,
    pub aggregate_score: f64,
    pub production_fitness: f64,
    pub architectural_coherence: f64,
    pub documentation_coverage: f64,
}

pub trait Gate3Evaluator {
    fn evaluate(&self, results: &[IntentResult]) -> FinalReview;
}

#[derive(Debug, Clone, Default)]
pub struct DefaultGate3Evaluator;

const PRODUCTION_FITNESS_WEIGHT: f64 = 0.50;
const ARCHITECTURAL_COHERENCE_WEIGHT: f64 = 0.30;
const DOCUMENTATION_COVERAGE_WEIGHT: f64 = 0.20;

fn production_fitness(results: &[IntentResult]) -> f64 {
    let total: f64 = results
        .iter()
        .map(|r| {
            let penalty = if r.tests_passed { 1.0 } else { 0.5 };
            r.quality_score * penalty
        })
        .sum();
    (total / results.len() as f64 * 100.0).clamp(0.0, 100.0)
}

fn architectural_coherence(results: &[IntentResult]) -> f64 {
    let n = results.len() as f64;
    let mean = results.iter().map(|r| r.quality_score).sum::<f64>() / n;
    let variance = results.iter().map(|r| (r.quality_score - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    (100.0 * (1.0 - std_dev)).clamp(0.0, 100.0)
}

fn documentation_coverage(results: &[IntentResult]) -> f64 {
    let n = results.len() as f64;
    let fraction_with_doc_artifact =
        results.iter().filter(|r| r.has_documentation_artifact()).count() as f64 / n;

    let doc_writer_scores: Vec<f64> = results
        .iter()
        .filter(|r| r.profile == AgentProfile::DocWriter)
        .map(|r| r.quality_score)
        .collect();

    if doc_writer_scores.is_empty() {
        return (fraction_with_doc_artifact * 100.0).clamp(0.0, 100.0);
    }

    let mean_doc_writer_quality = doc_writer_scores.iter().sum::<f64>() / doc_writer_scores.len() as f64;
    (((fraction_with_doc_artifact + mean_doc_writer_quality) / 2.0) * 100.0).clamp(0.0, 100.0)
}

impl Gate3Evaluator for DefaultGate3Evaluator {
    fn evaluate(&self, results: &[IntentResult]) -> FinalReview {
        if results.is_empty() {
            info!("gate 3: no intent results to review, defaulting to ship");
            return FinalReview {
                verdict: FinalVerdict::Ship,
                aggregate_score: 100.0,
                production_fitness: 100.0,
                architectural_coherence: 100.0,
                documentation_coverage: 100.0,
            };
        }

        let production_fitness = production_fitness(results);
        let architectural_coherence = architectural_coherence(results);
        let documentation_coverage = documentation_coverage(results);

        let aggregate_score = (PRODUCTION_FITNESS_WEIGHT * production_fitness
            + ARCHITECTURAL_COHERENCE_WEIGHT * architectural_coherence
            + DOCUMENTATION_COVERAGE_WEIGHT * documentation_coverage)
            .clamp(0.0, 100.0);
        let verdict = FinalVerdict::from_score(aggregate_score);

        info!(
            "gate 3 over {} intent(s): verdict={:?} aggregate={:.1}",
            results.len(),
            verdict,
            aggregate_score
        );

        FinalReview {
            verdict,
            aggregate_score,
            production_fitness,
            architectural_coherence,
            documentation_coverage,
        }
    }
}
