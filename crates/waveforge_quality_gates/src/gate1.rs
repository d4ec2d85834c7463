//! Gate 1 — per-intent evaluation against profile-specific pass criteria.

use log::debug;

use waveforge_types::{AgentProfile, GateVerdict, IntentResult, IntentStatus};

/// A profile-aware evaluator for a single Intent Result. Exposed as a trait
/// so a deployment can substitute stricter or looser criteria without
/// touching the Wave Executor that calls it.
pub trait Gate1Evaluator {
    fn evaluate(&self, result: &IntentResult) -> GateVerdict;
}

/// The default evaluator, implementing the per-profile rule table from
/// §4.6 exactly.
#[derive(Debug, Clone, Default)]
pub struct DefaultGate1Evaluator;

impl Gate1Evaluator for DefaultGate1Evaluator {
    fn evaluate(&self, result: &IntentResult) -> GateVerdict {
        if result.status != IntentStatus::Completed {
            return GateVerdict::failing(
                0.0,
                vec![format!("intent status is {:?}, not completed", result.status)],
            );
        }

        let verdict = match result.profile {
            AgentProfile::BugInvestigator => evaluate_bug_investigator(result),
            AgentProfile::Implementer => evaluate_implementer(result),
            AgentProfile::TestEngineer => evaluate_test_engineer(result),
            AgentProfile::UnitTester => evaluate_unit_tester(result),
            AgentProfile::DocWriter => evaluate_doc_writer(result),
            AgentProfile::Planner => evaluate_planner(result),
            AgentProfile::Reviewer => evaluate_reviewer(result),
        };
        debug!(
            "gate 1 for {} ({}): pass={} score={:.1}",
            result.intent_id, result.profile, verdict.pass, verdict.score
        );
        verdict
    }
}

fn scaled_score(quality_score: f64) -> f64 {
    (quality_score * 100.0).clamp(0.0, 100.0)
}

fn evaluate_bug_investigator(result: &IntentResult) -> GateVerdict {
    let mut issues = Vec::new();
    if !result.tests_passed {
        issues.push("tests did not pass".to_string());
    }
    if result.quality_score <= 0.0 {
        issues.push("quality score must be greater than zero".to_string());
    }
    if result.artifacts.is_empty() {
        issues.push("no artifacts produced".to_string());
    }
    if issues.is_empty() {
        GateVerdict::passing(scaled_score(result.quality_score))
    } else {
        GateVerdict::failing(0.0, issues)
    }
}

fn evaluate_implementer(result: &IntentResult) -> GateVerdict {
    let mut issues = Vec::new();
    if !result.tests_passed {
        issues.push("tests did not pass".to_string());
    }
    if result.quality_score < 0.70 {
        issues.push("quality score below 0.70".to_string());
    }
    if result.artifacts.is_empty() {
        issues.push("no artifacts produced".to_string());
    }
    if issues.is_empty() {
        GateVerdict::passing(scaled_score(result.quality_score))
    } else {
        GateVerdict::failing(0.0, issues)
    }
}

fn evaluate_test_engineer(result: &IntentResult) -> GateVerdict {
    let mut issues = Vec::new();
    if !result.tests_passed {
        issues.push("tests did not pass".to_string());
    }
    if result.coverage_delta < 0.0 {
        issues.push("coverage regressed".to_string());
    }
    if result.quality_score < 0.70 {
        issues.push("quality score below 0.70".to_string());
    }
    if issues.is_empty() {
        GateVerdict::passing(scaled_score(result.quality_score))
    } else {
        GateVerdict::failing(0.0, issues)
    }
}

fn evaluate_unit_tester(result: &IntentResult) -> GateVerdict {
    let mut issues = Vec::new();
    if !result.tests_passed {
        issues.push("tests did not pass".to_string());
    }
    if result.coverage_delta <= 0.0 {
        issues.push("coverage did not improve".to_string());
    }
    if issues.is_empty() {
        GateVerdict::passing(scaled_score(result.quality_score))
    } else {
        GateVerdict::failing(0.0, issues)
    }
}

fn evaluate_doc_writer(result: &IntentResult) -> GateVerdict {
    let mut issues = Vec::new();
    if !result.has_documentation_artifact() {
        issues.push("no documentation artifact produced".to_string());
    }
    if result.quality_score < 0.60 {
        issues.push("quality score below 0.60".to_string());
    }
    if issues.is_empty() {
        GateVerdict::passing(scaled_score(result.quality_score))
    } else {
        GateVerdict::failing(0.0, issues)
    }
}

fn evaluate_planner(result: &IntentResult) -> GateVerdict {
    let mut issues = Vec::new();
    if !result.has_planning_artifact() {
        issues.push("no planning artifact produced".to_string());
    }
    if result.quality_score < 0.70 {
        issues.push("quality score below 0.70".to_string());
    }
    if issues.is_empty() {
        GateVerdict::passing(scaled_score(result.quality_score))
    } else {
        GateVerdict::failing(0.0, issues)
    }
}

fn evaluate_reviewer(result: &IntentResult) -> GateVerdict {
    if result.quality_score >= 0.80 {
        GateVerdict::passing(scaled_score(result.quality_score))
    } else if result.quality_score >= 0.60 {
        let mut verdict = GateVerdict::passing(scaled_score(result.quality_score) * 0.75);
        verdict
            .recommendations
            .push("partial pass: quality below the full-pass threshold of 0.80".to_string());
        verdict
    } else {
        GateVerdict::failing(0.0, vec!["quality score below 0.60".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(profile: AgentProfile) -> IntentResult {
        IntentResult {
            intent_id: "i1".to_string(),
            profile,
            agent: "a".to_string(),
            status: IntentStatus::Completed,
            quality_score: 0.9,
            tests_passed: true,
            coverage_delta: 0.1,
            artifacts: vec!["src/lib.rs".to_string()],
            error: None,
            attempt: 1,
        }
    }

    #[test]
    fn non_completed_status_always_scores_zero() {
        let mut result = base(AgentProfile::Implementer);
        result.status = IntentStatus::Failed;
        let verdict = DefaultGate1Evaluator.evaluate(&result);
        assert!(!verdict.pass);
        assert_eq!(verdict.score, 0.0);
        assert!(!verdict.issues.is_empty());
    }

    #[test]
    fn implementer_requires_artifact_and_quality_floor() {
        let mut result = base(AgentProfile::Implementer);
        result.artifacts.clear();
        let verdict = DefaultGate1Evaluator.evaluate(&result);
        assert!(!verdict.pass);
    }

    #[test]
    fn doc_writer_requires_documentation_suffix() {
        let mut result = base(AgentProfile::DocWriter);
        result.artifacts = vec!["src/lib.rs".to_string()];
        let verdict = DefaultGate1Evaluator.evaluate(&result);
        assert!(!verdict.pass);

        result.artifacts = vec!["docs/guide.md".to_string()];
        let verdict = DefaultGate1Evaluator.evaluate(&result);
        assert!(verdict.pass);
    }

    #[test]
    fn reviewer_partial_pass_reduces_score() {
        let mut result = base(AgentProfile::Reviewer);
        result.quality_score = 0.65;
        let verdict = DefaultGate1Evaluator.evaluate(&result);
        assert!(verdict.pass);
        assert!(verdict.score < 65.0);
    }

    #[test]
    fn reviewer_below_sixty_fails() {
        let mut result = base(AgentProfile::Reviewer);
        result.quality_score = 0.5;
        let verdict = DefaultGate1Evaluator.evaluate(&result);
        assert!(!verdict.pass);
    }

    #[test]
    fn unit_tester_requires_positive_coverage_delta() {
        let mut result = base(AgentProfile::UnitTester);
        result.coverage_delta = 0.0;
        let verdict = DefaultGate1Evaluator.evaluate(&result);
        assert!(!verdict.pass);
    }
}
