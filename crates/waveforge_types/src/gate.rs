//! Gate Verdict — the output of any quality-gate evaluation.

use serde::{Deserialize, Serialize};

/// Final-review verdict label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalVerdict {
    Ship,
    Revise,
    Rethink,
}

impl FinalVerdict {
    /// Derive the verdict label from an aggregate score, per §4.6's
    /// thresholds: `ship` >= 85, `revise` in [60, 85), `rethink` < 60.
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            FinalVerdict::Ship
        } else if score >= 60.0 {
            FinalVerdict::Revise
        } else {
            FinalVerdict::Rethink
        }
    }
}

/// The output of any gate evaluation: a pass/fail verdict, a 0-100 score,
/// and human-readable issues/recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateVerdict {
    pub pass: bool,
    pub score: f64,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl GateVerdict {
    pub fn passing(score: f64) -> Self {
        Self {
            pass: true,
            score,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn failing(score: f64, issues: Vec<String>) -> Self {
        Self {
            pass: false,
            score,
            issues,
            recommendations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_thresholds_match_spec() {
        assert_eq!(FinalVerdict::from_score(85.0), FinalVerdict::Ship);
        assert_eq!(FinalVerdict::from_score(84.99), FinalVerdict::Revise);
        assert_eq!(FinalVerdict::from_score(60.0), FinalVerdict::Revise);
        assert_eq!(FinalVerdict::from_score(59.99), FinalVerdict::Rethink);
    }
}
