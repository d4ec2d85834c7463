//! Intent Result — produced by the Execution Backend for one attempt.

use serde::{Deserialize, Serialize};

use crate::agent::AgentName;
use crate::intent::IntentId;
use crate::profile::AgentProfile;

/// Status of a single execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntentStatus {
    Completed,
    Failed,
    InProgress,
}

/// The result of one Execution Backend attempt for an intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent_id: IntentId,
    pub profile: AgentProfile,
    pub agent: AgentName,
    pub status: IntentStatus,
    pub quality_score: f64,
    pub tests_passed: bool,
    pub coverage_delta: f64,
    pub artifacts: Vec<String>,
    pub error: Option<String>,
    /// Attempt number, starting at 1.
    pub attempt: u32,
}

impl IntentResult {
    /// Whether any produced artifact reference ends with a documentation
    /// file suffix, per Gate 1's doc-writer rule.
    pub fn has_documentation_artifact(&self) -> bool {
        const DOC_SUFFIXES: &[&str] = &[".md", ".rst", ".txt", ".adoc", ".html", ".pdf"];
        self.artifacts
            .iter()
            .any(|a| DOC_SUFFIXES.iter().any(|suffix| a.ends_with(suffix)))
    }

    /// Whether any produced artifact reference names a planning deliverable,
    /// per Gate 1's planner rule.
    pub fn has_planning_artifact(&self) -> bool {
        const PLAN_KEYWORDS: &[&str] =
            &["plan", "design", "architecture", "roadmap", "proposal"];
        self.artifacts.iter().any(|a| {
            let lower = a.to_lowercase();
            PLAN_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
    }
}
