//! Agent profile — a closed enumeration of the seven routing roles.

use serde::{Deserialize, Serialize};

/// One of the seven roles an intent may be routed to before binding to a
/// concrete agent. Profiles do not name specific agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentProfile {
    Implementer,
    UnitTester,
    TestEngineer,
    DocWriter,
    Reviewer,
    BugInvestigator,
    Planner,
}

impl AgentProfile {
    /// All seven profiles, in the declared priority order used by the
    /// Profile Router's rule table.
    pub const ALL: [AgentProfile; 7] = [
        AgentProfile::Reviewer,
        AgentProfile::BugInvestigator,
        AgentProfile::UnitTester,
        AgentProfile::TestEngineer,
        AgentProfile::DocWriter,
        AgentProfile::Planner,
        AgentProfile::Implementer,
    ];

    /// The model families allowed to serve this profile, per §3's "each
    /// profile lists the set of model families that may serve it."
    /// `"local-7b"` is carried by every profile as the universal local/dev
    /// fallback family; beyond that, profiles needing code production or
    /// broad reasoning draw from wider or more specialized family sets.
    pub fn model_families(&self) -> &'static [&'static str] {
        match self {
            AgentProfile::Implementer => &["local-7b", "coder", "general"],
            AgentProfile::UnitTester => &["local-7b", "coder", "general"],
            AgentProfile::TestEngineer => &["local-7b", "coder", "general"],
            AgentProfile::DocWriter => &["local-7b", "writer", "general"],
            AgentProfile::Reviewer => &["local-7b", "general", "frontier"],
            AgentProfile::BugInvestigator => &["local-7b", "coder", "general", "frontier"],
            AgentProfile::Planner => &["local-7b", "general", "frontier"],
        }
    }

    /// Whether an agent tagged with `model_family` is eligible to serve this
    /// profile.
    pub fn serves_model_family(&self, model_family: &str) -> bool {
        self.model_families().contains(&model_family)
    }

    /// Slug used in plan serialization and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentProfile::Implementer => "implementer",
            AgentProfile::UnitTester => "unit-tester",
            AgentProfile::TestEngineer => "test-engineer",
            AgentProfile::DocWriter => "doc-writer",
            AgentProfile::Reviewer => "reviewer",
            AgentProfile::BugInvestigator => "bug-investigator",
            AgentProfile::Planner => "planner",
        }
    }
}

impl std::fmt::Display for AgentProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
