//! Agent representation — a worker that serves intents.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::complexity::Complexity;
use crate::error::TypesError;
use crate::TypesResult;

/// Stable name identifying an agent within the registry.
pub type AgentName = String;

/// A worker in the agent pool. Built once at session start from a static
/// configuration and immutable for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Stable name, unique within the registry.
    pub name: AgentName,
    /// Model-family tag (e.g. `"opus"`, `"local-7b"`).
    pub model_family: String,
    /// Quality score in [0,1].
    pub quality: f64,
    /// Cost per estimated token. Zero marks a local/free agent.
    pub token_rate: f64,
    /// Complexity tiers this agent may serve, expressed as their string form
    /// so capability sets can be configured without recompiling.
    pub capabilities: HashSet<String>,
    /// Maximum number of concurrent intents this agent may serve.
    pub capacity: u32,
    /// Latency score, non-negative, lower is faster.
    pub latency: f64,
    /// Whether the agent runs locally (vs. remote/paid).
    pub is_local: bool,
    /// Convenience display name for logs and error messages; defaults to
    /// `name` when not set by the caller.
    pub display_name: Option<String>,
}

impl Agent {
    /// Construct a new agent with the required fields.
    pub fn new(
        name: impl Into<AgentName>,
        model_family: impl Into<String>,
        quality: f64,
        token_rate: f64,
        capacity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            model_family: model_family.into(),
            quality,
            token_rate,
            capabilities: HashSet::new(),
            capacity,
            latency: 0.0,
            is_local: token_rate == 0.0,
            display_name: None,
        }
    }

    /// The name to use in user-facing output.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether this agent can serve the given complexity tier.
    pub fn covers_complexity(&self, complexity: Complexity) -> bool {
        self.capabilities.contains(&complexity.to_string())
    }

    /// Whether this agent meets the given quality floor.
    pub fn meets_quality_floor(&self, quality_floor: f64) -> bool {
        self.quality >= quality_floor
    }

    /// Per-model throughput constant used by the critical-path calculation,
    /// expressed as tokens processed per unit time. Faster (lower-latency)
    /// agents of equal quality are modeled as marginally higher throughput,
    /// consistent with latency being "small but tie-breaking" in the cost
    /// model.
    pub fn throughput(&self) -> f64 {
        let base = 1000.0;
        base / (1.0 + self.latency)
    }

    /// Validate the invariants a well-formed agent must satisfy.
    pub fn validate(&self) -> TypesResult<()> {
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(TypesError::InvalidAgentQuality(self.name.clone(), self.quality));
        }
        if self.capacity == 0 {
            return Err(TypesError::InvalidAgentCapacity(self.name.clone(), 0));
        }
        if self.token_rate < 0.0 {
            return Err(TypesError::InvalidTokenRate(self.name.clone(), self.token_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_agents_default_from_zero_token_rate() {
        let agent = Agent::new("cheap", "local-7b", 0.6, 0.0, 5);
        assert!(agent.is_local);
    }

    #[test]
    fn covers_complexity_checks_capability_set() {
        let mut agent = Agent::new("a", "m", 0.6, 0.001, 5);
        agent.capabilities.insert(Complexity::Simple.to_string());
        assert!(agent.covers_complexity(Complexity::Simple));
        assert!(!agent.covers_complexity(Complexity::Epic));
    }

    #[test]
    fn validate_rejects_zero_capacity() {
        let mut agent = Agent::new("a", "m", 0.6, 0.001, 5);
        agent.capacity = 0;
        assert!(matches!(
            agent.validate(),
            Err(TypesError::InvalidAgentCapacity(_, _))
        ));
    }

    #[test]
    fn validate_rejects_negative_token_rate() {
        let mut agent = Agent::new("a", "m", 0.6, -0.1, 5);
        agent.token_rate = -0.1;
        assert!(matches!(
            agent.validate(),
            Err(TypesError::InvalidTokenRate(_, _))
        ));
    }
}
