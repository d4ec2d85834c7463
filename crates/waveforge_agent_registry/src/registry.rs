//! Static agent pool, built once at session start.

use ahash::AHashMap;
use log::debug;

use waveforge_types::{Agent, AgentName, Complexity};

use crate::error::RegistryError;

/// An immutable pool of agents, built once from a static configuration and
/// queried for the remainder of the planning session. See the Agent entry
/// in §3 of the specification.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: AHashMap<AgentName, Agent>,
    /// Names in sorted order, cached so repeated lookups don't re-sort.
    sorted_names: Vec<AgentName>,
}

impl AgentRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    /// All agents in lexicographic name order, the order the solver's
    /// tie-break rule requires when comparing candidate assignments of
    /// equal cost and equal distinct-agent count.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Agent> {
        self.sorted_names.iter().filter_map(move |name| self.agents.get(name))
    }

    /// Agents able to serve the given complexity tier at or above the given
    /// quality floor, in lexicographic name order.
    pub fn find_eligible(&self, complexity: Complexity, quality_floor: f64) -> Vec<&Agent> {
        self.iter_sorted()
            .filter(|agent| agent.covers_complexity(complexity) && agent.meets_quality_floor(quality_floor))
            .collect()
    }
}

/// Builds an [`AgentRegistry`] from a sequence of agents, validating each
/// one and rejecting duplicate names.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    agents: AHashMap<AgentName, Agent>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, agent: Agent) -> Result<Self, RegistryError> {
        agent.validate()?;
        if self.agents.contains_key(&agent.name) {
            return Err(RegistryError::DuplicateAgent(agent.name.clone()));
        }
        self.agents.insert(agent.name.clone(), agent);
        Ok(self)
    }

    pub fn with_agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Result<Self, RegistryError> {
        for agent in agents {
            self = self.with_agent(agent)?;
        }
        Ok(self)
    }

    pub fn build(self) -> AgentRegistry {
        let mut sorted_names: Vec<AgentName> = self.agents.keys().cloned().collect();
        sorted_names.sort();
        debug!("built agent registry with {} agent(s)", sorted_names.len());
        AgentRegistry {
            agents: self.agents,
            sorted_names,
        }
    }
}
