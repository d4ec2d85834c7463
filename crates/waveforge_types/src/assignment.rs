//! Assignment — a mapping from intent identifier to agent name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agent::AgentName;
use crate::intent::IntentId;

/// A feasible mapping from intent id to agent name. The invariants in §3
/// (one agent per intent, quality floor, capability coverage, capacity) are
/// enforced by whichever solver produces the `Assignment`, not by this
/// type itself — `Assignment` is a plain carrier, mirroring the teacher's
/// preference for validating at construction boundaries rather than on
/// every read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment(pub HashMap<IntentId, AgentName>);

impl Assignment {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn agent_for(&self, intent_id: &str) -> Option<&AgentName> {
        self.0.get(intent_id)
    }

    pub fn insert(&mut self, intent_id: IntentId, agent_name: AgentName) {
        self.0.insert(intent_id, agent_name);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count of intents bound to each agent, used to check capacity.
    pub fn load_by_agent(&self) -> HashMap<AgentName, u32> {
        let mut load = HashMap::new();
        for agent in self.0.values() {
            *load.entry(agent.clone()).or_insert(0) += 1;
        }
        load
    }

    /// Number of distinct agents used, the first tie-break criterion for
    /// the solver.
    pub fn distinct_agent_count(&self) -> usize {
        self.0.values().collect::<std::collections::HashSet<_>>().len()
    }
}
