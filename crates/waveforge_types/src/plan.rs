//! Plan — the serializable bundle a session hands to the Wave Executor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agent::AgentName;
use crate::complexity::Complexity;
use crate::intent::IntentId;
use crate::profile::AgentProfile;

/// One intent entry inside a serialized [`Plan`], matching the fields
/// required by §6's Plan serialization contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanIntent {
    pub id: IntentId,
    pub profile: AgentProfile,
    pub model: AgentName,
    pub workflow: String,
    pub complexity: Complexity,
    pub estimated_tokens: u64,
    pub estimated_cost: f64,
    pub depends_on: Vec<IntentId>,
    pub wave: usize,
}

/// One wave entry inside a serialized [`Plan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWave {
    pub wave: usize,
    pub agents_needed: usize,
    pub estimated_cost: f64,
    pub intents: Vec<PlanIntent>,
}

/// The bundled, serializable description of a planning session's output,
/// ready for execution by the Wave Executor. Field names and shapes match
/// §6's Plan serialization contract exactly so the Plan round-trips
/// losslessly through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Plan {
    pub total_intents: usize,
    pub total_waves: usize,
    pub peak_parallelism: usize,
    pub serial_depth: usize,
    pub bottleneck_wave: Option<usize>,
    pub critical_path: Vec<IntentId>,
    pub total_estimated_cost: f64,
    pub total_estimated_tokens: u64,
    pub profile_load: HashMap<String, usize>,
    pub waves: Vec<PlanWave>,
}

impl Plan {
    /// A plan for an empty intent backlog: zero waves, no cost, trivially
    /// satisfies every invariant.
    pub fn empty() -> Self {
        Self {
            total_intents: 0,
            total_waves: 0,
            peak_parallelism: 0,
            serial_depth: 0,
            bottleneck_wave: None,
            critical_path: Vec::new(),
            total_estimated_cost: 0.0,
            total_estimated_tokens: 0,
            profile_load: HashMap::new(),
            waves: Vec::new(),
        }
    }

    /// Flattened list of all plan intents, across every wave, in wave order.
    pub fn all_intents(&self) -> impl Iterator<Item = &PlanIntent> {
        self.waves.iter().flat_map(|w| w.intents.iter())
    }
}
