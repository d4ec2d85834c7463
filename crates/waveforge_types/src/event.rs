//! Progress events emitted by the Wave Executor.

use serde::{Deserialize, Serialize};

use crate::agent::AgentName;
use crate::gate::FinalVerdict;
use crate::intent::IntentId;
use crate::profile::AgentProfile;

/// The seven named progress event types from §6, modeled as variants of a
/// single closed enum rather than seven independent structs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    WaveStarted {
        wave: usize,
        intent_count: usize,
    },
    WaveCompleted {
        wave: usize,
        status: String,
        score: f64,
        duration_ms: u64,
    },
    IntentStarted {
        intent_id: IntentId,
        profile: AgentProfile,
        model: AgentName,
        wave: usize,
    },
    IntentCompleted {
        intent_id: IntentId,
        status: String,
        score: f64,
        attempt: u32,
    },
    IntentRetried {
        intent_id: IntentId,
        attempt: u32,
        model: AgentName,
        reason: String,
    },
    IntentEscalated {
        intent_id: IntentId,
        from_model: AgentName,
        to_model: AgentName,
        attempt: u32,
    },
    IntentHumanReview {
        intent_id: IntentId,
        attempts: u32,
        last_error: Option<String>,
    },
    ExecutionCompleted {
        verdict: FinalVerdict,
        passed: usize,
        failed: usize,
        human_review: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = ProgressEvent::WaveStarted {
            wave: 0,
            intent_count: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "wave_started");
        assert_eq!(json["intent_count"], 3);
    }
}
