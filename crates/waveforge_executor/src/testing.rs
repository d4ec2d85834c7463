//! Test doubles for the Execution Backend, grounded in the teacher's mock
//! `AgentFactory`/`SupervisedAgent` doubles used throughout
//! `terraphim_agent_supervisor`'s test modules. Only compiled for tests or
//! when the `testing` feature is enabled — never shipped in non-test code.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use waveforge_types::{IntentResult, IntentStatus, PlanIntent};

use crate::backend::ExecutionBackend;
use crate::context::DispatchContext;

/// A backend whose result for each `(intent_id, attempt)` pair is scripted
/// in advance. Attempts beyond the scripted list repeat the last entry.
/// Useful for exercising the retry/escalation ladder deterministically.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    scripts: Mutex<HashMap<String, Vec<IntentResult>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the sequence of results a given intent id should produce,
    /// one per attempt in order.
    pub fn script(&self, intent_id: impl Into<String>, results: Vec<IntentResult>) {
        self.scripts.lock().unwrap().insert(intent_id.into(), results);
    }
}

#[async_trait]
impl ExecutionBackend for ScriptedBackend {
    async fn execute(&self, intent: &PlanIntent, context: &DispatchContext) -> IntentResult {
        let scripts = self.scripts.lock().unwrap();
        let script = scripts.get(&intent.id);
        let attempt_index = (context.attempt as usize).saturating_sub(1);
        match script.and_then(|s| s.get(attempt_index).or_else(|| s.last())) {
            Some(result) => {
                let mut result = result.clone();
                result.attempt = context.attempt;
                result.agent = context.agent.clone();
                result
            }
            None => IntentResult {
                intent_id: intent.id.clone(),
                profile: intent.profile,
                agent: context.agent.clone(),
                status: IntentStatus::Failed,
                quality_score: 0.0,
                tests_passed: false,
                coverage_delta: 0.0,
                artifacts: Vec::new(),
                error: Some("no script registered for this intent".to_string()),
                attempt: context.attempt,
            },
        }
    }
}

/// A backend that always succeeds with a fixed quality score, for tests
/// that don't care about retry/escalation behavior.
#[derive(Debug, Clone)]
pub struct AlwaysPassBackend {
    pub quality_score: f64,
}

impl Default for AlwaysPassBackend {
    fn default() -> Self {
        Self { quality_score: 0.9 }
    }
}

#[async_trait]
impl ExecutionBackend for AlwaysPassBackend {
    async fn execute(&self, intent: &PlanIntent, context: &DispatchContext) -> IntentResult {
        IntentResult {
            intent_id: intent.id.clone(),
            profile: intent.profile,
            agent: context.agent.clone(),
            status: IntentStatus::Completed,
            quality_score: self.quality_score,
            tests_passed: true,
            coverage_delta: 0.1,
            artifacts: vec![format!("artifacts/{}.rs", intent.id)],
            error: None,
            attempt: context.attempt,
        }
    }
}
