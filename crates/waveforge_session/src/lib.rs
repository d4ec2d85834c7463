//! # Waveforge Session
//!
//! The ambient "what a caller actually constructs and holds" type: a
//! [`Session`] bundles an agent registry with the solver and executor
//! configuration for one planning-and-execution run, and exposes `plan`
//! and `execute` as the two operations a caller needs. Mirrors the
//! teacher's `TerraphimTaskDecompositionSystem` / `KnowledgeGraphAgentRegistry`
//! convenience wrappers — a single owned handle instead of threading a
//! registry and two config structs through every call site.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;
use uuid::Uuid;

use waveforge_agent_registry::AgentRegistry;
use waveforge_executor::{CancellationHandle, ExecutionBackend, ExecutionResult, ExecutorConfig, ExecutorError, WaveExecutor};
use waveforge_plan_builder::{build_plan, PlanBuilderError};
use waveforge_solver::SolverConfig;
use waveforge_types::{Intent, Plan};

/// A single planning-and-execution session: one agent pool plus the
/// solver/executor configuration it runs under. `session_id` and
/// `started_at` are stamped once at construction, purely for a caller's
/// own logging and correlation — nothing in the core model reads them.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    registry: AgentRegistry,
    solver_config: SolverConfig,
    executor_config: ExecutorConfig,
}

impl Session {
    /// Start a new session over `registry`, with the given solver and
    /// executor configuration. `session_id` and `started_at` are supplied
    /// by the caller, since this crate avoids wall-clock/random sources
    /// internally.
    pub fn new(
        session_id: Uuid,
        started_at: DateTime<Utc>,
        registry: AgentRegistry,
        solver_config: SolverConfig,
        executor_config: ExecutorConfig,
    ) -> Self {
        Self {
            session_id,
            started_at,
            registry,
            solver_config,
            executor_config,
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Partition, route and assign `intents` into a [`Plan`] against this
    /// session's registry and solver configuration.
    pub fn plan(&self, intents: Vec<Intent>) -> Result<Plan, PlanBuilderError> {
        let intent_count = intents.len();
        let plan = build_plan(intents, &self.registry, &self.solver_config)?;
        info!(
            "session {}: planned {} intent(s) into {} wave(s)",
            self.session_id, intent_count, plan.total_waves
        );
        Ok(plan)
    }

    /// Run `plan` to completion against `backend`, under this session's
    /// executor configuration. A fresh [`WaveExecutor`] is built per call
    /// so `backend` may differ across calls on the same session.
    pub async fn execute<B: ExecutionBackend + 'static>(
        &self,
        plan: &Plan,
        backend: Arc<B>,
        cancellation: CancellationHandle,
    ) -> Result<ExecutionResult, ExecutorError> {
        let executor = WaveExecutor::new(
            self.executor_config.clone(),
            self.registry.clone(),
            backend,
        )?;
        let result = executor.run(plan, cancellation).await;
        info!(
            "session {}: executed plan, {} passed / {} total",
            self.session_id,
            result.passed,
            result.passed + result.failed
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waveforge_executor::testing::AlwaysPassBackend;
    use waveforge_types::{Agent, Complexity};

    fn cheap_agent() -> Agent {
        let mut agent = Agent::new("cheap", "local-7b", 0.8, 0.001, 5);
        for tier in [Complexity::Trivial, Complexity::Simple, Complexity::Moderate] {
            agent.capabilities.insert(tier.to_string());
        }
        agent
    }

    fn session() -> Session {
        let registry = AgentRegistry::builder().with_agent(cheap_agent()).unwrap().build();
        Session::new(
            Uuid::nil(),
            DateTime::<Utc>::MIN_UTC,
            registry,
            SolverConfig::default(),
            ExecutorConfig::default(),
        )
    }

    #[test]
    fn plans_a_single_intent() {
        let intent = Intent::new("a", Complexity::Simple, 0.5, 500);
        let plan = session().plan(vec![intent]).unwrap();
        assert_eq!(plan.total_waves, 1);
    }

    #[tokio::test]
    async fn executes_a_planned_intent() {
        let session = session();
        let intent = Intent::new("a", Complexity::Simple, 0.5, 500);
        let plan = session.plan(vec![intent]).unwrap();

        let backend = Arc::new(AlwaysPassBackend::default());
        let result = session
            .execute(&plan, backend, CancellationHandle::new())
            .await
            .unwrap();

        assert_eq!(result.passed, 1);
    }
}
