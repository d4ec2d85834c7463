//! The Wave Executor: runs each wave in parallel, applies the three
//! quality gates, retries and escalates failing intents up the agent
//! ladder, and streams progress events. See §4.7 and §5 of the
//! specification.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use log::{info, warn};
use tokio::sync::{Mutex, Semaphore};

use waveforge_agent_registry::AgentRegistry;
use waveforge_quality_gates::{
    recommend, DefaultGate1Evaluator, DefaultGate2Evaluator, DefaultGate3Evaluator, Gate1Evaluator,
    Gate2Evaluator, Gate3Evaluator, RetryAction,
};
use waveforge_types::{
    Agent, AgentProfile, Complexity, FinalVerdict, IntentId, IntentResult, IntentStatus, Plan,
    PlanIntent, ProgressEvent,
};

use crate::backend::ExecutionBackend;
use crate::config::ExecutorConfig;
use crate::context::{CancellationHandle, DispatchContext};
use crate::error::ExecutorError;
use crate::event_sink::{EventSink, LoggingEventSink};
use crate::result::{ExecutionResult, IntentOutcome, IntentOutcomeRecord, WaveOutcome};

type ArtifactCollector = Arc<Mutex<HashMap<IntentId, Vec<String>>>>;

/// Orchestrates a [`Plan`] to completion against an [`ExecutionBackend`].
/// Immutable once constructed; `run` may be called repeatedly (each call
/// is an independent session) since all per-run state lives on the stack
/// of that call, not on `self`.
pub struct WaveExecutor<B: ExecutionBackend + 'static> {
    config: ExecutorConfig,
    registry: Arc<AgentRegistry>,
    backend: Arc<B>,
    event_sink: Arc<dyn EventSink>,
    gate1: Arc<dyn Gate1Evaluator + Send + Sync>,
    gate2: Arc<dyn Gate2Evaluator + Send + Sync>,
    gate3: Arc<dyn Gate3Evaluator + Send + Sync>,
}

impl<B: ExecutionBackend + 'static> WaveExecutor<B> {
    pub fn new(
        config: ExecutorConfig,
        registry: AgentRegistry,
        backend: Arc<B>,
    ) -> Result<Self, ExecutorError> {
        config.validate()?;
        Ok(Self {
            config,
            registry: Arc::new(registry),
            backend,
            event_sink: Arc::new(LoggingEventSink),
            gate1: Arc::new(DefaultGate1Evaluator),
            gate2: Arc::new(DefaultGate2Evaluator::default()),
            gate3: Arc::new(DefaultGate3Evaluator),
        })
    }

    /// Swap the default logging sink for a caller-supplied transport — a
    /// channel, a test double, whatever the deployment wants upstream of
    /// the core. See §9's "transport is an adapter above the core" note.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// Run `plan` to completion, dispatching through the backend this
    /// executor was built with. `cancellation` lets a caller request
    /// early termination; the executor also honors its own configured
    /// session timeout by cancelling internally when it elapses.
    pub async fn run(&self, plan: &Plan, cancellation: CancellationHandle) -> ExecutionResult {
        let semaphore = Arc::new(Semaphore::new(self.config.max_workers as usize));
        let artifacts: ArtifactCollector = Arc::new(Mutex::new(HashMap::new()));

        let timeout_handle = {
            let cancellation = cancellation.clone();
            let timeout = self.config.session_timeout;
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                cancellation.cancel();
            })
        };

        let mut result = ExecutionResult::empty();

        for wave in &plan.waves {
            if cancellation.is_cancelled() {
                result.cancelled = true;
                result.incomplete = true;
                result.waves.push(self.not_dispatched_wave(wave.wave, &wave.intents));
                continue;
            }

            self.event_sink.emit(ProgressEvent::WaveStarted {
                wave: wave.wave,
                intent_count: wave.intents.len(),
            });
            let wave_started = std::time::Instant::now();

            let dispatches = wave.intents.iter().map(|intent| {
                let intent = intent.clone();
                let semaphore = Arc::clone(&semaphore);
                let artifacts = Arc::clone(&artifacts);
                let cancellation = cancellation.clone();
                let registry = Arc::clone(&self.registry);
                let backend = Arc::clone(&self.backend);
                let event_sink = Arc::clone(&self.event_sink);
                let gate1 = Arc::clone(&self.gate1);
                let max_retries = self.config.max_retries;
                let wave_index = wave.wave;
                tokio::spawn(async move {
                    run_intent_with_retries(
                        intent,
                        wave_index,
                        max_retries,
                        semaphore,
                        artifacts,
                        cancellation,
                        registry,
                        backend,
                        event_sink,
                        gate1,
                    )
                    .await
                })
            });

            let outcomes: Vec<IntentOutcomeRecord> = join_all(dispatches)
                .await
                .into_iter()
                .zip(wave.intents.iter())
                .map(|(joined, plan_intent)| {
                    joined.unwrap_or_else(|join_err| {
                        let error = format!("dispatch task panicked: {join_err}");
                        IntentOutcomeRecord {
                            intent_id: plan_intent.id.clone(),
                            outcome: IntentOutcome::HumanReview {
                                result: panicked_placeholder(plan_intent, error.clone()),
                                attempts: 0,
                                last_error: Some(error),
                            },
                        }
                    })
                })
                .collect();

            // Gate 2 evaluates every intent in the wave, not just the ones
            // that passed — an exhausted-to-human-review or never-dispatched
            // intent must still count against the wave.
            let wave_results: Vec<IntentResult> = wave
                .intents
                .iter()
                .zip(outcomes.iter())
                .map(|(plan_intent, record)| match &record.outcome {
                    IntentOutcome::Passed { result, .. } => result.clone(),
                    IntentOutcome::HumanReview { result, .. } => result.clone(),
                    IntentOutcome::NotDispatched => not_dispatched_placeholder(plan_intent),
                })
                .collect();
            let gate2 = self.gate2.evaluate(&wave_results, self.config.min_wave_quality);

            self.event_sink.emit(ProgressEvent::WaveCompleted {
                wave: wave.wave,
                status: if gate2.pass { "passed".to_string() } else { "failed".to_string() },
                score: gate2.score,
                duration_ms: wave_started.elapsed().as_millis() as u64,
            });

            let gate2_failed = !gate2.pass;
            result.waves.push(WaveOutcome {
                wave: wave.wave,
                gate2,
                intents: outcomes,
            });

            if gate2_failed && self.config.gate2_strict {
                warn!("wave {} failed gate 2 under strict policy, aborting session", wave.wave);
                result.incomplete = true;
                break;
            }
        }

        timeout_handle.abort();

        for wave_outcome in &result.waves {
            for record in &wave_outcome.intents {
                match &record.outcome {
                    IntentOutcome::Passed { .. } => result.passed += 1,
                    IntentOutcome::HumanReview { .. } => result.human_review += 1,
                    IntentOutcome::NotDispatched => result.failed += 1,
                }
            }
        }

        let passed_results: Vec<_> = result.passed_results().into_iter().cloned().collect();
        let total_intents = plan.total_intents;
        let observed = result.passed + result.human_review + result.failed;
        if observed < total_intents {
            result.incomplete = true;
        }

        let final_review = if passed_results.is_empty() {
            None
        } else {
            Some(self.gate3.evaluate(&passed_results))
        };
        let verdict = final_review
            .as_ref()
            .map(|r| r.verdict)
            .unwrap_or(FinalVerdict::Ship);
        result.final_review = final_review;

        self.event_sink.emit(ProgressEvent::ExecutionCompleted {
            verdict,
            passed: result.passed,
            failed: result.failed,
            human_review: result.human_review,
        });

        info!(
            "execution completed: {} passed, {} human review, {} failed, cancelled={}, incomplete={}",
            result.passed, result.human_review, result.failed, result.cancelled, result.incomplete
        );

        result
    }

    fn not_dispatched_wave(&self, wave: usize, intents: &[PlanIntent]) -> WaveOutcome {
        WaveOutcome {
            wave,
            gate2: waveforge_types::GateVerdict::failing(
                0.0,
                vec!["wave never dispatched: session cancelled".to_string()],
            ),
            intents: intents
                .iter()
                .map(|intent| IntentOutcomeRecord {
                    intent_id: intent.id.clone(),
                    outcome: IntentOutcome::NotDispatched,
                })
                .collect(),
        }
    }
}

/// Placeholder Intent Result for a wave member whose dispatch task itself
/// panicked, so Gate 2 still sees a failing record for this intent instead
/// of a gap.
fn panicked_placeholder(plan_intent: &PlanIntent, error: String) -> IntentResult {
    IntentResult {
        intent_id: plan_intent.id.clone(),
        profile: plan_intent.profile,
        agent: plan_intent.model.clone(),
        status: IntentStatus::Failed,
        quality_score: 0.0,
        tests_passed: false,
        coverage_delta: 0.0,
        artifacts: Vec::new(),
        error: Some(error),
        attempt: 0,
    }
}

/// Placeholder Intent Result for a wave member that was never dispatched
/// (session cancelled or aborted before its turn), so Gate 2 still sees a
/// failing record for this intent instead of a gap.
fn not_dispatched_placeholder(plan_intent: &PlanIntent) -> IntentResult {
    IntentResult {
        intent_id: plan_intent.id.clone(),
        profile: plan_intent.profile,
        agent: plan_intent.model.clone(),
        status: IntentStatus::Failed,
        quality_score: 0.0,
        tests_passed: false,
        coverage_delta: 0.0,
        artifacts: Vec::new(),
        error: Some("intent was not dispatched".to_string()),
        attempt: 0,
    }
}

/// The next higher-quality agent able to serve `complexity` and `profile`,
/// strictly better than `current`. Per §3 ("each profile lists the set of
/// model families that may serve it") and §4.7/Glossary ("escalate to a
/// higher-quality model in the same profile"), escalation may only land on
/// an agent whose model family is in `profile`'s allowed set. Picks the
/// smallest qualifying quality above the current agent's (a stepwise
/// ladder, matching the escalation scenario in §8), breaking ties
/// lexicographically by name via `find_eligible`'s already-sorted order.
fn next_escalation_agent<'a>(
    registry: &'a AgentRegistry,
    complexity: Complexity,
    profile: AgentProfile,
    current: &Agent,
) -> Option<&'a Agent> {
    registry
        .find_eligible(complexity, 0.0)
        .into_iter()
        .filter(|candidate| candidate.quality > current.quality)
        .filter(|candidate| profile.serves_model_family(&candidate.model_family))
        .min_by(|a, b| {
            a.quality
                .partial_cmp(&b.quality)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        })
}

#[allow(clippy::too_many_arguments)]
async fn run_intent_with_retries(
    intent: PlanIntent,
    wave: usize,
    max_retries: u32,
    semaphore: Arc<Semaphore>,
    artifacts: ArtifactCollector,
    cancellation: CancellationHandle,
    registry: Arc<AgentRegistry>,
    backend: Arc<impl ExecutionBackend>,
    event_sink: Arc<dyn EventSink>,
    gate1: Arc<dyn Gate1Evaluator + Send + Sync>,
) -> IntentOutcomeRecord {
    let mut attempt: u32 = 1;
    let mut current_agent_name = intent.model.clone();
    let mut last_error: Option<String> = None;

    event_sink.emit(ProgressEvent::IntentStarted {
        intent_id: intent.id.clone(),
        profile: intent.profile,
        model: current_agent_name.clone(),
        wave,
    });

    loop {
        if cancellation.is_cancelled() {
            return IntentOutcomeRecord {
                intent_id: intent.id.clone(),
                outcome: IntentOutcome::NotDispatched,
            };
        }

        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore is never closed for the lifetime of a run");
        let predecessor_artifacts = {
            let collected = artifacts.lock().await;
            intent
                .depends_on
                .iter()
                .flat_map(|dep| collected.get(dep).cloned().unwrap_or_default())
                .collect::<Vec<_>>()
        };

        let context = DispatchContext {
            wave,
            agent: current_agent_name.clone(),
            attempt,
            predecessor_artifacts,
            cancellation: cancellation.clone(),
        };

        let backend_result = backend.execute(&intent, &context).await;
        drop(permit);

        let verdict = gate1.evaluate(&backend_result);
        event_sink.emit(ProgressEvent::IntentCompleted {
            intent_id: intent.id.clone(),
            status: if verdict.pass { "passed".to_string() } else { "failed".to_string() },
            score: verdict.score,
            attempt,
        });

        if verdict.pass {
            artifacts
                .lock()
                .await
                .insert(intent.id.clone(), backend_result.artifacts.clone());
            return IntentOutcomeRecord {
                intent_id: intent.id.clone(),
                outcome: IntentOutcome::Passed {
                    result: backend_result,
                    verdict,
                },
            };
        }

        last_error = backend_result
            .error
            .clone()
            .or_else(|| verdict.issues.first().cloned());

        if attempt >= max_retries {
            event_sink.emit(ProgressEvent::IntentHumanReview {
                intent_id: intent.id.clone(),
                attempts: attempt,
                last_error: last_error.clone(),
            });
            return IntentOutcomeRecord {
                intent_id: intent.id.clone(),
                outcome: IntentOutcome::HumanReview {
                    result: backend_result,
                    attempts: attempt,
                    last_error,
                },
            };
        }

        match recommend(attempt) {
            RetryAction::RetrySameAgent => {
                event_sink.emit(ProgressEvent::IntentRetried {
                    intent_id: intent.id.clone(),
                    attempt: attempt + 1,
                    model: current_agent_name.clone(),
                    reason: verdict.issues.join("; "),
                });
            }
            RetryAction::EscalateToHigherQuality => {
                let current = registry.get(&current_agent_name);
                let escalated = current.and_then(|current| {
                    next_escalation_agent(&registry, intent.complexity, intent.profile, current)
                });
                match escalated {
                    Some(next_agent) => {
                        event_sink.emit(ProgressEvent::IntentEscalated {
                            intent_id: intent.id.clone(),
                            from_model: current_agent_name.clone(),
                            to_model: next_agent.name.clone(),
                            attempt: attempt + 1,
                        });
                        current_agent_name = next_agent.name.clone();
                    }
                    None => {
                        event_sink.emit(ProgressEvent::IntentHumanReview {
                            intent_id: intent.id.clone(),
                            attempts: attempt,
                            last_error: last_error.clone(),
                        });
                        return IntentOutcomeRecord {
                            intent_id: intent.id.clone(),
                            outcome: IntentOutcome::HumanReview {
                                result: backend_result,
                                attempts: attempt,
                                last_error,
                            },
                        };
                    }
                }
            }
            RetryAction::FlagForHumanReview => {
                event_sink.emit(ProgressEvent::IntentHumanReview {
                    intent_id: intent.id.clone(),
                    attempts: attempt,
                    last_error: last_error.clone(),
                });
                return IntentOutcomeRecord {
                    intent_id: intent.id.clone(),
                    outcome: IntentOutcome::HumanReview {
                        result: backend_result,
                        attempts: attempt,
                        last_error,
                    },
                };
            }
        }

        attempt += 1;
    }
}

#[cfg(test)]
mod escalation_tests {
    use super::*;
    use waveforge_types::Complexity;

    fn agent_of_family(name: &str, quality: f64, model_family: &str) -> Agent {
        let mut agent = Agent::new(name, model_family, quality, 0.001, 5);
        agent.capabilities.insert(Complexity::Simple.to_string());
        agent
    }

    #[test]
    fn escalation_skips_higher_quality_agents_outside_the_profile_family() {
        let registry = AgentRegistry::builder()
            .with_agent(agent_of_family("low", 0.6, "coder"))
            .unwrap()
            .with_agent(agent_of_family("mismatched", 0.9, "writer"))
            .unwrap()
            .with_agent(agent_of_family("high", 0.95, "coder"))
            .unwrap()
            .build();

        let current = registry.get("low").unwrap();
        let next = next_escalation_agent(&registry, Complexity::Simple, AgentProfile::Implementer, current);
        assert_eq!(next.map(|a| a.name.as_str()), Some("high"));
    }

    #[test]
    fn escalation_finds_none_when_every_higher_quality_agent_is_a_foreign_family() {
        let registry = AgentRegistry::builder()
            .with_agent(agent_of_family("low", 0.6, "coder"))
            .unwrap()
            .with_agent(agent_of_family("mismatched", 0.9, "writer"))
            .unwrap()
            .build();

        let current = registry.get("low").unwrap();
        let next = next_escalation_agent(&registry, Complexity::Simple, AgentProfile::Implementer, current);
        assert!(next.is_none());
    }
}
