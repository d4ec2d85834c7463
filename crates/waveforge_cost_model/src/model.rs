//! Pure per-pair cost and the global assignment objective.

use std::collections::HashMap;

use log::debug;

use waveforge_types::{Agent, Assignment, Intent};

use crate::error::CostModelError;
use crate::weights::CostWeights;

/// Pure per-(intent, agent) cost, excluding the context-affinity bonus and
/// deadline timing, which depend on the full candidate assignment. Returns
/// [`CostModelError::Infeasible`] when the agent cannot legally serve the
/// intent — the solver must treat that as forbidding the assignment, never
/// as a numeric cost to minimize around.
pub fn pair_cost(intent: &Intent, agent: &Agent, weights: &CostWeights) -> Result<f64, CostModelError> {
    let floor = weights.effective_quality_floor(intent.quality_floor);

    if agent.quality < floor {
        return Err(CostModelError::Infeasible {
            intent: intent.id.clone(),
            agent: agent.name.clone(),
            reason: format!(
                "agent quality {:.2} below effective floor {:.2}",
                agent.quality, floor
            ),
        });
    }
    if !agent.covers_complexity(intent.complexity) {
        return Err(CostModelError::Infeasible {
            intent: intent.id.clone(),
            agent: agent.name.clone(),
            reason: format!(
                "agent does not cover complexity tier {}",
                intent.complexity
            ),
        });
    }

    let token_cost = intent.estimated_tokens as f64 * agent.token_rate;
    let overkill_penalty = (agent.quality - floor).max(0.0) * token_cost * weights.overkill_weight;
    let latency_penalty = agent.latency * weights.latency_weight;

    Ok(token_cost + overkill_penalty + latency_penalty)
}

/// Context needed to evaluate the global objective over a full candidate
/// assignment: each intent's wave index (for deadline timing) and the
/// dependency edges (for the context-affinity bonus).
pub struct AssignmentContext<'a> {
    pub wave_of: &'a dyn Fn(&str) -> Option<usize>,
}

/// The deadline penalty for one intent given its resolved wave index.
fn deadline_penalty(intent: &Intent, wave_index: Option<usize>, weights: &CostWeights) -> f64 {
    let Some(deadline) = intent.deadline else {
        return 0.0;
    };
    let Some(wave_index) = wave_index else {
        return 0.0;
    };
    let completion_time = wave_index as f64 * weights.time_per_wave;
    let slack = completion_time - deadline as f64;
    slack.max(0.0) * weights.deadline_weight
}

/// The context-affinity bonus for one intent: `context_bonus` subtracted
/// for every dependency whose predecessor shares the same agent.
fn context_bonus(intent: &Intent, agent_name: &str, assignment: &Assignment, weights: &CostWeights) -> f64 {
    intent
        .depends
        .iter()
        .filter(|dep| assignment.agent_for(dep).map(|a| a.as_str()) == Some(agent_name))
        .count() as f64
        * weights.context_bonus
}

/// Layer the contextual terms (deadline timing, context-affinity bonus)
/// atop the per-pair costs for a full candidate assignment, and return the
/// total objective value. Any intent whose bound agent is infeasible for
/// it is reported via the `Err` variant — a valid solver output should
/// never reach this state, but the objective function itself does not
/// assume it.
pub fn global_objective(
    intents: &[Intent],
    agents_by_name: &HashMap<String, Agent>,
    assignment: &Assignment,
    ctx: &AssignmentContext,
    weights: &CostWeights,
) -> Result<f64, CostModelError> {
    let mut total = 0.0;

    for intent in intents {
        let agent_name = assignment.agent_for(&intent.id).ok_or_else(|| {
            CostModelError::Infeasible {
                intent: intent.id.clone(),
                agent: String::new(),
                reason: "intent has no bound agent".to_string(),
            }
        })?;
        let agent = agents_by_name.get(agent_name).ok_or_else(|| CostModelError::Infeasible {
            intent: intent.id.clone(),
            agent: agent_name.clone(),
            reason: "bound agent not found in registry".to_string(),
        })?;

        let base = pair_cost(intent, agent, weights)?;
        let wave_index = (ctx.wave_of)(&intent.id);
        let deadline = deadline_penalty(intent, wave_index, weights);
        let bonus = context_bonus(intent, agent_name, assignment, weights);

        total += base + deadline - bonus;
    }

    if let Some(cap) = weights.budget_cap {
        if total > cap {
            let overage = total - cap;
            total += overage * overage;
        }
    }

    debug!("global objective over {} intent(s): {:.4}", intents.len(), total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waveforge_types::Complexity;

    fn cheap_agent() -> Agent {
        let mut agent = Agent::new("cheap", "local-7b", 0.6, 0.001, 5);
        agent.capabilities.insert(Complexity::Trivial.to_string());
        agent.capabilities.insert(Complexity::Simple.to_string());
        agent.capabilities.insert(Complexity::Moderate.to_string());
        agent
    }

    #[test]
    fn chain_of_three_matches_worked_example() {
        // Scenario 1 from the specification: three intents, all bound to
        // `cheap`, objective dominated by token cost = 7.0.
        let a = Intent::new("a", Complexity::Trivial, 0.5, 500);
        let b = Intent::new("b", Complexity::Simple, 0.5, 1500);
        let c = Intent::new("c", Complexity::Moderate, 0.5, 5000);
        let agent = cheap_agent();
        let weights = CostWeights::default();

        let cost_a = pair_cost(&a, &agent, &weights).unwrap();
        let cost_b = pair_cost(&b, &agent, &weights).unwrap();
        let cost_c = pair_cost(&c, &agent, &weights).unwrap();

        assert!((cost_a + cost_b + cost_c - 7.0).abs() < 1e-9);
    }

    #[test]
    fn infeasible_quality_floor_is_rejected() {
        let intent = Intent::new("i1", Complexity::Simple, 0.9, 100);
        let agent = cheap_agent();
        let weights = CostWeights::default();
        assert!(matches!(
            pair_cost(&intent, &agent, &weights),
            Err(CostModelError::Infeasible { .. })
        ));
    }

    #[test]
    fn infeasible_capability_gap_is_rejected() {
        let intent = Intent::new("i1", Complexity::Epic, 0.5, 100);
        let agent = cheap_agent();
        let weights = CostWeights::default();
        assert!(matches!(
            pair_cost(&intent, &agent, &weights),
            Err(CostModelError::Infeasible { .. })
        ));
    }

    #[test]
    fn context_bonus_reduces_objective_for_shared_agent() {
        let mut b = Intent::new("b", Complexity::Simple, 0.5, 1000);
        b.depends.push("a".to_string());
        let intents = vec![Intent::new("a", Complexity::Trivial, 0.5, 1000), b];

        let agent = cheap_agent();
        let mut agents = HashMap::new();
        agents.insert(agent.name.clone(), agent);

        let mut assignment = Assignment::new();
        assignment.insert("a".to_string(), "cheap".to_string());
        assignment.insert("b".to_string(), "cheap".to_string());

        let wave_of = |id: &str| -> Option<usize> {
            match id {
                "a" => Some(0),
                "b" => Some(1),
                _ => None,
            }
        };
        let ctx = AssignmentContext { wave_of: &wave_of };
        let weights = CostWeights::default();

        let with_bonus = global_objective(&intents, &agents, &assignment, &ctx, &weights).unwrap();

        let weights_no_bonus = CostWeights {
            context_bonus: 0.0,
            ..CostWeights::default()
        };
        let without_bonus =
            global_objective(&intents, &agents, &assignment, &ctx, &weights_no_bonus).unwrap();

        assert!(with_bonus < without_bonus);
    }

    #[test]
    fn deadline_pressure_matches_worked_example() {
        // Scenario 3: latency_weight = 0.1, fast (latency 1) preferred over
        // slow (latency 10); total latency term is 1*0.1 + 1*0.1 = 0.2 when
        // both intents bind to `fast`.
        let weights = CostWeights {
            latency_weight: 0.1,
            ..CostWeights::default()
        };

        let mut fast = cheap_agent();
        fast.name = "fast".to_string();
        fast.latency = 1.0;

        let a = Intent::new("a", Complexity::Moderate, 0.5, 5000);
        let b = Intent::new("b", Complexity::Simple, 0.5, 1500);

        let cost_a = pair_cost(&a, &fast, &weights).unwrap();
        let cost_b = pair_cost(&b, &fast, &weights).unwrap();
        let latency_term = fast.latency * weights.latency_weight * 2.0;
        assert!((latency_term - 0.2).abs() < 1e-9);
        assert!(cost_a > 0.0 && cost_b > 0.0);
    }
}
