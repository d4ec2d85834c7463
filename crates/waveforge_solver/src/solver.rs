//! Greedy baseline plus a bounded branch-and-bound refinement, grounded in
//! the spec's admission that the solver is an interface with a single
//! operation — any algorithm meeting the objective and hard constraints is
//! admissible.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info};

use waveforge_agent_registry::AgentRegistry;
use waveforge_cost_model::{global_objective, pair_cost, AssignmentContext};
use waveforge_types::{Agent, AgentName, Assignment, Intent, Wave};

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::report::SolverReport;

/// Objectives within this tolerance of each other are treated as tied for
/// §4.2's tie-break rule, since they are sums of floating-point terms
/// accumulated along different assignment paths.
const OBJECTIVE_EPSILON: f64 = 1e-9;

/// §4.2's tie-break key: fewer distinct agents first, then
/// lexicographically smaller agent names. Comparing the sorted, deduped
/// name lists element-wise realizes "lexicographically smaller agent
/// names" once the distinct-agent counts already match.
fn tie_break_key(assignment: &Assignment) -> (usize, Vec<&AgentName>) {
    let mut names: Vec<&AgentName> = assignment.0.values().collect();
    names.sort();
    names.dedup();
    (names.len(), names)
}

/// Whether `candidate` should replace `best` as the incumbent: a strictly
/// lower objective always wins; an effectively-equal objective defers to
/// `tie_break_key`.
fn is_better(
    candidate_objective: f64,
    candidate: &Assignment,
    best_objective: f64,
    best: &Assignment,
) -> bool {
    if candidate_objective < best_objective - OBJECTIVE_EPSILON {
        return true;
    }
    if candidate_objective > best_objective + OBJECTIVE_EPSILON {
        return false;
    }
    tie_break_key(candidate) < tie_break_key(best)
}

struct Candidate<'a> {
    intent: &'a Intent,
    /// Eligible agents, pre-sorted by ascending per-pair cost so both the
    /// greedy pass and the branch-and-bound pass try the cheapest options
    /// first.
    eligible: Vec<&'a Agent>,
}

fn agents_by_name(registry: &AgentRegistry) -> HashMap<AgentName, Agent> {
    registry.iter_sorted().map(|a| (a.name.clone(), a.clone())).collect()
}

fn build_candidates<'a>(
    ordered: &[&'a Intent],
    registry: &'a AgentRegistry,
    config: &SolverConfig,
) -> Result<Vec<Candidate<'a>>, SolverError> {
    let mut candidates = Vec::with_capacity(ordered.len());
    let mut infeasible = Vec::new();
    for intent in ordered {
        let floor = config.weights.effective_quality_floor(intent.quality_floor);
        let mut eligible = registry.find_eligible(intent.complexity, floor);
        eligible.sort_by(|a, b| {
            let cost_a = pair_cost(intent, a, &config.weights).unwrap_or(f64::INFINITY);
            let cost_b = pair_cost(intent, b, &config.weights).unwrap_or(f64::INFINITY);
            cost_a
                .partial_cmp(&cost_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        if eligible.is_empty() {
            infeasible.push(intent.id.clone());
            continue;
        }
        candidates.push(Candidate { intent, eligible });
    }
    if !infeasible.is_empty() {
        return Err(SolverError::Infeasible { intents: infeasible });
    }
    Ok(candidates)
}

fn initial_capacity(registry: &AgentRegistry) -> HashMap<AgentName, u32> {
    registry.iter_sorted().map(|a| (a.name.clone(), a.capacity)).collect()
}

/// Build the greedy baseline assignment: process intents in wave order
/// (predecessors therefore always assigned before their dependents, so the
/// context-affinity bonus is available at decision time), picking for each
/// the first capability-eligible agent with remaining capacity from the
/// cost-then-name-sorted candidate list. Filling one agent before spilling
/// onto the next keeps the distinct-agent count minimal, matching the
/// solver's tie-break rule.
fn greedy_assign(
    candidates: &[Candidate],
    capacity: &mut HashMap<AgentName, u32>,
) -> Result<Assignment, SolverError> {
    let mut assignment = Assignment::new();
    let mut exhausted = Vec::new();
    for candidate in candidates {
        let chosen = candidate
            .eligible
            .iter()
            .find(|agent| capacity.get(&agent.name).copied().unwrap_or(0) > 0);
        let Some(agent) = chosen else {
            exhausted.push(candidate.intent.id.clone());
            continue;
        };
        *capacity.get_mut(&agent.name).unwrap() -= 1;
        assignment.insert(candidate.intent.id.clone(), agent.name.clone());
    }
    if !exhausted.is_empty() {
        return Err(SolverError::CapacityExhausted { intents: exhausted });
    }
    Ok(assignment)
}

/// Exhaustive DFS over remaining assignment choices, bounded by wall-clock
/// deadline and node count. Returns `true` only if the search space below
/// this node was fully enumerated (no budget cutoff occurred anywhere in
/// the subtree).
///
/// Determinism (§4.2) holds for identical inputs and seed only when
/// `max_nodes` is the cutoff that actually bites; `deadline` is real
/// wall-clock time and so is not itself a deterministic bound — see
/// [`SolverConfig::time_budget`].
#[allow(clippy::too_many_arguments)]
fn dfs(
    idx: usize,
    candidates: &[Candidate],
    capacity: &mut HashMap<AgentName, u32>,
    current: &mut Assignment,
    intents: &[Intent],
    agents: &HashMap<AgentName, Agent>,
    ctx: &AssignmentContext,
    weights: &waveforge_cost_model::CostWeights,
    best: &mut (Assignment, f64),
    nodes_explored: &mut u64,
    deadline: Instant,
    max_nodes: u64,
) -> bool {
    *nodes_explored += 1;
    if Instant::now() >= deadline || *nodes_explored > max_nodes {
        return false;
    }

    if idx == candidates.len() {
        if let Ok(objective) = global_objective(intents, agents, current, ctx, weights) {
            if is_better(objective, current, best.1, &best.0) {
                best.0 = current.clone();
                best.1 = objective;
            }
        }
        return true;
    }

    let candidate = &candidates[idx];
    let mut exhausted = true;
    for agent in &candidate.eligible {
        let remaining = capacity.get(&agent.name).copied().unwrap_or(0);
        if remaining == 0 {
            continue;
        }
        *capacity.get_mut(&agent.name).unwrap() -= 1;
        current.insert(candidate.intent.id.clone(), agent.name.clone());

        let completed = dfs(
            idx + 1,
            candidates,
            capacity,
            current,
            intents,
            agents,
            ctx,
            weights,
            best,
            nodes_explored,
            deadline,
            max_nodes,
        );
        if !completed {
            exhausted = false;
        }

        current.0.remove(&candidate.intent.id);
        *capacity.get_mut(&agent.name).unwrap() += 1;
    }
    exhausted
}

/// Solve for a capacity- and quality-respecting assignment minimizing the
/// global cost objective. `wave` must already reflect the dependency-order
/// partitioning produced by the Wave Partitioner.
pub fn solve(
    intents: &[Intent],
    registry: &AgentRegistry,
    wave: &Wave,
    config: &SolverConfig,
) -> Result<(Assignment, SolverReport), SolverError> {
    config.weights.validate()?;

    let started = Instant::now();

    let mut ordered: Vec<&Intent> = intents.iter().collect();
    ordered.sort_by_key(|intent| (wave.wave_of(&intent.id).unwrap_or(usize::MAX), intent.session_seq));

    let candidates = build_candidates(&ordered, registry, config)?;
    let mut capacity = initial_capacity(registry);
    let greedy = greedy_assign(&candidates, &mut capacity)?;

    let agents = agents_by_name(registry);
    let wave_of = |id: &str| wave.wave_of(id);
    let ctx = AssignmentContext { wave_of: &wave_of };

    let greedy_objective = global_objective(intents, &agents, &greedy, &ctx, &config.weights)
        .unwrap_or(f64::INFINITY);

    let mut best = (greedy, greedy_objective);
    let mut nodes_explored = 0u64;
    let mut proven_optimal = false;

    if started.elapsed() < config.time_budget {
        let deadline = started + config.time_budget;
        let mut refine_capacity = initial_capacity(registry);
        let mut scratch = Assignment::new();
        let exhausted = dfs(
            0,
            &candidates,
            &mut refine_capacity,
            &mut scratch,
            intents,
            &agents,
            &ctx,
            &config.weights,
            &mut best,
            &mut nodes_explored,
            deadline,
            config.max_nodes,
        );
        proven_optimal = exhausted;
    }

    debug!(
        "solver explored {} nodes, objective {:.4}, proven_optimal={}",
        nodes_explored, best.1, proven_optimal
    );
    info!("solved assignment for {} intents across {} agents", intents.len(), registry.len());

    Ok((
        best.0,
        SolverReport {
            objective_value: best.1,
            wall_time: started.elapsed(),
            proven_optimal,
            nodes_explored,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use waveforge_agent_registry::AgentRegistry;
    use waveforge_intent_graph::IntentGraph;
    use waveforge_types::Complexity;
    use waveforge_wave_partitioner::partition;

    fn cheap_agent(name: &str) -> Agent {
        let mut agent = Agent::new(name, "local-7b", 0.6, 0.001, 5);
        for tier in [Complexity::Trivial, Complexity::Simple, Complexity::Moderate] {
            agent.capabilities.insert(tier.to_string());
        }
        agent
    }

    #[test]
    fn tie_break_prefers_fewer_distinct_agents_at_equal_objective() {
        let mut one_agent = Assignment::new();
        one_agent.insert("a".to_string(), "alpha".to_string());
        one_agent.insert("b".to_string(), "alpha".to_string());

        let mut two_agents = Assignment::new();
        two_agents.insert("a".to_string(), "alpha".to_string());
        two_agents.insert("b".to_string(), "zulu".to_string());

        assert!(is_better(5.0, &one_agent, 5.0, &two_agents));
        assert!(!is_better(5.0, &two_agents, 5.0, &one_agent));
    }

    #[test]
    fn tie_break_prefers_lexicographically_smaller_agent_names_when_counts_match() {
        let mut alpha_bound = Assignment::new();
        alpha_bound.insert("a".to_string(), "alpha".to_string());

        let mut zulu_bound = Assignment::new();
        zulu_bound.insert("a".to_string(), "zulu".to_string());

        assert!(is_better(5.0, &alpha_bound, 5.0, &zulu_bound));
        assert!(!is_better(5.0, &zulu_bound, 5.0, &alpha_bound));
    }

    #[test]
    fn strictly_lower_objective_always_wins_regardless_of_tie_break() {
        let mut cheaper_but_more_agents = Assignment::new();
        cheaper_but_more_agents.insert("a".to_string(), "alpha".to_string());
        cheaper_but_more_agents.insert("b".to_string(), "zulu".to_string());

        let mut pricier_single_agent = Assignment::new();
        pricier_single_agent.insert("a".to_string(), "alpha".to_string());
        pricier_single_agent.insert("b".to_string(), "alpha".to_string());

        assert!(is_better(4.0, &cheaper_but_more_agents, 5.0, &pricier_single_agent));
    }

    #[test]
    fn objectives_within_epsilon_are_treated_as_tied() {
        let mut one_agent = Assignment::new();
        one_agent.insert("a".to_string(), "alpha".to_string());

        let mut two_agents = Assignment::new();
        two_agents.insert("a".to_string(), "zulu".to_string());

        assert!(is_better(5.0, &one_agent, 5.0 + 1e-12, &two_agents));
    }

    #[test]
    fn chain_of_three_binds_all_to_cheap_agent() {
        let a = Intent::new("a", Complexity::Trivial, 0.5, 500);
        let mut b = Intent::new("b", Complexity::Simple, 0.5, 1500);
        b.depends.push("a".to_string());
        let mut c = Intent::new("c", Complexity::Moderate, 0.5, 5000);
        c.depends.push("b".to_string());

        let graph = IntentGraph::new(vec![a.clone(), b.clone(), c.clone()]).unwrap();
        let wave = partition(&graph).unwrap();

        let registry = AgentRegistry::builder()
            .with_agent(cheap_agent("cheap"))
            .unwrap()
            .build();

        let config = SolverConfig::default();
        let (assignment, report) = solve(&[a, b, c], &registry, &wave, &config).unwrap();

        assert_eq!(assignment.agent_for("a"), Some(&"cheap".to_string()));
        assert_eq!(assignment.agent_for("b"), Some(&"cheap".to_string()));
        assert_eq!(assignment.agent_for("c"), Some(&"cheap".to_string()));
        assert!((report.objective_value - 7.0).abs() < 1e-6);
    }

    #[test]
    fn capacity_forced_split_distributes_load_evenly() {
        let intents: Vec<Intent> = (0..6)
            .map(|i| Intent::new(format!("i{i}"), Complexity::Trivial, 0.5, 100))
            .collect();
        let graph = IntentGraph::new(intents.clone()).unwrap();
        let wave = partition(&graph).unwrap();

        let mut agent_a = cheap_agent("agent-a");
        agent_a.capacity = 3;
        let mut agent_b = cheap_agent("agent-b");
        agent_b.capacity = 3;

        let registry = AgentRegistry::builder()
            .with_agent(agent_a)
            .unwrap()
            .with_agent(agent_b)
            .unwrap()
            .build();

        let config = SolverConfig::default();
        let (assignment, _) = solve(&intents, &registry, &wave, &config).unwrap();
        let load = assignment.load_by_agent();
        assert_eq!(load.get("agent-a"), Some(&3));
        assert_eq!(load.get("agent-b"), Some(&3));
    }

    #[test]
    fn capacity_exhausted_reports_every_unplaceable_intent_not_just_the_first() {
        let intents: Vec<Intent> = (0..6)
            .map(|i| Intent::new(format!("i{i}"), Complexity::Trivial, 0.5, 100))
            .collect();
        let graph = IntentGraph::new(intents.clone()).unwrap();
        let wave = partition(&graph).unwrap();

        let mut agent = cheap_agent("only");
        agent.capacity = 3;
        let registry = AgentRegistry::builder().with_agent(agent).unwrap().build();

        let config = SolverConfig::default();
        let result = solve(&intents, &registry, &wave, &config);
        match result {
            Err(SolverError::CapacityExhausted { intents }) => {
                assert_eq!(intents.len(), 3);
            }
            other => panic!("expected CapacityExhausted naming every unplaceable intent, got {other:?}"),
        }
    }

    #[test]
    fn infeasible_quality_floor_names_the_intent() {
        let intent = Intent::new("i1", Complexity::Epic, 0.95, 100);
        let graph = IntentGraph::new(vec![intent.clone()]).unwrap();
        let wave = partition(&graph).unwrap();

        let mut agent = cheap_agent("only");
        agent.quality = 0.8;
        let registry = AgentRegistry::builder().with_agent(agent).unwrap().build();

        let config = SolverConfig::default();
        let result = solve(&[intent], &registry, &wave, &config);
        assert_eq!(
            result,
            Err(SolverError::Infeasible { intents: vec!["i1".to_string()] })
        );
    }

    #[test]
    fn infeasible_reports_every_offending_intent_not_just_the_first() {
        let i1 = Intent::new("i1", Complexity::Epic, 0.95, 100);
        let i2 = Intent::new("i2", Complexity::VeryComplex, 0.95, 100);
        let graph = IntentGraph::new(vec![i1.clone(), i2.clone()]).unwrap();
        let wave = partition(&graph).unwrap();

        let mut agent = cheap_agent("only");
        agent.quality = 0.8;
        let registry = AgentRegistry::builder().with_agent(agent).unwrap().build();

        let config = SolverConfig::default();
        let result = solve(&[i1, i2], &registry, &wave, &config);
        match result {
            Err(SolverError::Infeasible { intents }) => {
                assert_eq!(intents, vec!["i1".to_string(), "i2".to_string()]);
            }
            other => panic!("expected Infeasible with both intents, got {other:?}"),
        }
    }

    #[test]
    fn negative_weight_is_rejected_before_any_cost_computation() {
        let intent = Intent::new("a", Complexity::Trivial, 0.5, 500);
        let graph = IntentGraph::new(vec![intent.clone()]).unwrap();
        let wave = partition(&graph).unwrap();
        let registry = AgentRegistry::builder().with_agent(cheap_agent("cheap")).unwrap().build();

        let config = SolverConfig {
            weights: waveforge_cost_model::CostWeights {
                latency_weight: -1.0,
                ..waveforge_cost_model::CostWeights::default()
            },
            ..SolverConfig::default()
        };

        let result = solve(&[intent], &registry, &wave, &config);
        assert!(matches!(result, Err(SolverError::InvalidWeights(_))));
    }

    #[test]
    fn identical_inputs_under_a_node_bound_solve_identically_every_time() {
        // A generous time_budget keeps the node bound, not the wall clock,
        // as the cutoff that actually binds here, so this exercises the
        // determinism guarantee §4.2 makes for that case.
        let intents: Vec<Intent> = (0..5)
            .map(|i| Intent::new(format!("i{i}"), Complexity::Trivial, 0.5, 100 * (i + 1)))
            .collect();
        let graph = IntentGraph::new(intents.clone()).unwrap();
        let wave = partition(&graph).unwrap();

        let registry = AgentRegistry::builder()
            .with_agent(cheap_agent("alpha"))
            .unwrap()
            .with_agent(cheap_agent("zulu"))
            .unwrap()
            .build();

        let config = SolverConfig {
            time_budget: Duration::from_secs(5),
            max_nodes: 200,
            ..SolverConfig::default()
        };

        let (first, first_report) = solve(&intents, &registry, &wave, &config).unwrap();
        let (second, second_report) = solve(&intents, &registry, &wave, &config).unwrap();

        assert_eq!(first, second);
        assert!((first_report.objective_value - second_report.objective_value).abs() < 1e-9);
    }
}
