//! Orchestrates the Wave Partitioner, Profile Router and Assignment Solver
//! into a single serializable [`Plan`].

use std::collections::HashMap;

use log::info;

use waveforge_agent_registry::AgentRegistry;
use waveforge_cost_model::pair_cost;
use waveforge_intent_graph::IntentGraph;
use waveforge_profile_router::route;
use waveforge_solver::{solve, SolverConfig};
use waveforge_types::{Intent, Plan, PlanIntent, PlanWave};
use waveforge_wave_partitioner::partition;

use crate::critical_path::critical_path;
use crate::error::PlanBuilderError;

/// Build a [`Plan`] for a fresh intent backlog. An empty backlog yields
/// [`Plan::empty`], per §8's boundary case.
pub fn build_plan(
    intents: Vec<Intent>,
    registry: &AgentRegistry,
    solver_config: &SolverConfig,
) -> Result<Plan, PlanBuilderError> {
    if intents.is_empty() {
        return Ok(Plan::empty());
    }

    let graph = IntentGraph::new(intents)?;
    let ordered: Vec<Intent> = graph.iter().cloned().collect();

    let wave = partition(&graph)?;
    let (assignment, _report) = solve(&ordered, registry, &wave, solver_config)?;

    let mut profile_load: HashMap<String, usize> = HashMap::new();
    let mut total_estimated_cost = 0.0;
    let mut total_estimated_tokens = 0u64;

    let mut plan_intents_by_wave: Vec<Vec<PlanIntent>> = vec![Vec::new(); wave.len()];

    for intent in &ordered {
        let agent_name = assignment
            .agent_for(&intent.id)
            .cloned()
            .unwrap_or_default();
        let agent = registry.get(&agent_name);
        let profile = route(intent);
        *profile_load.entry(profile.to_string()).or_insert(0) += 1;

        let estimated_cost = agent
            .map(|agent| pair_cost(intent, agent, &solver_config.weights).unwrap_or(0.0))
            .unwrap_or(0.0);
        total_estimated_cost += estimated_cost;
        total_estimated_tokens += intent.estimated_tokens;

        let wave_index = wave.wave_of(&intent.id).unwrap_or(0);
        plan_intents_by_wave[wave_index].push(PlanIntent {
            id: intent.id.clone(),
            profile,
            model: agent_name.clone(),
            workflow: profile.to_string(),
            complexity: intent.complexity,
            estimated_tokens: intent.estimated_tokens,
            estimated_cost,
            depends_on: intent.depends.clone(),
            wave: wave_index,
        });
    }

    let waves: Vec<PlanWave> = plan_intents_by_wave
        .into_iter()
        .enumerate()
        .map(|(index, mut intents)| {
            intents.sort_by(|a, b| a.id.cmp(&b.id));
            let agents_needed = intents
                .iter()
                .map(|i| i.model.clone())
                .collect::<std::collections::HashSet<_>>()
                .len();
            let estimated_cost = intents.iter().map(|i| i.estimated_cost).sum();
            PlanWave {
                wave: index,
                agents_needed,
                estimated_cost,
                intents,
            }
        })
        .collect();

    let plan = Plan {
        total_intents: ordered.len(),
        total_waves: wave.len(),
        peak_parallelism: wave.peak_parallelism(),
        serial_depth: wave.len(),
        bottleneck_wave: wave.bottleneck_wave(),
        critical_path: critical_path(&graph, registry, &assignment),
        total_estimated_cost,
        total_estimated_tokens,
        profile_load,
        waves,
    };

    info!(
        "built plan: {} intents, {} waves, peak parallelism {}, estimated cost {:.4}",
        plan.total_intents, plan.total_waves, plan.peak_parallelism, plan.total_estimated_cost
    );

    Ok(plan)
}
