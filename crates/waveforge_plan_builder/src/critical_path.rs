//! Longest-by-estimated-duration chain through the dependency graph.

use ahash::AHashMap;

use waveforge_agent_registry::AgentRegistry;
use waveforge_intent_graph::IntentGraph;
use waveforge_types::{Assignment, IntentId};

fn duration_of(graph: &IntentGraph, registry: &AgentRegistry, assignment: &Assignment, id: &str) -> f64 {
    let Some(intent) = graph.get(id) else {
        return 0.0;
    };
    let Some(agent_name) = assignment.agent_for(id) else {
        return 0.0;
    };
    let Some(agent) = registry.get(agent_name) else {
        return 0.0;
    };
    intent.estimated_tokens as f64 / agent.throughput()
}

/// Compute, for every intent, the total duration of the longest chain
/// ending at it, and the predecessor on that chain (ties broken toward the
/// smallest predecessor id, per §4.5). Returns `(best_total, predecessor)`
/// keyed by intent id.
fn longest_paths(
    graph: &IntentGraph,
    registry: &AgentRegistry,
    assignment: &Assignment,
) -> AHashMap<IntentId, (f64, Option<IntentId>)> {
    let mut memo: AHashMap<IntentId, (f64, Option<IntentId>)> = AHashMap::default();

    // `graph.ids()` is in session insertion order, not topological order, so
    // resolve recursively with memoization rather than a single forward pass.
    fn resolve(
        id: &str,
        graph: &IntentGraph,
        registry: &AgentRegistry,
        assignment: &Assignment,
        memo: &mut AHashMap<IntentId, (f64, Option<IntentId>)>,
    ) -> (f64, Option<IntentId>) {
        if let Some(cached) = memo.get(id) {
            return cached.clone();
        }
        let own_duration = duration_of(graph, registry, assignment, id);
        let predecessors = graph.predecessors(id).to_vec();

        let mut best_total = own_duration;
        let mut best_predecessor: Option<IntentId> = None;

        let mut predecessors_sorted = predecessors;
        predecessors_sorted.sort();
        for predecessor in predecessors_sorted {
            let (predecessor_total, _) = resolve(&predecessor, graph, registry, assignment, memo);
            let candidate_total = predecessor_total + own_duration;
            if candidate_total > best_total {
                best_total = candidate_total;
                best_predecessor = Some(predecessor);
            }
        }

        let result = (best_total, best_predecessor);
        memo.insert(id.to_string(), result.clone());
        result
    }

    for id in graph.ids() {
        resolve(id, graph, registry, assignment, &mut memo);
    }
    memo
}

/// The longest-duration chain of intents through the dependency graph,
/// earliest intent first. Ties on total duration break to the
/// lexicographically smallest terminal intent id.
pub fn critical_path(graph: &IntentGraph, registry: &AgentRegistry, assignment: &Assignment) -> Vec<IntentId> {
    if graph.is_empty() {
        return Vec::new();
    }

    let paths = longest_paths(graph, registry, assignment);

    let mut ids: Vec<&IntentId> = graph.ids().iter().collect();
    ids.sort();

    let terminal = ids
        .into_iter()
        .max_by(|a, b| {
            let total_a = paths.get(*a).map(|(t, _)| *t).unwrap_or(0.0);
            let total_b = paths.get(*b).map(|(t, _)| *t).unwrap_or(0.0);
            total_a
                .partial_cmp(&total_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.cmp(a))
        })
        .cloned();

    let Some(mut current) = terminal else {
        return Vec::new();
    };

    let mut chain = vec![current.clone()];
    while let Some((_, Some(predecessor))) = paths.get(&current) {
        chain.push(predecessor.clone());
        current = predecessor.clone();
    }
    chain.reverse();
    chain
}
