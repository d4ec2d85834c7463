//! Kahn's-algorithm wave partitioning.

use std::collections::VecDeque;

use ahash::AHashMap;
use log::debug;

use waveforge_intent_graph::IntentGraph;
use waveforge_types::{IntentId, Wave};

use crate::error::PartitionError;

/// Partition an intent graph into dependency-respecting parallel waves.
/// Each wave is the set of intents whose remaining dependencies were all
/// satisfied by the previous waves — the classic BFS-level topological
/// sort. An empty graph yields an empty wave list, per §8's boundary case.
pub fn partition(graph: &IntentGraph) -> Result<Wave, PartitionError> {
    let mut in_degree: AHashMap<IntentId, usize> = AHashMap::default();
    for id in graph.ids() {
        in_degree.insert(id.clone(), graph.predecessors(id).len());
    }

    // Seed from session insertion order rather than hash order, so output
    // is deterministic across runs.
    let mut queue: VecDeque<IntentId> = graph
        .ids()
        .iter()
        .filter(|id| in_degree.get(*id).copied() == Some(0))
        .cloned()
        .collect();

    let mut waves: Vec<Vec<IntentId>> = Vec::new();
    let mut consumed = 0usize;

    while !queue.is_empty() {
        let mut current_wave: Vec<IntentId> = queue.drain(..).collect();
        current_wave.sort();
        consumed += current_wave.len();

        let mut next_queue = Vec::new();
        for id in &current_wave {
            for successor in graph.successors(id) {
                if let Some(degree) = in_degree.get_mut(successor) {
                    *degree -= 1;
                    if *degree == 0 {
                        next_queue.push(successor.clone());
                    }
                }
            }
        }

        waves.push(current_wave);
        next_queue.sort();
        queue = next_queue.into();
    }

    if consumed != graph.len() {
        let mut remaining: Vec<IntentId> = in_degree
            .into_iter()
            .filter(|(_, degree)| *degree > 0)
            .map(|(id, _)| id)
            .collect();
        remaining.sort();
        let cycle = find_cycle_path(&remaining, graph);
        let intent = cycle.first().cloned().unwrap_or_default();
        return Err(PartitionError::DependencyCycle { intent, cycle });
    }

    debug!("partitioned {} intents into {} waves", graph.len(), waves.len());
    Ok(Wave::new(waves))
}

/// Walk dependency edges within the `remaining` (never-resolved) subgraph
/// starting from its smallest id until a node repeats, yielding the
/// concrete cycle path (first element repeated at the end). `remaining`
/// is sorted for determinism; every node in it has at least one
/// dependency also in `remaining`, since in-degree never reached zero.
fn find_cycle_path(remaining: &[IntentId], graph: &IntentGraph) -> Vec<IntentId> {
    use std::collections::HashSet;

    let Some(start) = remaining.first() else {
        return Vec::new();
    };
    let remaining_set: HashSet<&IntentId> = remaining.iter().collect();

    let mut path = vec![start.clone()];
    let mut current = start.clone();
    for _ in 0..=remaining.len() {
        let Some(next) = graph
            .predecessors(&current)
            .iter()
            .find(|dep| remaining_set.contains(dep))
        else {
            break;
        };
        if let Some(cycle_start) = path.iter().position(|id| id == next) {
            let mut cycle = path[cycle_start..].to_vec();
            cycle.push(next.clone());
            return cycle;
        }
        path.push(next.clone());
        current = next.clone();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use waveforge_types::Complexity;
    use waveforge_types::Intent;

    fn intent(id: &str, deps: &[&str]) -> Intent {
        let mut i = Intent::new(id, Complexity::Simple, 0.5, 100);
        i.depends = deps.iter().map(|s| s.to_string()).collect();
        i
    }

    #[test]
    fn empty_graph_yields_empty_wave_list() {
        let graph = IntentGraph::new(Vec::new()).unwrap();
        let wave = partition(&graph).unwrap();
        assert!(wave.is_empty());
    }

    #[test]
    fn linear_chain_produces_one_intent_per_wave() {
        let graph = IntentGraph::new(vec![
            intent("a", &[]),
            intent("b", &["a"]),
            intent("c", &["b"]),
        ])
        .unwrap();
        let wave = partition(&graph).unwrap();
        assert_eq!(wave.0, vec![vec!["a"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn independent_intents_share_one_wave() {
        let graph = IntentGraph::new(vec![intent("a", &[]), intent("b", &[])]).unwrap();
        let wave = partition(&graph).unwrap();
        assert_eq!(wave.len(), 1);
        assert_eq!(wave.0[0], vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn diamond_shape_partitions_into_three_waves() {
        let graph = IntentGraph::new(vec![
            intent("a", &[]),
            intent("b", &["a"]),
            intent("c", &["a"]),
            intent("d", &["b", "c"]),
        ])
        .unwrap();
        let wave = partition(&graph).unwrap();
        assert_eq!(wave.len(), 3);
        assert_eq!(wave.0[1], vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn cycle_is_reported_with_an_intent_and_its_path() {
        let graph = IntentGraph::new(vec![intent("a", &["b"]), intent("b", &["a"])]).unwrap();
        let result = partition(&graph);
        match result {
            Err(PartitionError::DependencyCycle { intent, cycle }) => {
                assert!(["a", "b"].contains(&intent.as_str()));
                assert!(cycle.len() >= 2);
                assert_eq!(cycle.first(), cycle.last());
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn three_node_cycle_names_a_member_and_full_path() {
        let graph = IntentGraph::new(vec![
            intent("a", &["c"]),
            intent("b", &["a"]),
            intent("c", &["b"]),
        ])
        .unwrap();
        let result = partition(&graph);
        match result {
            Err(PartitionError::DependencyCycle { intent, cycle }) => {
                assert!(["a", "b", "c"].contains(&intent.as_str()));
                assert_eq!(cycle.len(), 4);
                assert_eq!(cycle.first(), cycle.last());
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }
}
