//! The intent graph: the immutable backlog for one planning session.

use ahash::AHashMap;
use log::debug;

use waveforge_types::{Intent, IntentId};

use crate::error::GraphError;

/// Holds the full intent backlog for a planning session, validated for
/// structural soundness (no duplicate ids, no dangling dependency
/// references) at construction time. Cycle detection is left to the Wave
/// Partitioner, which discovers cycles as a side effect of topological
/// partitioning — see §4.3.
#[derive(Debug, Clone)]
pub struct IntentGraph {
    by_id: AHashMap<IntentId, Intent>,
    /// Insertion order, preserved for deterministic iteration and as the
    /// tie-break source of last resort.
    order: Vec<IntentId>,
    /// Reverse-edge index: intent id -> ids of intents that depend on it.
    successors: AHashMap<IntentId, Vec<IntentId>>,
}

impl IntentGraph {
    /// Build a new intent graph from a flat backlog, validating each
    /// intent and the dependency references between them. An empty
    /// backlog is valid and produces an empty graph, per §8's boundary
    /// cases.
    pub fn new(mut intents: Vec<Intent>) -> Result<Self, GraphError> {
        let mut by_id = AHashMap::default();
        let mut order = Vec::with_capacity(intents.len());

        for (seq, intent) in intents.iter_mut().enumerate() {
            intent.validate()?;
            intent.session_seq = seq as u64;
            if by_id.contains_key(&intent.id) {
                return Err(GraphError::DuplicateIntentId(intent.id.clone()));
            }
            order.push(intent.id.clone());
            by_id.insert(intent.id.clone(), intent.clone());
        }

        for intent in by_id.values() {
            for dep in &intent.depends {
                if !by_id.contains_key(dep) {
                    return Err(GraphError::DanglingDependency {
                        intent: intent.id.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        let mut successors: AHashMap<IntentId, Vec<IntentId>> = AHashMap::default();
        for id in &order {
            successors.entry(id.clone()).or_default();
        }
        for intent in by_id.values() {
            for dep in &intent.depends {
                successors.entry(dep.clone()).or_default().push(intent.id.clone());
            }
        }

        debug!("built intent graph with {} intent(s)", order.len());
        Ok(Self {
            by_id,
            order,
            successors,
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Intent> {
        self.by_id.get(id)
    }

    /// Iterate intents in session insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.order.iter().filter_map(move |id| self.by_id.get(id))
    }

    pub fn ids(&self) -> &[IntentId] {
        &self.order
    }

    /// Direct predecessors (dependencies) of an intent.
    pub fn predecessors(&self, id: &str) -> &[IntentId] {
        self.by_id
            .get(id)
            .map(|intent| intent.depends.as_slice())
            .unwrap_or(&[])
    }

    /// Direct successors (dependents) of an intent.
    pub fn successors(&self, id: &str) -> &[IntentId] {
        self.successors.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waveforge_types::Complexity;

    fn intent(id: &str, deps: &[&str]) -> Intent {
        let mut i = Intent::new(id, Complexity::Simple, 0.5, 100);
        i.depends = deps.iter().map(|s| s.to_string()).collect();
        i
    }

    #[test]
    fn empty_backlog_is_valid() {
        let graph = IntentGraph::new(Vec::new()).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = IntentGraph::new(vec![intent("a", &[]), intent("a", &[])]);
        assert!(matches!(result, Err(GraphError::DuplicateIntentId(_))));
    }

    #[test]
    fn rejects_dangling_dependency() {
        let result = IntentGraph::new(vec![intent("a", &["missing"])]);
        assert!(matches!(
            result,
            Err(GraphError::DanglingDependency { .. })
        ));
    }

    #[test]
    fn successors_are_reverse_of_dependencies() {
        let graph = IntentGraph::new(vec![intent("a", &[]), intent("b", &["a"])]).unwrap();
        assert_eq!(graph.successors("a"), &["b".to_string()]);
        assert_eq!(graph.predecessors("b"), &["a".to_string()]);
    }

    #[test]
    fn preserves_insertion_order() {
        let graph = IntentGraph::new(vec![intent("z", &[]), intent("a", &[])]).unwrap();
        assert_eq!(graph.ids(), &["z".to_string(), "a".to_string()]);
    }
}
