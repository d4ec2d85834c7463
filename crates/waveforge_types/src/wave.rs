//! Wave — an ordered list of intent sets produced by topological partitioning.

use serde::{Deserialize, Serialize};

use crate::intent::IntentId;

/// An ordered list of intent sets, `wave[0], wave[1], …, wave[k]`, satisfying
/// the Wave invariants in §3: every intent appears in exactly one wave, and
/// for every dependency edge `a -> b`, `wave_index(a) < wave_index(b)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wave(pub Vec<Vec<IntentId>>);

impl Wave {
    pub fn new(waves: Vec<Vec<IntentId>>) -> Self {
        Self(waves)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Peak parallelism — the largest wave by intent count.
    pub fn peak_parallelism(&self) -> usize {
        self.0.iter().map(|w| w.len()).max().unwrap_or(0)
    }

    /// Index of the wave containing the most intents; ties break to the
    /// smallest index, per §4.5's bottleneck-wave definition.
    pub fn bottleneck_wave(&self) -> Option<usize> {
        self.0
            .iter()
            .enumerate()
            .max_by_key(|(idx, intents)| (intents.len(), std::cmp::Reverse(*idx)))
            .map(|(idx, _)| idx)
    }

    /// Total number of intents across all waves.
    pub fn total_intents(&self) -> usize {
        self.0.iter().map(|w| w.len()).sum()
    }

    /// Which wave index holds a given intent, if any.
    pub fn wave_of(&self, intent_id: &str) -> Option<usize> {
        self.0
            .iter()
            .position(|wave| wave.iter().any(|id| id == intent_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottleneck_wave_breaks_ties_to_smallest_index() {
        let wave = Wave::new(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ]);
        assert_eq!(wave.bottleneck_wave(), Some(0));
        assert_eq!(wave.peak_parallelism(), 2);
    }

    #[test]
    fn wave_of_finds_containing_wave() {
        let wave = Wave::new(vec![vec!["a".to_string()], vec!["b".to_string()]]);
        assert_eq!(wave.wave_of("b"), Some(1));
        assert_eq!(wave.wave_of("missing"), None);
    }
}
