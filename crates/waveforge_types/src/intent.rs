//! Intent representation — a unit of work routed onto an agent.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::complexity::Complexity;
use crate::error::TypesError;
use crate::TypesResult;

/// Stable identifier for an intent, unique within a planning session.
pub type IntentId = String;

/// A unit of work. See §3 of the specification for the full invariant set;
/// intents are immutable once handed to the core — every mutator here
/// returns a new value rather than mutating in place, except for the
/// internal `session_seq` tie-break field which callers set once at
/// ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier within the planning session.
    pub id: IntentId,
    /// Complexity tier, drawn from the ordered six-value set.
    pub complexity: Complexity,
    /// Minimum agent quality required to serve this intent, in [0,1].
    pub quality_floor: f64,
    /// Estimated token count for the work, a positive integer.
    pub estimated_tokens: u64,
    /// Optional deadline, as an integer timestep. Absence means unbounded.
    pub deadline: Option<u64>,
    /// Identifiers of intents this intent depends on.
    pub depends: Vec<IntentId>,
    /// Free-form tags consumed by the Profile Router.
    pub tags: Vec<String>,
    /// Optional pipeline-stage label.
    pub stage: Option<String>,
    /// Insertion order within the session, used only to break ties
    /// deterministically when no spec'd tie-break rule applies. Never
    /// serialized into the external Plan representation.
    #[serde(skip)]
    pub session_seq: u64,
}

impl Intent {
    /// Construct a new intent with the required fields, defaulting the
    /// optional ones.
    pub fn new(
        id: impl Into<IntentId>,
        complexity: Complexity,
        quality_floor: f64,
        estimated_tokens: u64,
    ) -> Self {
        Self {
            id: id.into(),
            complexity,
            quality_floor,
            estimated_tokens,
            deadline: None,
            depends: Vec::new(),
            tags: Vec::new(),
            stage: None,
            session_seq: 0,
        }
    }

    /// Story points derived from complexity, per the data model.
    pub fn story_points(&self) -> u32 {
        self.complexity.story_points()
    }

    /// Dependency set as a `HashSet`, convenient for graph construction.
    pub fn dependency_set(&self) -> HashSet<IntentId> {
        self.depends.iter().cloned().collect()
    }

    /// Case-insensitive tag membership check, splitting hyphenated tags on
    /// `-` so that `"root-cause"` matches both the full tag and its parts,
    /// per the Profile Router's tag-matching rule.
    pub fn has_tag_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.tags.iter().any(|tag| {
            let tag = tag.to_lowercase();
            if tag == keyword {
                return true;
            }
            tag.split('-').any(|part| part == keyword)
        })
    }

    /// Validate the invariants a well-formed intent must satisfy.
    pub fn validate(&self) -> TypesResult<()> {
        if self.id.is_empty() {
            return Err(TypesError::EmptyIntentId(self.id.clone()));
        }
        if !(0.0..=1.0).contains(&self.quality_floor) {
            return Err(TypesError::InvalidQualityFloor(
                self.id.clone(),
                self.quality_floor,
            ));
        }
        if self.estimated_tokens == 0 {
            return Err(TypesError::InvalidTokenEstimate(self.id.clone(), 0));
        }
        if self.depends.contains(&self.id) {
            return Err(TypesError::SelfDependency(self.id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_matching_splits_hyphenated_tags() {
        let mut intent = Intent::new("i1", Complexity::Simple, 0.5, 100);
        intent.tags = vec!["root-cause".to_string()];
        assert!(intent.has_tag_keyword("root-cause"));
        assert!(intent.has_tag_keyword("root"));
        assert!(intent.has_tag_keyword("cause"));
        assert!(intent.has_tag_keyword("ROOT"));
        assert!(!intent.has_tag_keyword("unrelated"));
    }

    #[test]
    fn validate_rejects_self_dependency() {
        let mut intent = Intent::new("i1", Complexity::Simple, 0.5, 100);
        intent.depends.push("i1".to_string());
        assert!(matches!(
            intent.validate(),
            Err(TypesError::SelfDependency(_))
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_quality_floor() {
        let intent = Intent::new("i1", Complexity::Simple, 1.5, 100);
        assert!(matches!(
            intent.validate(),
            Err(TypesError::InvalidQualityFloor(_, _))
        ));
    }

    #[test]
    fn validate_rejects_zero_tokens() {
        let intent = Intent::new("i1", Complexity::Simple, 0.5, 0);
        assert!(matches!(
            intent.validate(),
            Err(TypesError::InvalidTokenEstimate(_, _))
        ));
    }
}
