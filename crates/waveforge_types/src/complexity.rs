//! Intent complexity tiers.

use serde::{Deserialize, Serialize};

/// Complexity tier of an intent, drawn from the ordered set in the data
/// model. Ordering follows declaration order (`trivial` is the least
/// complex, `epic` the most) so that `Complexity::Complex > Complexity::Simple`
/// reads naturally and the Profile Router's epic tiebreak can compare directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    Trivial,
    Simple,
    Moderate,
    Complex,
    VeryComplex,
    Epic,
}

impl Complexity {
    /// Numeric ordinal, used for logging and as a cheap proxy in metrics.
    pub fn ordinal(&self) -> u8 {
        match self {
            Complexity::Trivial => 0,
            Complexity::Simple => 1,
            Complexity::Moderate => 2,
            Complexity::Complex => 3,
            Complexity::VeryComplex => 4,
            Complexity::Epic => 5,
        }
    }

    /// Story points derived from complexity, per the data model's note that
    /// story points are "derived from complexity" rather than independently set.
    pub fn story_points(&self) -> u32 {
        match self {
            Complexity::Trivial => 1,
            Complexity::Simple => 2,
            Complexity::Moderate => 3,
            Complexity::Complex => 5,
            Complexity::VeryComplex => 8,
            Complexity::Epic => 13,
        }
    }

    /// Parse a complexity tier from a free-form string, case-insensitively,
    /// accepting both `very-complex`/`very_complex`/`verycomplex` spellings.
    pub fn parse(s: &str) -> Option<Complexity> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "trivial" => Some(Complexity::Trivial),
            "simple" => Some(Complexity::Simple),
            "moderate" => Some(Complexity::Moderate),
            "complex" => Some(Complexity::Complex),
            "verycomplex" => Some(Complexity::VeryComplex),
            "epic" => Some(Complexity::Epic),
            _ => None,
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Complexity::Trivial => "trivial",
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
            Complexity::VeryComplex => "very-complex",
            Complexity::Epic => "epic",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphen_and_bare_spellings() {
        assert_eq!(Complexity::parse("very-complex"), Some(Complexity::VeryComplex));
        assert_eq!(Complexity::parse("VeryComplex"), Some(Complexity::VeryComplex));
        assert_eq!(Complexity::parse("epic"), Some(Complexity::Epic));
        assert_eq!(Complexity::parse("unknown"), None);
    }

    #[test]
    fn story_points_increase_monotonically() {
        let tiers = [
            Complexity::Trivial,
            Complexity::Simple,
            Complexity::Moderate,
            Complexity::Complex,
            Complexity::VeryComplex,
            Complexity::Epic,
        ];
        for pair in tiers.windows(2) {
            assert!(pair[0].story_points() < pair[1].story_points());
        }
    }

    #[test]
    fn display_matches_kebab_case() {
        assert_eq!(Complexity::VeryComplex.to_string(), "very-complex");
    }
}
