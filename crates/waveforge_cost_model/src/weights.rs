//! Configurable weight knobs for the cost objective.

use serde::{Deserialize, Serialize};

use crate::error::CostModelError;

/// Weight knobs for the four additive cost terms, plus the soft-constraint
/// knobs the solver layers atop the base objective. Defaults match §6's
/// Configuration surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostWeights {
    /// Multiplier on the overkill penalty. Default 2.0.
    pub overkill_weight: f64,
    /// Multiplier on the latency penalty.
    pub latency_weight: f64,
    /// Multiplier on the deadline penalty.
    pub deadline_weight: f64,
    /// Flat bonus subtracted when a dependent intent binds to the same
    /// agent as its predecessor. Default 0.5.
    pub context_bonus: f64,
    /// Time-per-wave constant used to convert a wave index into a
    /// completion timestep for deadline scoring.
    pub time_per_wave: f64,
    /// Optional dollar ceiling; above it, a quadratic penalty applies.
    pub budget_cap: Option<f64>,
    /// Optional override that raises the effective quality floor for every
    /// intent above whatever it declares.
    pub quality_floor_override: Option<f64>,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            overkill_weight: 2.0,
            latency_weight: 1.0,
            deadline_weight: 1.0,
            context_bonus: 0.5,
            time_per_wave: 1.0,
            budget_cap: None,
            quality_floor_override: None,
        }
    }
}

impl CostWeights {
    /// Validate that every weight is non-negative, per §7's configuration
    /// error taxonomy.
    pub fn validate(&self) -> Result<(), CostModelError> {
        let checks: [(&'static str, f64); 4] = [
            ("overkill_weight", self.overkill_weight),
            ("latency_weight", self.latency_weight),
            ("deadline_weight", self.deadline_weight),
            ("context_bonus", self.context_bonus),
        ];
        for (name, value) in checks {
            if value < 0.0 {
                return Err(CostModelError::NegativeWeight { name, value });
            }
        }
        Ok(())
    }

    /// The effective quality floor for an intent: the declared floor,
    /// raised by `quality_floor_override` if it is higher.
    pub fn effective_quality_floor(&self, declared: f64) -> f64 {
        match self.quality_floor_override {
            Some(floor) => declared.max(floor),
            None => declared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_weight() {
        let weights = CostWeights {
            latency_weight: -1.0,
            ..CostWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(CostModelError::NegativeWeight { name: "latency_weight", .. })
        ));
    }

    #[test]
    fn override_raises_but_never_lowers_floor() {
        let weights = CostWeights {
            quality_floor_override: Some(0.8),
            ..CostWeights::default()
        };
        assert_eq!(weights.effective_quality_floor(0.5), 0.8);
        assert_eq!(weights.effective_quality_floor(0.9), 0.9);
    }
}
