use crate::enums::{RiskCategory, RiskFactor};
use crate::math::rounding::round_dp;
use crate::metrics::risk::CategoryBands;
use serde::{Deserialize, Serialize};

/// One normalized input to a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub factor: RiskFactor,
    /// Normalized score on 0..=100.
    pub score: f64,
    /// Relative weight in the composite.
    pub weight: f64,
    /// False when the input was missing and a neutral score was substituted.
    pub provided: bool,
}

impl SubScore {
    #[must_use]
    pub fn new(factor: RiskFactor, score: f64, weight: f64) -> Self {
        Self {
            factor,
            score,
            weight,
            provided: true,
        }
    }

    /// Neutral placeholder for a missing input.
    #[must_use]
    pub fn missing(factor: RiskFactor, weight: f64) -> Self {
        Self {
            factor,
            score: crate::metrics::risk::NEUTRAL_SUB_SCORE,
            weight,
            provided: false,
        }
    }
}

/// Bounded composite score with its category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Composite score on 0..=100; higher is safer.
    pub score: f64,
    pub category: RiskCategory,
    pub components: Vec<SubScore>,
}

impl RiskScore {
    /// Combines sub-scores as a weighted mean and labels the result.
    #[must_use]
    pub fn from_components(components: Vec<SubScore>, bands: CategoryBands) -> Self {
        let total_weight: f64 = components.iter().map(|c| c.weight).sum();
        let score = if total_weight > 0.0 {
            components.iter().map(|c| c.score * c.weight).sum::<f64>() / total_weight
        } else {
            crate::metrics::risk::NEUTRAL_SUB_SCORE
        };
        let score = round_dp(score.clamp(0.0, 100.0), 2);

        Self {
            score,
            category: bands.categorize(score),
            components,
        }
    }

    /// Number of components backed by a real input.
    #[must_use]
    pub fn provided_count(&self) -> usize {
        self.components.iter().filter(|c| c.provided).count()
    }
}
