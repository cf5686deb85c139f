//! Composite risk scoring.
//!
//! Every factor is mapped onto 0..=100 by a fixed threshold ladder (higher is
//! safer) and the sub-scores are combined into one bounded score. The
//! thresholds are calibration constants and must not be tuned casually.

pub mod asset;
pub mod pool;
pub mod position;

pub use asset::{AssetRiskInputs, asset_risk_score};
pub use pool::{PoolRiskInputs, pool_risk_score};
pub use position::{PositionRiskInputs, position_risk_score};

use crate::enums::RiskCategory;
use serde::{Deserialize, Serialize};

/// Score substituted for a missing input so averages stay comparable.
pub const NEUTRAL_SUB_SCORE: f64 = 50.0;

/// Top rung of a threshold ladder.
pub const FULL_SCORE: f64 = 100.0;
/// Middle rung of a threshold ladder.
pub const HALF_SCORE: f64 = 50.0;

/// Lower bounds of each category, checked from safest down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBands {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
}

impl CategoryBands {
    /// Bands for the asset and position composites.
    pub const COMPOSITE: Self = Self {
        low: 75.0,
        moderate: 50.0,
        high: 25.0,
    };

    /// Bands for the pool quality score.
    pub const POOL: Self = Self {
        low: 70.0,
        moderate: 50.0,
        high: 30.0,
    };

    #[must_use]
    pub fn categorize(&self, score: f64) -> RiskCategory {
        if score >= self.low {
            RiskCategory::Low
        } else if score >= self.moderate {
            RiskCategory::Moderate
        } else if score >= self.high {
            RiskCategory::High
        } else {
            RiskCategory::Critical
        }
    }
}

/// Full marks on `best`, half on `fair`, nothing otherwise.
pub(crate) fn ladder(best: bool, fair: bool) -> f64 {
    if best {
        FULL_SCORE
    } else if fair {
        HALF_SCORE
    } else {
        0.0
    }
}

/// Drops NaN and infinite readings so they count as missing.
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
