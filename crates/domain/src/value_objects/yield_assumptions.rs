use crate::error::{InputError, ensure_finite};
use serde::{Deserialize, Serialize};

/// Yield and price-drift assumptions for a projection.
///
/// All figures are annual percentages. Drift is applied linearly per month,
/// not compounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YieldAssumptions {
    /// Annual percentage yield credited to the pool.
    pub apy: f64,
    /// Expected annual price change of asset 1, in percent.
    #[serde(default)]
    pub expected_price_change_1: f64,
    /// Expected annual price change of asset 2, in percent.
    #[serde(default)]
    pub expected_price_change_2: f64,
}

impl YieldAssumptions {
    /// Creates assumptions with yield only.
    #[must_use]
    pub fn new(apy: f64) -> Self {
        Self {
            apy,
            ..Self::default()
        }
    }

    /// Sets the expected annual price changes.
    #[must_use]
    pub fn with_price_changes(mut self, change_1: f64, change_2: f64) -> Self {
        self.expected_price_change_1 = change_1;
        self.expected_price_change_2 = change_2;
        self
    }

    /// Monthly compounding rate as a fraction.
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        self.apy / 100.0 / 12.0
    }

    /// True when either asset is expected to move.
    #[must_use]
    pub fn has_drift(&self) -> bool {
        self.expected_price_change_1 != 0.0 || self.expected_price_change_2 != 0.0
    }

    pub fn validate(&self) -> Result<(), InputError> {
        ensure_finite("apy", self.apy)?;
        ensure_finite("expected_price_change_1", self.expected_price_change_1)?;
        ensure_finite("expected_price_change_2", self.expected_price_change_2)
    }
}
