use serde::{Deserialize, Serialize};

/// Valuation of a constant-product position against holding the assets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolValuation {
    /// Value of the pool share in quote currency.
    pub pool_value: f64,
    /// Value of the entry bundle had it never been deposited.
    pub value_if_held: f64,
    /// Shortfall of `pool_value` against `value_if_held`, in percent.
    pub impermanent_loss_pct: f64,
}

impl PoolValuation {
    /// Valuation returned when inputs cannot be priced: the investment, unchanged.
    #[must_use]
    pub fn fallback(investment: f64) -> Self {
        Self {
            pool_value: investment,
            value_if_held: investment,
            impermanent_loss_pct: 0.0,
        }
    }

    /// Absolute loss against holding, in quote currency.
    #[must_use]
    pub fn loss_vs_hold(&self) -> f64 {
        self.value_if_held - self.pool_value
    }
}

/// Projected pool value at a horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Projected value in quote currency.
    pub value: f64,
    /// Impermanent loss at the horizon's implied prices, in percent.
    pub impermanent_loss_pct: f64,
}

impl ProjectionResult {
    #[must_use]
    pub fn new(value: f64, impermanent_loss_pct: f64) -> Self {
        Self {
            value,
            impermanent_loss_pct,
        }
    }
}
