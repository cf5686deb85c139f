use crate::error::{InputError, ensure_non_negative, ensure_positive};
use crate::math::constant_product::pool_value;
use crate::value_objects::projection::PoolValuation;
use serde::{Deserialize, Serialize};

/// A 50/50 two-asset constant-product liquidity position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolPosition {
    /// Price of asset 1 at entry.
    pub initial_price_1: f64,
    /// Price of asset 2 at entry.
    pub initial_price_2: f64,
    /// Price of asset 1 now.
    pub current_price_1: f64,
    /// Price of asset 2 now.
    pub current_price_2: f64,
    /// Capital committed at entry, in quote currency.
    pub investment: f64,
    /// Entering now: entry prices are taken equal to current prices.
    #[serde(default)]
    pub is_new_pool: bool,
}

impl PoolPosition {
    /// Creates a position that was opened at `initial_*` and is valued at `current_*`.
    #[must_use]
    pub fn new(
        initial_price_1: f64,
        initial_price_2: f64,
        current_price_1: f64,
        current_price_2: f64,
        investment: f64,
    ) -> Self {
        Self {
            initial_price_1,
            initial_price_2,
            current_price_1,
            current_price_2,
            investment,
            is_new_pool: false,
        }
    }

    /// Creates a position entered at today's prices.
    #[must_use]
    pub fn new_pool(price_1: f64, price_2: f64, investment: f64) -> Self {
        Self {
            initial_price_1: price_1,
            initial_price_2: price_2,
            current_price_1: price_1,
            current_price_2: price_2,
            investment,
            is_new_pool: true,
        }
    }

    /// Entry prices used for valuation.
    #[must_use]
    pub fn entry_prices(&self) -> (f64, f64) {
        if self.is_new_pool {
            (self.current_price_1, self.current_price_2)
        } else {
            (self.initial_price_1, self.initial_price_2)
        }
    }

    /// Current prices.
    #[must_use]
    pub fn current_prices(&self) -> (f64, f64) {
        (self.current_price_1, self.current_price_2)
    }

    /// Values the position at its current prices.
    #[must_use]
    pub fn valuation(&self) -> PoolValuation {
        let (p1_0, p2_0) = self.entry_prices();
        pool_value(
            self.investment,
            p1_0,
            p2_0,
            self.current_price_1,
            self.current_price_2,
        )
    }

    /// Reports the first field that would force a fallback valuation.
    pub fn validate(&self) -> Result<(), InputError> {
        ensure_positive("investment", self.investment)?;
        if self.is_new_pool {
            ensure_positive("current_price_1", self.current_price_1)?;
            ensure_positive("current_price_2", self.current_price_2)?;
        } else {
            ensure_positive("initial_price_1", self.initial_price_1)?;
            ensure_positive("initial_price_2", self.initial_price_2)?;
            // zero values that leg at nothing
            ensure_non_negative("current_price_1", self.current_price_1)?;
            ensure_non_negative("current_price_2", self.current_price_2)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_uses_current_prices() {
        let mut position = PoolPosition::new_pool(2.0, 3.0, 1000.0);
        position.initial_price_1 = 0.0;
        assert_eq!(position.entry_prices(), (2.0, 3.0));
        assert!(position.validate().is_ok());
        assert!((position.valuation().pool_value - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_reports_zero_price() {
        let position = PoolPosition::new(1.0, 0.0, 1.0, 1.0, 1000.0);
        assert_eq!(
            position.validate(),
            Err(InputError::NonPositive {
                field: "initial_price_2",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_validate_accepts_worthless_current_price() {
        let position = PoolPosition::new(1.0, 1.0, 0.0, 1.0, 1000.0);
        assert!(position.validate().is_ok());
        assert_eq!(position.valuation().pool_value, 0.0);

        let position = PoolPosition::new(1.0, 1.0, -0.5, 1.0, 1000.0);
        assert_eq!(
            position.validate(),
            Err(InputError::Negative {
                field: "current_price_1",
                value: -0.5
            })
        );
    }

    #[test]
    fn test_deserialize_defaults_new_pool_flag() {
        let json = r#"{
            "initial_price_1": 1.0,
            "initial_price_2": 1.0,
            "current_price_1": 2.0,
            "current_price_2": 1.0,
            "investment": 500.0
        }"#;
        let position: PoolPosition = serde_json::from_str(json).unwrap();
        assert!(!position.is_new_pool);
        assert_eq!(position.current_prices(), (2.0, 1.0));
    }
}
