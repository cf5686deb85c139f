//! Future value of a pool position under yield and price drift.
//!
//! Yield compounds monthly on the pool value. Price drift is extrapolated
//! linearly and enters as the change in pool value it causes; the two
//! effects are summed rather than simulated jointly.

use crate::math::constant_product::pool_value;
use crate::math::rounding::round_currency;
use crate::metrics::impermanent_loss::impermanent_loss;
use crate::value_objects::pool_position::PoolPosition;
use crate::value_objects::projection::{PoolValuation, ProjectionResult};
use crate::value_objects::yield_assumptions::YieldAssumptions;
use tracing::debug;

/// Price after `months` of linear drift at `annual_change_pct` per year,
/// floored at zero.
pub fn drifted_price(price: f64, annual_change_pct: f64, months: u32) -> f64 {
    (price * (1.0 + f64::from(months) * (annual_change_pct / 100.0 / 12.0))).max(0.0)
}

/// Unrounded state of a position at a horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    /// Compounded value plus the drift-driven change in pool value.
    pub value: f64,
    /// Drifted price of asset 1.
    pub price_1: f64,
    /// Drifted price of asset 2.
    pub price_2: f64,
    /// Valuation at the drifted prices.
    pub drifted: PoolValuation,
}

/// Evaluates the position `months` ahead without rounding.
pub fn horizon(position: &PoolPosition, assumptions: &YieldAssumptions, months: u32) -> Horizon {
    let (p1_0, p2_0) = position.entry_prices();
    let (p1, p2) = position.current_prices();

    let today = pool_value(position.investment, p1_0, p2_0, p1, p2);
    let compounded =
        today.pool_value * (1.0 + assumptions.monthly_rate()).powf(f64::from(months));

    let price_1 = drifted_price(p1, assumptions.expected_price_change_1, months);
    let price_2 = drifted_price(p2, assumptions.expected_price_change_2, months);
    let drifted = pool_value(position.investment, p1_0, p2_0, price_1, price_2);

    Horizon {
        value: compounded + (drifted.pool_value - today.pool_value),
        price_1,
        price_2,
        drifted,
    }
}

/// Projects the position's value `months` forward.
///
/// # Arguments
///
/// * `position` - The pool position; new pools start from entry = current prices
/// * `assumptions` - APY and expected annual price changes, in percent
/// * `months` - Horizon in months
///
/// # Returns
///
/// * `ProjectionResult` - value rounded to cents, and the impermanent loss at
///   the drifted horizon prices. `months == 0` returns today's value and IL;
///   negative horizons return the investment with zero IL.
pub fn future_value(
    position: &PoolPosition,
    assumptions: &YieldAssumptions,
    months: i32,
) -> ProjectionResult {
    let Ok(months) = u32::try_from(months) else {
        debug!(months, "negative horizon, returning investment unchanged");
        return ProjectionResult::new(position.investment, 0.0);
    };

    let (p1_0, p2_0) = position.entry_prices();

    if months == 0 {
        let today = position.valuation();
        let il = impermanent_loss(
            p1_0,
            p2_0,
            position.current_price_1,
            position.current_price_2,
            position.investment,
        );
        return ProjectionResult::new(round_currency(today.pool_value), il);
    }

    let at_horizon = horizon(position, assumptions, months);
    let il = impermanent_loss(
        p1_0,
        p2_0,
        at_horizon.price_1,
        at_horizon.price_2,
        position.investment,
    );

    ProjectionResult::new(round_currency(at_horizon.value), il)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_apy_zero_drift_keeps_value() {
        let position = PoolPosition::new(1.0, 1.0, 2.0, 1.0, 10_000.0);
        let today = round_currency(position.valuation().pool_value);
        let assumptions = YieldAssumptions::new(0.0);
        for months in [1, 6, 12, 60] {
            let result = future_value(&position, &assumptions, months);
            assert_eq!(result.value, today);
            assert_eq!(result.impermanent_loss_pct, 5.72);
        }
    }

    #[test]
    fn test_yield_compounds_monthly() {
        let position = PoolPosition::new_pool(1.0, 1.0, 10_000.0);
        let assumptions = YieldAssumptions::new(12.0);
        let result = future_value(&position, &assumptions, 12);
        // 10000 * 1.01^12
        assert_eq!(result.value, 11_268.25);
        assert_eq!(result.impermanent_loss_pct, 0.0);
    }

    #[test]
    fn test_zero_months_short_circuits() {
        let position = PoolPosition::new(1.0, 1.0, 2.0, 1.0, 10_000.0);
        let assumptions = YieldAssumptions::new(50.0).with_price_changes(100.0, -20.0);
        let result = future_value(&position, &assumptions, 0);
        assert_eq!(result.value, 14_142.14);
        assert_eq!(result.impermanent_loss_pct, 5.72);
    }

    #[test]
    fn test_negative_months_is_noop() {
        let position = PoolPosition::new(1.0, 1.0, 2.0, 1.0, 10_000.0);
        let assumptions = YieldAssumptions::new(20.0);
        let result = future_value(&position, &assumptions, -3);
        assert_eq!(result, ProjectionResult::new(10_000.0, 0.0));
    }

    #[test]
    fn test_drift_is_linear_not_compounded() {
        assert!((drifted_price(100.0, 12.0, 6) - 106.0).abs() < 1e-9);
        assert!((drifted_price(100.0, 12.0, 12) - 112.0).abs() < 1e-9);
        assert!((drifted_price(100.0, -24.0, 6) - 88.0).abs() < 1e-9);
        assert_eq!(drifted_price(100.0, -50.0, 24), 0.0);
        assert_eq!(drifted_price(100.0, -50.0, 60), 0.0);
    }

    #[test]
    fn test_drift_adds_pool_value_delta() {
        // New pool at 1/1; asset 1 drifts +120%/yr, 6 months -> price 1.6
        let position = PoolPosition::new_pool(1.0, 1.0, 1000.0);
        let assumptions = YieldAssumptions::new(0.0).with_price_changes(120.0, 0.0);
        let result = future_value(&position, &assumptions, 6);
        // 1000 + (1000 * sqrt(1.6) - 1000)
        assert_eq!(result.value, round_currency(1000.0 * 1.6f64.sqrt()));
        assert_eq!(result.impermanent_loss_pct, impermanent_loss(1.0, 1.0, 1.6, 1.0, 1000.0));
        assert!(result.impermanent_loss_pct > 0.0);
    }

    #[test]
    fn test_yield_and_drift_are_summed() {
        let position = PoolPosition::new_pool(1.0, 1.0, 1000.0);
        let assumptions = YieldAssumptions::new(24.0).with_price_changes(120.0, 0.0);
        let h = horizon(&position, &assumptions, 6);
        let expected = 1000.0 * 1.02f64.powi(6) + (1000.0 * 1.6f64.sqrt() - 1000.0);
        assert!((h.value - expected).abs() < 1e-9);
        assert!((h.price_1 - 1.6).abs() < 1e-12);
        assert_eq!(h.price_2, 1.0);
    }

    #[test]
    fn test_degenerate_position_projects_investment() {
        let position = PoolPosition::new(0.0, 1.0, 1.0, 1.0, 500.0);
        let assumptions = YieldAssumptions::new(0.0).with_price_changes(10.0, 10.0);
        let result = future_value(&position, &assumptions, 12);
        assert_eq!(result, ProjectionResult::new(500.0, 0.0));
    }

    #[test]
    fn test_drift_to_zero_stays_worthless() {
        // asset 1 loses 1/24 of its price per month and is worthless from month 24
        let position = PoolPosition::new_pool(1.0, 1.0, 1000.0);
        let assumptions = YieldAssumptions::new(1.0).with_price_changes(-50.0, 0.0);
        let growth = |months: i32| 1000.0 * (1.0 + 1.0 / 1200.0f64).powi(months) - 1000.0;

        let before = future_value(&position, &assumptions, 23);
        assert!((before.value - 223.47).abs() < 0.011);

        for months in [24, 30, 48] {
            let result = future_value(&position, &assumptions, months);
            assert!(
                (result.value - growth(months)).abs() < 0.011,
                "month {months}: {}",
                result.value
            );
            assert!(result.value < before.value);
            assert_eq!(result.impermanent_loss_pct, 100.0);
        }
    }
}
