//! Break-even searches.
//!
//! Both searches step forward one month at a time and stop at
//! `MAX_BREAK_EVEN_MONTHS`.

use crate::metrics::projection::horizon;
use crate::value_objects::break_even::BreakEven;
use crate::value_objects::pool_position::PoolPosition;
use crate::value_objects::yield_assumptions::YieldAssumptions;
use tracing::debug;

/// Upper bound of every break-even search, in months.
pub const MAX_BREAK_EVEN_MONTHS: u32 = 1000;

/// Months of yield needed for `pool_value` to catch up with `value_if_held`.
///
/// # Arguments
///
/// * `apy` - Annual percentage yield, compounded monthly
/// * `il_pct` - Current impermanent loss in percent; informational, the hold
///   gap alone decides the result
/// * `pool_value` - Current value of the pool share
/// * `value_if_held` - Value of the entry bundle had it been held
///
/// # Returns
///
/// * `BreakEven::Months(0)` when there is nothing to recover
///   (`value_if_held <= pool_value`) or no way to compute it (`apy <= 0`,
///   `pool_value <= 0`).
/// * `BreakEven::Unreachable` when the cap is hit.
pub fn break_even_months(apy: f64, il_pct: f64, pool_value: f64, value_if_held: f64) -> BreakEven {
    if apy <= 0.0 || pool_value <= 0.0 || value_if_held <= pool_value {
        return BreakEven::Months(0);
    }
    debug!(apy, il_pct, pool_value, value_if_held, "searching break-even");

    let monthly_rate = apy / 100.0 / 12.0;
    let mut current = pool_value;

    for month in 1..=MAX_BREAK_EVEN_MONTHS {
        current *= 1.0 + monthly_rate;
        if current >= value_if_held {
            return BreakEven::Months(month);
        }
    }

    debug!(apy, pool_value, value_if_held, "break-even beyond search cap");
    BreakEven::Unreachable
}

/// Break-even for `position` at its current prices, without price drift.
pub fn break_even_months_for_position(position: &PoolPosition, apy: f64) -> BreakEven {
    let valuation = position.valuation();
    break_even_months(
        apy,
        valuation.impermanent_loss_pct,
        valuation.pool_value,
        valuation.value_if_held,
    )
}

/// Months until the projected pool value catches up with holding, when
/// both move with the expected price drift.
///
/// Each month evaluates the full future-value trajectory (compounded yield
/// plus the drift-driven change in pool value) against the hold bundle at
/// that month's drifted prices.
///
/// # Returns
///
/// * `BreakEven::Unreachable` when `apy <= 0` or the cap is hit.
pub fn break_even_months_with_price_changes(
    position: &PoolPosition,
    assumptions: &YieldAssumptions,
) -> BreakEven {
    if !(assumptions.apy > 0.0) {
        return BreakEven::Unreachable;
    }

    for month in 0..=MAX_BREAK_EVEN_MONTHS {
        let at = horizon(position, assumptions, month);
        if at.value >= at.drifted.value_if_held {
            return BreakEven::Months(month);
        }
    }

    debug!(
        apy = assumptions.apy,
        drift_1 = assumptions.expected_price_change_1,
        drift_2 = assumptions.expected_price_change_2,
        "drifting break-even beyond search cap"
    );
    BreakEven::Unreachable
}
