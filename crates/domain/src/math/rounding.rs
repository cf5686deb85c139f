//! Decimal rounding for reported figures.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to `dp` decimal places, half to even.
///
/// Goes through `Decimal` so that e.g. `2.675` rounds on its decimal
/// representation. Values `Decimal` cannot hold (NaN, infinities, beyond
/// ~7.9e28) are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Rounds a currency amount to cents.
pub fn round_currency(value: f64) -> f64 {
    round_dp(value, 2)
}

/// Converts a figure to a `Decimal` with two places, for display.
pub fn to_decimal_2dp(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(10_000.004), 10_000.0);
        assert_eq!(round_currency(1234.5678), 1234.57);
        assert_eq!(round_currency(-3.14159), -3.14);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_dp(0.125, 2), 0.12);
        assert_eq!(round_dp(0.375, 2), 0.38);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_dp(f64::NAN, 2).is_nan());
        assert_eq!(round_dp(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_to_decimal_2dp() {
        assert_eq!(to_decimal_2dp(5.7191), Some(dec!(5.72)));
        assert_eq!(to_decimal_2dp(f64::NAN), None);
    }
}
