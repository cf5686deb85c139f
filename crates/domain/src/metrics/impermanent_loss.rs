use crate::math::constant_product::{il_fraction, relative_price_ratio};
use crate::math::rounding::round_dp;
use crate::value_objects::pool_position::PoolPosition;
use tracing::debug;

/// Losses at or below this percentage are reported unrounded.
pub const ROUNDING_THRESHOLD_PCT: f64 = 0.01;

/// Calculates Impermanent Loss for a two-asset constant product pool.
/// formula: k = (p1 / p2) / (p1_0 / p2_0), il = 2 * sqrt(k) / (1 + k) - 1
///
/// # Arguments
///
/// * `p1_0`, `p2_0` - Entry prices of asset 1 and asset 2
/// * `p1`, `p2` - Current prices
/// * `investment` - Position size; only checked for positivity
///
/// # Returns
///
/// * `f64` - The loss as a positive percentage (5.72 for a 5.72% loss).
///   Rounded to two places only when above `ROUNDING_THRESHOLD_PCT`.
///   Zero when an entry price, `p2` or the investment is non-positive, or
///   `p1` is negative. A worthless asset 1 is a 100% loss.
pub fn impermanent_loss(p1_0: f64, p2_0: f64, p1: f64, p2: f64, investment: f64) -> f64 {
    if !(investment > 0.0) {
        return 0.0;
    }
    let Some(price_ratio) = relative_price_ratio(p1_0, p2_0, p1, p2) else {
        debug!(p1_0, p2_0, p1, p2, "cannot compute impermanent loss");
        return 0.0;
    };

    let pct = il_fraction(price_ratio).abs() * 100.0;

    // TODO: confirm with product whether sub-threshold losses should round too
    if pct > ROUNDING_THRESHOLD_PCT {
        round_dp(pct, 2)
    } else {
        pct
    }
}

/// Impermanent loss of `position` at its current prices.
pub fn impermanent_loss_for_position(position: &PoolPosition) -> f64 {
    let (p1_0, p2_0) = position.entry_prices();
    impermanent_loss(
        p1_0,
        p2_0,
        position.current_price_1,
        position.current_price_2,
        position.investment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constant_product::pool_value;

    #[test]
    fn test_stablecoin_pool_has_no_loss() {
        assert_eq!(impermanent_loss(1.0, 1.0, 1.0, 1.0, 10_000.0), 0.0);
        let valuation = pool_value(10_000.0, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(valuation.pool_value, 10_000.0);
        assert_eq!(valuation.impermanent_loss_pct, 0.0);
    }

    #[test]
    fn test_unchanged_prices_exactly_zero() {
        for (p, q) in [(3.0, 7.0), (0.02, 1800.0), (64_000.0, 3_100.0)] {
            assert_eq!(impermanent_loss(p, q, p, q, 1.0), 0.0);
        }
    }

    #[test]
    fn test_price_doubling() {
        // k = 2: 2 * sqrt(2) / 3 - 1 = -0.05719
        assert_eq!(impermanent_loss(1.0, 1.0, 2.0, 1.0, 10_000.0), 5.72);
    }

    #[test]
    fn test_five_x_divergence() {
        // k = 5: 2 * sqrt(5) / 6 - 1 = -0.25464
        assert_eq!(impermanent_loss(10.0, 1.0, 50.0, 1.0, 1.0), 25.46);
    }

    #[test]
    fn test_non_negative_and_symmetric() {
        let cases = [
            (1.0, 1.0, 2.0, 1.0),
            (100.0, 2.0, 40.0, 3.0),
            (0.3, 0.9, 0.31, 0.7),
            (2500.0, 1.0, 1200.0, 1.0),
            (1.0, 1.0, 1.0, 9.0),
        ];
        for (p1_0, p2_0, p1, p2) in cases {
            let il = impermanent_loss(p1_0, p2_0, p1, p2, 1000.0);
            let swapped = impermanent_loss(p2_0, p1_0, p2, p1, 1000.0);
            assert!(il >= 0.0);
            assert!((il - swapped).abs() < 1e-9);
        }
    }

    #[test]
    fn test_small_losses_are_not_rounded() {
        // k = 1.02 gives roughly 0.0049%, below the rounding threshold
        let il = impermanent_loss(1.0, 1.0, 1.02, 1.0, 1.0);
        assert!(il > 0.0 && il <= ROUNDING_THRESHOLD_PCT);
        assert_ne!(il, round_dp(il, 2));

        // k = 1.1 gives roughly 0.1134%, above it
        let il = impermanent_loss(1.0, 1.0, 1.1, 1.0, 1.0);
        assert_eq!(il, 0.11);
    }

    #[test]
    fn test_degenerate_inputs_return_zero() {
        assert_eq!(impermanent_loss(1.0, 0.0, 2.0, 1.0, 100.0), 0.0);
        assert_eq!(impermanent_loss(1.0, 1.0, 2.0, 0.0, 100.0), 0.0);
        assert_eq!(impermanent_loss(1.0, 1.0, 2.0, 1.0, 0.0), 0.0);
        assert_eq!(impermanent_loss(1.0, 1.0, 2.0, 1.0, -5.0), 0.0);
    }

    #[test]
    fn test_worthless_asset_one_is_total_loss() {
        // k = 0: 2 * 0 / 1 - 1 = -1
        assert_eq!(impermanent_loss(1.0, 1.0, 0.0, 1.0, 100.0), 100.0);
        let valuation = pool_value(100.0, 1.0, 1.0, 0.0, 1.0);
        assert_eq!(valuation.impermanent_loss_pct, 100.0);
    }

    #[test]
    fn test_agrees_with_pool_valuation() {
        let cases = [
            (1.0, 1.0, 2.0, 1.0),
            (20.0, 1.0, 8.0, 1.0),
            (1.5, 3.0, 4.5, 1.0),
        ];
        for (p1_0, p2_0, p1, p2) in cases {
            let valuation = pool_value(1000.0, p1_0, p2_0, p1, p2);
            let il = impermanent_loss(p1_0, p2_0, p1, p2, 1000.0);
            assert_eq!(il, round_dp(valuation.impermanent_loss_pct, 2));
        }
    }

    #[test]
    fn test_position_helper() {
        let position = PoolPosition::new(1.0, 1.0, 2.0, 1.0, 1000.0);
        assert_eq!(impermanent_loss_for_position(&position), 5.72);
        let new_pool = PoolPosition::new_pool(2.0, 1.0, 1000.0);
        assert_eq!(impermanent_loss_for_position(&new_pool), 0.0);
    }
}
