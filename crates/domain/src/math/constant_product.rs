use crate::value_objects::projection::PoolValuation;
use tracing::debug;

/// Impermanent loss of a constant-product pool as a signed fraction.
/// formula: 2 * sqrt(price_ratio) / (1 + price_ratio) - 1
///
/// Zero when the ratio is 1, negative for any divergence.
pub fn il_fraction(price_ratio: f64) -> f64 {
    2.0 * price_ratio.sqrt() / (1.0 + price_ratio) - 1.0
}

/// Relative price move `k = (p1 / p2) / (p1_0 / p2_0)` since entry.
///
/// Returns `None` when an entry price or `p2` is not positive, or `p1` is
/// negative or NaN. A worthless asset 1 gives `k = 0`.
pub fn relative_price_ratio(p1_0: f64, p2_0: f64, p1: f64, p2: f64) -> Option<f64> {
    if !(p1_0 > 0.0 && p2_0 > 0.0 && p2 > 0.0 && p1 >= 0.0) {
        return None;
    }
    Some((p1 / p2) / (p1_0 / p2_0))
}

/// Values a 50/50 constant-product position at current prices.
///
/// At entry half of `investment` buys asset 1 at `p1_0` and half buys asset 2
/// at `p2_0`. The pool share scales with `sqrt(p1 * p2)`; the hold benchmark
/// is the entry bundle marked to current prices.
///
/// # Arguments
///
/// * `investment` - Capital committed at entry, in quote currency
/// * `p1_0`, `p2_0` - Entry prices
/// * `p1`, `p2` - Current prices
///
/// # Returns
///
/// * `PoolValuation` - pool value, hold value and IL percentage. A
///   non-positive entry price, investment or hold value yields
///   `PoolValuation::fallback(investment)`, as does a negative current price.
///   A current price of zero is valid and values that leg at nothing.
pub fn pool_value(investment: f64, p1_0: f64, p2_0: f64, p1: f64, p2: f64) -> PoolValuation {
    if !(investment > 0.0 && p1_0 > 0.0 && p2_0 > 0.0) {
        debug!(investment, p1_0, p2_0, "non-positive entry input, valuing at investment");
        return PoolValuation::fallback(investment);
    }
    if !(p1 >= 0.0 && p2 >= 0.0) {
        debug!(p1, p2, "negative current price, valuing at investment");
        return PoolValuation::fallback(investment);
    }

    let units_1 = investment / 2.0 / p1_0;
    let units_2 = investment / 2.0 / p2_0;
    let value_if_held = units_1 * p1 + units_2 * p2;
    if !(value_if_held > 0.0) {
        debug!(p1, p2, "both assets worthless, valuing at investment");
        return PoolValuation::fallback(investment);
    }

    let pool_value = investment * (p1 * p2).sqrt() / (p1_0 * p2_0).sqrt();

    // (held - pool) / held reduces to -il_fraction(k); k is undefined at p2 = 0
    let impermanent_loss_pct = match relative_price_ratio(p1_0, p2_0, p1, p2) {
        Some(price_ratio) => il_fraction(price_ratio).abs() * 100.0,
        None => (value_if_held - pool_value) / value_if_held * 100.0,
    };

    PoolValuation {
        pool_value,
        value_if_held,
        impermanent_loss_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * a.abs().max(1.0)
    }

    #[test]
    fn test_pool_value_at_entry_returns_investment() {
        for (p, q) in [(1.0, 1.0), (0.35, 2400.0), (65_000.0, 1.0), (1e-6, 3.0)] {
            let valuation = pool_value(10_000.0, p, q, p, q);
            assert!(close(valuation.pool_value, 10_000.0));
            assert!(close(valuation.value_if_held, 10_000.0));
            assert_eq!(valuation.impermanent_loss_pct, 0.0);
        }
    }

    #[test]
    fn test_pool_value_price_doubling() {
        // Asset 1 doubles: held = 5000*2 + 5000 = 15000, pool = 10000*sqrt(2)
        let valuation = pool_value(10_000.0, 1.0, 1.0, 2.0, 1.0);
        assert!(close(valuation.value_if_held, 15_000.0));
        assert!(close(valuation.pool_value, 10_000.0 * 2f64.sqrt()));
        assert!((valuation.impermanent_loss_pct - 5.719).abs() < 0.001);
    }

    #[test]
    fn test_il_matches_hold_comparison() {
        let cases = [
            (1.0, 1.0, 2.0, 1.0),
            (100.0, 1.0, 37.0, 1.0),
            (2000.0, 30.0, 3100.0, 12.5),
            (0.5, 4.0, 0.5, 9.0),
            (5.0, 5.0, 0.01, 500.0),
        ];
        for (p1_0, p2_0, p1, p2) in cases {
            let valuation = pool_value(2500.0, p1_0, p2_0, p1, p2);
            let from_hold = (valuation.value_if_held - valuation.pool_value)
                / valuation.value_if_held
                * 100.0;
            assert!(
                (valuation.impermanent_loss_pct - from_hold).abs() < 1e-9,
                "mismatch for {p1_0} {p2_0} {p1} {p2}"
            );
        }
    }

    #[test]
    fn test_pool_value_fallbacks() {
        let expected = PoolValuation::fallback(1000.0);
        assert_eq!(pool_value(1000.0, 0.0, 1.0, 1.0, 1.0), expected);
        assert_eq!(pool_value(1000.0, 1.0, -1.0, 1.0, 1.0), expected);
        assert_eq!(pool_value(1000.0, 1.0, 1.0, -0.5, 1.0), expected);
        assert_eq!(pool_value(1000.0, 1.0, 1.0, 1.0, f64::NAN), expected);
        assert_eq!(pool_value(1000.0, 1.0, 1.0, 0.0, 0.0), expected);
        assert_eq!(pool_value(0.0, 1.0, 1.0, 2.0, 1.0), PoolValuation::fallback(0.0));
    }

    #[test]
    fn test_worthless_asset_is_total_loss() {
        // held = 500 * 0 + 500 * 1, pool = 1000 * sqrt(0)
        let valuation = pool_value(1000.0, 1.0, 1.0, 0.0, 1.0);
        assert_eq!(valuation.pool_value, 0.0);
        assert_eq!(valuation.value_if_held, 500.0);
        assert_eq!(valuation.impermanent_loss_pct, 100.0);

        let valuation = pool_value(1000.0, 1.0, 1.0, 1.0, 0.0);
        assert_eq!(valuation.pool_value, 0.0);
        assert_eq!(valuation.value_if_held, 500.0);
        assert_eq!(valuation.impermanent_loss_pct, 100.0);
    }

    #[test]
    fn test_relative_price_ratio() {
        assert_eq!(relative_price_ratio(1.0, 1.0, 2.0, 1.0), Some(2.0));
        assert_eq!(relative_price_ratio(1.0, 1.0, 2.0, 2.0), Some(1.0));
        assert_eq!(relative_price_ratio(1.0, 0.0, 2.0, 2.0), None);
        assert_eq!(relative_price_ratio(1.0, 1.0, 0.0, 2.0), Some(0.0));
        assert_eq!(relative_price_ratio(1.0, 1.0, 2.0, 0.0), None);
    }

    #[test]
    fn test_il_fraction_symmetry() {
        // k and 1/k describe the same divergence seen from either asset
        for k in [0.1, 0.5, 2.0, 3.7, 25.0] {
            assert!((il_fraction(k) - il_fraction(1.0 / k)).abs() < 1e-12);
        }
        assert_eq!(il_fraction(1.0), 0.0);
    }
}
