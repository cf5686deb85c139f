//! Volatility regimes driven by the fear & greed index.

use lp_risk_domain::enums::Sentiment;
use lp_risk_domain::value_objects::fear_greed::FearGreedIndex;

/// Monthly volatility used when the annual figure is zero.
pub const FALLBACK_MONTHLY_VOLATILITY: f64 = 0.1;

/// Annualized volatility implied by a sentiment reading.
pub fn base_volatility(index: FearGreedIndex) -> f64 {
    match index.value() {
        0..=24 => 0.75,
        25..=49 => 0.60,
        50 => 0.40,
        51..=74 => 0.50,
        _ => 0.70,
    }
}

/// Multiplier applied on top of the base volatility.
pub fn skew_multiplier(index: FearGreedIndex) -> f64 {
    match index.sentiment() {
        Sentiment::Fear => 1.2,
        Sentiment::Neutral => 1.0,
        Sentiment::Greed => 1.1,
    }
}

/// Annual volatility after skew.
///
/// An explicit non-negative `volatility` replaces the sentiment-derived
/// base; the skew applies either way.
pub fn adjusted_volatility(volatility: Option<f64>, index: FearGreedIndex) -> f64 {
    let base = volatility
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or_else(|| base_volatility(index));
    base * skew_multiplier(index)
}

/// Annual volatility scaled to one month.
pub fn monthly_volatility(adjusted_volatility: f64) -> f64 {
    if adjusted_volatility == 0.0 {
        FALLBACK_MONTHLY_VOLATILITY
    } else {
        adjusted_volatility / 12f64.sqrt()
    }
}

/// Beta shape parameters for the annual return draw.
///
/// Fear skews draws toward the low end of the range, greed toward the high end.
pub fn beta_shape(sentiment: Sentiment) -> (f64, f64) {
    match sentiment {
        Sentiment::Fear => (2.0, 5.0),
        Sentiment::Neutral => (2.0, 2.0),
        Sentiment::Greed => (5.0, 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(v: u32) -> FearGreedIndex {
        FearGreedIndex::new(v).unwrap()
    }

    #[test]
    fn test_base_volatility_bands() {
        assert_eq!(base_volatility(index(0)), 0.75);
        assert_eq!(base_volatility(index(24)), 0.75);
        assert_eq!(base_volatility(index(25)), 0.60);
        assert_eq!(base_volatility(index(49)), 0.60);
        assert_eq!(base_volatility(index(50)), 0.40);
        assert_eq!(base_volatility(index(51)), 0.50);
        assert_eq!(base_volatility(index(74)), 0.50);
        assert_eq!(base_volatility(index(75)), 0.70);
        assert_eq!(base_volatility(index(100)), 0.70);
    }

    #[test]
    fn test_adjusted_volatility() {
        assert!((adjusted_volatility(None, index(10)) - 0.90).abs() < 1e-12);
        assert!((adjusted_volatility(None, index(50)) - 0.40).abs() < 1e-12);
        assert!((adjusted_volatility(None, index(80)) - 0.77).abs() < 1e-12);
        assert!((adjusted_volatility(Some(0.3), index(60)) - 0.33).abs() < 1e-12);
        assert!((adjusted_volatility(Some(f64::NAN), index(50)) - 0.40).abs() < 1e-12);
    }

    #[test]
    fn test_monthly_volatility() {
        assert!((monthly_volatility(0.4) - 0.4 / 12f64.sqrt()).abs() < 1e-12);
        assert_eq!(monthly_volatility(0.0), FALLBACK_MONTHLY_VOLATILITY);
    }

    #[test]
    fn test_beta_shapes() {
        assert_eq!(beta_shape(Sentiment::Fear), (2.0, 5.0));
        assert_eq!(beta_shape(Sentiment::Neutral), (2.0, 2.0));
        assert_eq!(beta_shape(Sentiment::Greed), (5.0, 2.0));
    }
}
