//! Weighted quality score for a liquidity pool.

use super::{CategoryBands, FULL_SCORE};
use crate::enums::RiskFactor;
use crate::value_objects::risk_score::{RiskScore, SubScore};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TVL_WEIGHT: f64 = 0.4;
pub const TRUST_WEIGHT: f64 = 0.3;
pub const APY_WEIGHT: f64 = 0.3;

/// APY above which yield is treated as a red flag, in percent.
pub const UNSUSTAINABLE_APY_PCT: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolRiskInputs {
    /// Total value locked, in USD.
    pub tvl_usd: f64,
    /// Platform trust rating on a 1..=5 scale.
    pub trust_score: u8,
    /// Advertised APY, in percent.
    pub apy: f64,
}

pub fn tvl_score(tvl_usd: f64) -> f64 {
    if tvl_usd >= 10_000_000.0 {
        100.0
    } else if tvl_usd >= 1_000_000.0 {
        70.0
    } else if tvl_usd >= 100_000.0 {
        40.0
    } else {
        10.0
    }
}

/// Trust ratings are clamped to 1..=5 and scaled to 20..=100.
pub fn trust_score(rating: u8) -> f64 {
    f64::from(rating.clamp(1, 5)) * 20.0
}

/// APY counts up to 100%; past `UNSUSTAINABLE_APY_PCT` it is halved.
pub fn apy_score(apy: f64) -> f64 {
    let score = apy.clamp(0.0, FULL_SCORE);
    if apy > UNSUSTAINABLE_APY_PCT {
        debug!(apy, "unsustainable APY, halving its contribution");
        score / 2.0
    } else {
        score
    }
}

/// Scores a pool as `0.4 * tvl + 0.3 * trust + 0.3 * apy`.
pub fn pool_risk_score(inputs: &PoolRiskInputs) -> RiskScore {
    let tvl = if inputs.tvl_usd.is_finite() {
        SubScore::new(RiskFactor::Tvl, tvl_score(inputs.tvl_usd), TVL_WEIGHT)
    } else {
        SubScore::missing(RiskFactor::Tvl, TVL_WEIGHT)
    };
    let apy = if inputs.apy.is_finite() {
        SubScore::new(RiskFactor::Apy, apy_score(inputs.apy), APY_WEIGHT)
    } else {
        SubScore::missing(RiskFactor::Apy, APY_WEIGHT)
    };

    let components = vec![
        tvl,
        SubScore::new(
            RiskFactor::PlatformTrust,
            trust_score(inputs.trust_score),
            TRUST_WEIGHT,
        ),
        apy,
    ];

    RiskScore::from_components(components, CategoryBands::POOL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::RiskCategory;

    #[test]
    fn test_tvl_tiers() {
        assert_eq!(tvl_score(50_000_000.0), 100.0);
        assert_eq!(tvl_score(2_500_000.0), 70.0);
        assert_eq!(tvl_score(100_000.0), 40.0);
        assert_eq!(tvl_score(5_000.0), 10.0);
        assert_eq!(tvl_score(0.0), 10.0);
    }

    #[test]
    fn test_trust_clamped() {
        assert_eq!(trust_score(0), 20.0);
        assert_eq!(trust_score(3), 60.0);
        assert_eq!(trust_score(9), 100.0);
    }

    #[test]
    fn test_apy_red_flag() {
        assert_eq!(apy_score(25.0), 25.0);
        assert_eq!(apy_score(180.0), 100.0);
        assert_eq!(apy_score(300.0), 100.0);
        assert_eq!(apy_score(300.1), 50.0);
        assert_eq!(apy_score(-5.0), 0.0);
    }

    #[test]
    fn test_established_pool() {
        let score = pool_risk_score(&PoolRiskInputs {
            tvl_usd: 80_000_000.0,
            trust_score: 5,
            apy: 40.0,
        });
        // 0.4 * 100 + 0.3 * 100 + 0.3 * 40
        assert!((score.score - 82.0).abs() < 1e-9);
        assert_eq!(score.category, RiskCategory::Low);
    }

    #[test]
    fn test_farm_with_extreme_yield() {
        let score = pool_risk_score(&PoolRiskInputs {
            tvl_usd: 60_000.0,
            trust_score: 1,
            apy: 2_000.0,
        });
        // 0.4 * 10 + 0.3 * 20 + 0.3 * 50
        assert!((score.score - 25.0).abs() < 1e-9);
        assert_eq!(score.category, RiskCategory::Critical);
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((TVL_WEIGHT + TRUST_WEIGHT + APY_WEIGHT - 1.0).abs() < 1e-12);
    }
}
