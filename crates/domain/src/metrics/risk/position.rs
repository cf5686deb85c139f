//! Weighted score for an existing pool position.

use super::{CategoryBands, finite, ladder};
use crate::enums::RiskFactor;
use crate::value_objects::pool_position::PoolPosition;
use crate::value_objects::projection::ProjectionResult;
use crate::value_objects::risk_score::{RiskScore, SubScore};
use serde::{Deserialize, Serialize};

pub const IL_WEIGHT: f64 = 0.30;
pub const TVL_DECLINE_WEIGHT: f64 = 0.25;
pub const POOL_SHARE_WEIGHT: f64 = 0.20;
pub const NET_RETURN_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionRiskInputs {
    pub impermanent_loss_pct: Option<f64>,
    /// Drop in pool TVL over the observation window, in percent.
    pub tvl_decline_pct: Option<f64>,
    /// Position size over pool TVL, in percent.
    pub pool_share_pct: Option<f64>,
    /// Projected return on the investment, in percent.
    pub net_return_pct: Option<f64>,
}

impl PositionRiskInputs {
    /// Derives inputs from a projection and pool TVL figures.
    ///
    /// `tvl_change_pct` is the signed TVL change; only declines count.
    /// A non-positive TVL or investment leaves the dependent input missing.
    #[must_use]
    pub fn from_projection(
        position: &PoolPosition,
        projection: &ProjectionResult,
        tvl_usd: f64,
        tvl_change_pct: f64,
    ) -> Self {
        let pool_share_pct = (tvl_usd > 0.0).then(|| position.investment / tvl_usd * 100.0);
        let net_return_pct = (position.investment > 0.0)
            .then(|| (projection.value - position.investment) / position.investment * 100.0);

        Self {
            impermanent_loss_pct: Some(projection.impermanent_loss_pct),
            tvl_decline_pct: Some((-tvl_change_pct).max(0.0)),
            pool_share_pct,
            net_return_pct,
        }
    }
}

pub fn il_score(il_pct: f64) -> f64 {
    ladder(il_pct < 5.0, il_pct < 15.0)
}

pub fn tvl_decline_score(decline_pct: f64) -> f64 {
    ladder(decline_pct < 10.0, decline_pct < 30.0)
}

pub fn pool_share_score(share_pct: f64) -> f64 {
    ladder(share_pct < 1.0, share_pct < 5.0)
}

pub fn net_return_score(return_pct: f64) -> f64 {
    ladder(return_pct > 10.0, return_pct > 0.0)
}

/// Scores a position from IL, TVL decline, pool share and net return.
pub fn position_risk_score(inputs: &PositionRiskInputs) -> RiskScore {
    let scored = |factor: RiskFactor, value: Option<f64>, weight: f64, score: fn(f64) -> f64| {
        match finite(value) {
            Some(v) => SubScore::new(factor, score(v), weight),
            None => SubScore::missing(factor, weight),
        }
    };

    let components = vec![
        scored(RiskFactor::ImpermanentLoss, inputs.impermanent_loss_pct, IL_WEIGHT, il_score),
        scored(
            RiskFactor::TvlDecline,
            inputs.tvl_decline_pct,
            TVL_DECLINE_WEIGHT,
            tvl_decline_score,
        ),
        scored(
            RiskFactor::PoolShare,
            inputs.pool_share_pct,
            POOL_SHARE_WEIGHT,
            pool_share_score,
        ),
        scored(
            RiskFactor::NetReturn,
            inputs.net_return_pct,
            NET_RETURN_WEIGHT,
            net_return_score,
        ),
    ];

    RiskScore::from_components(components, CategoryBands::COMPOSITE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::RiskCategory;

    #[test]
    fn test_healthy_position() {
        let score = position_risk_score(&PositionRiskInputs {
            impermanent_loss_pct: Some(1.2),
            tvl_decline_pct: Some(0.0),
            pool_share_pct: Some(0.05),
            net_return_pct: Some(18.0),
        });
        assert_eq!(score.score, 100.0);
        assert_eq!(score.category, RiskCategory::Low);
    }

    #[test]
    fn test_weighted_mix() {
        let score = position_risk_score(&PositionRiskInputs {
            impermanent_loss_pct: Some(20.0),
            tvl_decline_pct: Some(15.0),
            pool_share_pct: Some(0.5),
            net_return_pct: Some(-3.0),
        });
        // 0.30 * 0 + 0.25 * 50 + 0.20 * 100 + 0.25 * 0
        assert!((score.score - 32.5).abs() < 1e-9);
        assert_eq!(score.category, RiskCategory::High);
    }

    #[test]
    fn test_from_projection() {
        let position = PoolPosition::new(1.0, 1.0, 2.0, 1.0, 10_000.0);
        let projection = ProjectionResult::new(12_000.0, 5.72);
        let inputs = PositionRiskInputs::from_projection(&position, &projection, 2_000_000.0, -12.0);
        assert_eq!(inputs.impermanent_loss_pct, Some(5.72));
        assert_eq!(inputs.tvl_decline_pct, Some(12.0));
        assert!((inputs.pool_share_pct.unwrap() - 0.5).abs() < 1e-12);
        assert!((inputs.net_return_pct.unwrap() - 20.0).abs() < 1e-9);

        let growing = PositionRiskInputs::from_projection(&position, &projection, 0.0, 8.0);
        assert_eq!(growing.tvl_decline_pct, Some(0.0));
        assert_eq!(growing.pool_share_pct, None);
    }

    #[test]
    fn test_missing_inputs_are_neutral() {
        let score = position_risk_score(&PositionRiskInputs::default());
        assert_eq!(score.score, 50.0);
        assert_eq!(score.provided_count(), 0);
    }
}
