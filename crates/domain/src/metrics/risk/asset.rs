//! Unweighted composite for a single asset.

use super::{CategoryBands, finite, ladder};
use crate::enums::RiskFactor;
use crate::value_objects::fear_greed::FearGreedIndex;
use crate::value_objects::risk_score::{RiskScore, SubScore};
use serde::{Deserialize, Serialize};

/// Risk inputs for a single asset; any may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetRiskInputs {
    /// Worst peak-to-trough drop, in percent.
    pub max_drawdown_pct: Option<f64>,
    /// Circulating over total supply, 0..=1.
    pub dilution_ratio: Option<f64>,
    /// Share of supply held by the largest holders, in percent.
    pub supply_concentration_pct: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub sortino_ratio: Option<f64>,
    /// Security audit score, 0..=100.
    pub audit_score: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub fear_greed: Option<FearGreedIndex>,
    /// 24h traded volume over market cap.
    pub liquidity_ratio: Option<f64>,
}

pub fn drawdown_score(max_drawdown_pct: f64) -> f64 {
    ladder(max_drawdown_pct < 30.0, max_drawdown_pct < 50.0)
}

pub fn dilution_score(dilution_ratio: f64) -> f64 {
    ladder(dilution_ratio >= 0.8, dilution_ratio >= 0.5)
}

pub fn concentration_score(concentration_pct: f64) -> f64 {
    ladder(concentration_pct < 20.0, concentration_pct < 50.0)
}

/// Shared by Sharpe and Sortino: above 1 is good, positive is fair.
pub fn risk_adjusted_return_score(ratio: f64) -> f64 {
    ladder(ratio > 1.0, ratio > 0.0)
}

pub fn audit_score(score: f64) -> f64 {
    ladder(score >= 80.0, score >= 50.0)
}

pub fn market_cap_score(market_cap_usd: f64) -> f64 {
    ladder(market_cap_usd >= 10e9, market_cap_usd >= 1e9)
}

/// Calm markets score best, either extreme scores worst.
pub fn sentiment_score(index: FearGreedIndex) -> f64 {
    let v = index.value();
    ladder((40..=60).contains(&v), (25..=74).contains(&v))
}

pub fn liquidity_score(liquidity_ratio: f64) -> f64 {
    ladder(liquidity_ratio >= 0.10, liquidity_ratio >= 0.02)
}

/// Scores a single asset as the plain mean of nine sub-scores.
///
/// Missing inputs score `NEUTRAL_SUB_SCORE` rather than being dropped, so
/// assets with different data coverage remain comparable.
pub fn asset_risk_score(inputs: &AssetRiskInputs) -> RiskScore {
    let scored = |factor: RiskFactor, value: Option<f64>, score: fn(f64) -> f64| match finite(value) {
        Some(v) => SubScore::new(factor, score(v), 1.0),
        None => SubScore::missing(factor, 1.0),
    };

    let sentiment = match inputs.fear_greed {
        Some(index) => SubScore::new(RiskFactor::Sentiment, sentiment_score(index), 1.0),
        None => SubScore::missing(RiskFactor::Sentiment, 1.0),
    };

    let components = vec![
        scored(RiskFactor::MaxDrawdown, inputs.max_drawdown_pct, drawdown_score),
        scored(RiskFactor::Dilution, inputs.dilution_ratio, dilution_score),
        scored(
            RiskFactor::SupplyConcentration,
            inputs.supply_concentration_pct,
            concentration_score,
        ),
        scored(RiskFactor::SharpeRatio, inputs.sharpe_ratio, risk_adjusted_return_score),
        scored(RiskFactor::SortinoRatio, inputs.sortino_ratio, risk_adjusted_return_score),
        scored(RiskFactor::SecurityAudit, inputs.audit_score, audit_score),
        scored(RiskFactor::MarketCap, inputs.market_cap_usd, market_cap_score),
        sentiment,
        scored(RiskFactor::Liquidity, inputs.liquidity_ratio, liquidity_score),
    ];

    RiskScore::from_components(components, CategoryBands::COMPOSITE)
}
