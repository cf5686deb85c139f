use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal label attached to a composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    Critical,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
            RiskCategory::Critical => "Critical",
        };
        f.write_str(label)
    }
}

impl FromStr for RiskCategory {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskCategory::Low),
            "moderate" | "medium" => Ok(RiskCategory::Moderate),
            "high" => Ok(RiskCategory::High),
            "critical" => Ok(RiskCategory::Critical),
            other => Err(InputError::UnknownCategory(other.to_string())),
        }
    }
}

/// Market mood derived from a fear & greed reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// Readings up to 49.
    Fear,
    /// Exactly 50.
    Neutral,
    /// Readings above 50.
    Greed,
}

/// Individual inputs that feed a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFactor {
    MaxDrawdown,
    Dilution,
    SupplyConcentration,
    SharpeRatio,
    SortinoRatio,
    SecurityAudit,
    MarketCap,
    Sentiment,
    Liquidity,
    Tvl,
    PlatformTrust,
    Apy,
    ImpermanentLoss,
    TvlDecline,
    PoolShare,
    NetReturn,
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskFactor::MaxDrawdown => "Max drawdown",
            RiskFactor::Dilution => "Dilution ratio",
            RiskFactor::SupplyConcentration => "Supply concentration",
            RiskFactor::SharpeRatio => "Sharpe ratio",
            RiskFactor::SortinoRatio => "Sortino ratio",
            RiskFactor::SecurityAudit => "Security audit",
            RiskFactor::MarketCap => "Market cap",
            RiskFactor::Sentiment => "Sentiment",
            RiskFactor::Liquidity => "Liquidity ratio",
            RiskFactor::Tvl => "TVL",
            RiskFactor::PlatformTrust => "Platform trust",
            RiskFactor::Apy => "APY",
            RiskFactor::ImpermanentLoss => "Impermanent loss",
            RiskFactor::TvlDecline => "TVL decline",
            RiskFactor::PoolShare => "Pool share",
            RiskFactor::NetReturn => "Net return",
        };
        f.write_str(label)
    }
}

/// Which convention a Monte Carlo run uses for its central estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExpectedCase {
    /// Deterministic projection at the unsampled inputs.
    #[default]
    CentralInputs,
    /// Arithmetic mean of the sampled outcomes.
    SampleMean,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_category_round_trip_labels() {
        for category in [
            RiskCategory::Low,
            RiskCategory::Moderate,
            RiskCategory::High,
            RiskCategory::Critical,
        ] {
            assert_eq!(category.to_string().parse::<RiskCategory>(), Ok(category));
        }
        assert_eq!(" Medium ".parse::<RiskCategory>(), Ok(RiskCategory::Moderate));
        assert!("severe".parse::<RiskCategory>().is_err());
    }

    #[test]
    fn test_risk_category_ordering() {
        assert!(RiskCategory::Low < RiskCategory::Critical);
        assert!(RiskCategory::Moderate < RiskCategory::High);
    }
}
