//! JSON scenario files.
//!
//! A scenario bundles any subset of the inputs the subcommands take. Flags
//! given on the command line override the matching scenario field.

use anyhow::{Context, Result};
use lp_risk_domain::metrics::risk::{AssetRiskInputs, PoolRiskInputs};
use lp_risk_domain::value_objects::pool_position::PoolPosition;
use lp_risk_domain::value_objects::yield_assumptions::YieldAssumptions;
use lp_risk_simulation::monte_carlo::{AssetSimulationParams, PoolMonteCarloConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub position: Option<PoolPosition>,
    pub assumptions: Option<YieldAssumptions>,
    pub pool_simulation: Option<PoolMonteCarloConfig>,
    pub asset: Option<AssetSimulationParams>,
    pub asset_risk: Option<AssetRiskInputs>,
    pub pool_risk: Option<PoolRiskInputs>,
    /// Pool TVL in USD, used for position scoring.
    pub tvl_usd: Option<f64>,
    /// Signed TVL change in percent over the review window.
    pub tvl_change_pct: Option<f64>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid scenario JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        let scenario = Self::from_json(&json)
            .with_context(|| format!("failed to parse scenario file {}", path.display()))?;
        debug!(path = %path.display(), "loaded scenario");
        Ok(scenario)
    }

    /// Loads `path` when given, otherwise returns an empty scenario.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
