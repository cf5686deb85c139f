//! Path simulation for a single asset.

use super::{BEST_PERCENTILE, DEFAULT_SAMPLES, MIN_SAMPLES, WORST_PERCENTILE};
use crate::price_path::{SentimentReturnModel, ValuePath};
use crate::sentiment::adjusted_volatility;
use crate::statistics::percentile;
use lp_risk_domain::enums::ExpectedCase;
use lp_risk_domain::error::{InputError, ensure_finite, ensure_positive};
use lp_risk_domain::metrics::returns::{mean, sharpe_ratio, sortino_ratio};
use lp_risk_domain::metrics::risk::AssetRiskInputs;
use lp_risk_domain::value_objects::fear_greed::FearGreedIndex;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Percentile used for value at risk.
const VAR_PERCENTILE: usize = 5;

/// Inputs for a single-asset simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetSimulationParams {
    /// Starting value in quote currency.
    pub investment: f64,
    /// Expected annual return as a fraction (0.2 for 20%).
    pub expected_annual_return: f64,
    /// Annual volatility as a fraction; derived from sentiment when absent.
    #[serde(default)]
    pub volatility: Option<f64>,
    /// Horizon in months.
    pub months: u32,
    #[serde(default)]
    pub fear_greed: FearGreedIndex,
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_expected_case")]
    pub expected_case: ExpectedCase,
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_expected_case() -> ExpectedCase {
    ExpectedCase::SampleMean
}

impl AssetSimulationParams {
    /// Creates parameters with neutral sentiment, 200 samples and a
    /// sample-mean central estimate.
    #[must_use]
    pub fn new(investment: f64, expected_annual_return: f64, months: u32) -> Self {
        Self {
            investment,
            expected_annual_return,
            volatility: None,
            months,
            fear_greed: FearGreedIndex::NEUTRAL,
            samples: DEFAULT_SAMPLES,
            expected_case: ExpectedCase::SampleMean,
        }
    }

    /// Sets an explicit annual volatility.
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the sentiment reading.
    #[must_use]
    pub fn with_fear_greed(mut self, index: FearGreedIndex) -> Self {
        self.fear_greed = index;
        self
    }

    /// Sets the number of simulated paths.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the central estimate convention.
    #[must_use]
    pub fn with_expected_case(mut self, expected_case: ExpectedCase) -> Self {
        self.expected_case = expected_case;
        self
    }

    /// Annual volatility after sentiment skew.
    #[must_use]
    pub fn adjusted_volatility(&self) -> f64 {
        adjusted_volatility(self.volatility, self.fear_greed)
    }

    /// Ceiling applied to every final value.
    #[must_use]
    pub fn value_cap(&self) -> f64 {
        self.investment * (1.0 + self.expected_annual_return + self.adjusted_volatility())
    }

    pub fn validate(&self) -> Result<(), InputError> {
        ensure_positive("investment", self.investment)?;
        ensure_finite("expected_annual_return", self.expected_annual_return)?;
        if let Some(volatility) = self.volatility {
            ensure_finite("volatility", volatility)?;
        }
        if self.samples < MIN_SAMPLES {
            return Err(InputError::TooFewSamples {
                min: MIN_SAMPLES,
                value: self.samples,
            });
        }
        Ok(())
    }
}

/// Result of a single-asset simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSimulation {
    /// Capped final value of every path.
    pub final_values: Vec<f64>,
    /// Every simulated value path, starting at the investment.
    pub paths: Vec<Vec<f64>>,
    /// Monthly returns of all paths, path after path.
    pub monthly_returns: Vec<f64>,
    /// 10th percentile final value.
    pub worst: f64,
    /// Central estimate per `expected_case`.
    pub expected: f64,
    /// 90th percentile final value.
    pub best: f64,
    pub expected_case: ExpectedCase,
    /// Largest peak-to-trough drop on the path with the lowest final value, in percent.
    pub max_drawdown_pct: f64,
    /// Shortfall of the 5th percentile final value against the investment.
    pub value_at_risk_95: f64,
    /// Annual volatility used, after sentiment skew.
    pub adjusted_volatility: f64,
    /// Ceiling applied to final values.
    pub value_cap: f64,
}

impl AssetSimulation {
    /// Annualized Sharpe ratio of the pooled monthly returns.
    pub fn sharpe_ratio(&self, risk_free_annual_pct: f64) -> Option<f64> {
        sharpe_ratio(&self.monthly_returns, risk_free_annual_pct)
    }

    /// Annualized Sortino ratio of the pooled monthly returns.
    pub fn sortino_ratio(&self, risk_free_annual_pct: f64) -> Option<f64> {
        sortino_ratio(&self.monthly_returns, risk_free_annual_pct)
    }

    /// Fills the simulation-derived fields of a risk assessment.
    pub fn risk_inputs(&self, risk_free_annual_pct: f64) -> AssetRiskInputs {
        AssetRiskInputs {
            max_drawdown_pct: Some(self.max_drawdown_pct),
            sharpe_ratio: self.sharpe_ratio(risk_free_annual_pct),
            sortino_ratio: self.sortino_ratio(risk_free_annual_pct),
            ..AssetRiskInputs::default()
        }
    }

    fn flat(params: &AssetSimulationParams) -> Self {
        Self {
            final_values: Vec::new(),
            paths: Vec::new(),
            monthly_returns: Vec::new(),
            worst: params.investment,
            expected: params.investment,
            best: params.investment,
            expected_case: params.expected_case,
            max_drawdown_pct: 0.0,
            value_at_risk_95: 0.0,
            adjusted_volatility: params.adjusted_volatility(),
            value_cap: params.value_cap(),
        }
    }
}

/// Simulates `samples` value paths for a single asset.
///
/// Volatility comes from the explicit figure or the fear & greed reading,
/// skewed by sentiment. Each path draws a Beta-distributed annual return
/// around the expectation, then Normal monthly returns around its monthly
/// equivalent, and compounds them from the investment. Final values are
/// capped at `investment * (1 + expected return + volatility)`.
///
/// A non-positive investment or zero samples yields a flat result at the
/// investment.
pub fn monte_carlo_asset<R: Rng + ?Sized>(
    params: &AssetSimulationParams,
    rng: &mut R,
) -> AssetSimulation {
    if !(params.investment > 0.0) || params.samples == 0 {
        debug!(
            investment = params.investment,
            samples = params.samples,
            "nothing to simulate, reporting investment"
        );
        return AssetSimulation::flat(params);
    }

    let volatility = params.adjusted_volatility();
    let cap = params.value_cap();
    let model = SentimentReturnModel::new(
        params.expected_annual_return,
        volatility,
        params.fear_greed.sentiment(),
    );
    let months = params.months as usize;

    let paths: Vec<ValuePath> = (0..params.samples)
        .map(|_| {
            let mut path = ValuePath::generate(&model, rng, params.investment, months);
            path.cap_final(cap);
            path
        })
        .collect();

    let final_values: Vec<f64> = paths.iter().map(ValuePath::final_value).collect();
    let mut sorted = final_values.clone();
    sorted.sort_by(f64::total_cmp);

    let worst = percentile(&sorted, WORST_PERCENTILE).unwrap_or(params.investment);
    let best = percentile(&sorted, BEST_PERCENTILE).unwrap_or(params.investment);
    let expected = match params.expected_case {
        ExpectedCase::SampleMean => mean(&final_values),
        ExpectedCase::CentralInputs => {
            let growth = (1.0 + params.expected_annual_return)
                .max(0.0)
                .powf(f64::from(params.months) / 12.0);
            (params.investment * growth).min(cap)
        }
    };

    let max_drawdown_pct = paths
        .iter()
        .min_by(|a, b| a.final_value().total_cmp(&b.final_value()))
        .map_or(0.0, ValuePath::max_drawdown_pct);

    let value_at_risk_95 = percentile(&sorted, VAR_PERCENTILE)
        .map_or(0.0, |p5| (params.investment - p5).max(0.0));

    info!(
        samples = params.samples,
        months = params.months,
        volatility,
        worst,
        expected,
        best,
        max_drawdown_pct,
        "asset monte carlo complete"
    );

    let monthly_returns = paths
        .iter()
        .flat_map(|p| p.monthly_returns.iter().copied())
        .collect();
    let paths = paths.into_iter().map(|p| p.values).collect();

    AssetSimulation {
        final_values,
        paths,
        monthly_returns,
        worst,
        expected,
        best,
        expected_case: params.expected_case,
        max_drawdown_pct,
        value_at_risk_95,
        adjusted_volatility: volatility,
        value_cap: cap,
    }
}
