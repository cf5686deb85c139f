//! Sensitivity Monte Carlo for pool positions.

use super::{BEST_PERCENTILE, DEFAULT_SAMPLES, MIN_SAMPLES, WORST_PERCENTILE};
use crate::statistics::{nearest_rank_index, sample_around};
use lp_risk_domain::enums::ExpectedCase;
use lp_risk_domain::error::InputError;
use lp_risk_domain::math::rounding::{round_currency, round_dp};
use lp_risk_domain::metrics::projection::future_value;
use lp_risk_domain::metrics::returns::mean;
use lp_risk_domain::value_objects::monte_carlo_outcome::MonteCarloOutcome;
use lp_risk_domain::value_objects::pool_position::PoolPosition;
use lp_risk_domain::value_objects::projection::ProjectionResult;
use lp_risk_domain::value_objects::yield_assumptions::YieldAssumptions;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configuration for a pool Monte Carlo run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolMonteCarloConfig {
    /// Number of sampled scenarios.
    pub samples: usize,
    /// Projection horizon in months.
    pub horizon_months: i32,
    /// Relative half-width of each sampling range (0.5 samples 0.5x..1.5x).
    pub spread: f64,
    /// Convention for the central estimate.
    pub expected_case: ExpectedCase,
}

impl Default for PoolMonteCarloConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            horizon_months: 12,
            spread: 0.5,
            expected_case: ExpectedCase::CentralInputs,
        }
    }
}

impl PoolMonteCarloConfig {
    /// Sets the number of samples.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the projection horizon.
    #[must_use]
    pub fn with_horizon(mut self, months: i32) -> Self {
        self.horizon_months = months;
        self
    }

    /// Sets the central estimate convention.
    #[must_use]
    pub fn with_expected_case(mut self, expected_case: ExpectedCase) -> Self {
        self.expected_case = expected_case;
        self
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.samples < MIN_SAMPLES {
            return Err(InputError::TooFewSamples {
                min: MIN_SAMPLES,
                value: self.samples,
            });
        }
        if !(self.spread >= 0.0 && self.spread.is_finite()) {
            return Err(InputError::NotFinite {
                field: "spread",
                value: self.spread,
            });
        }
        Ok(())
    }
}

/// Samples yield and drift around their expected values and reports the
/// resulting range of projected pool values.
///
/// Each scenario draws APY and both price drifts independently and uniformly
/// from `[0.5x, 1.5x]` of the assumption (with the default spread), then
/// projects the position over the configured horizon. Outcomes are sorted by
/// value; worst and best are the nearest-rank 10th and 90th percentiles.
///
/// # Arguments
/// * `position` - Pool position to project
/// * `assumptions` - Central yield and drift assumptions
/// * `config` - Sample count, horizon, spread and expected-case convention
/// * `rng` - Random source; seed it for reproducible runs
///
/// # Returns
/// Worst, expected and best projections. With zero samples all three are the
/// deterministic projection.
pub fn monte_carlo_pool<R: Rng + ?Sized>(
    position: &PoolPosition,
    assumptions: &YieldAssumptions,
    config: &PoolMonteCarloConfig,
    rng: &mut R,
) -> MonteCarloOutcome {
    let central = future_value(position, assumptions, config.horizon_months);

    if config.samples == 0 {
        debug!("no samples requested, reporting deterministic projection");
        return MonteCarloOutcome {
            worst: central,
            expected: central,
            best: central,
            samples: 0,
            expected_case: config.expected_case,
        };
    }

    let mut outcomes: Vec<ProjectionResult> = (0..config.samples)
        .map(|_| {
            let sampled = YieldAssumptions {
                apy: sample_around(rng, assumptions.apy, config.spread),
                expected_price_change_1: sample_around(
                    rng,
                    assumptions.expected_price_change_1,
                    config.spread,
                ),
                expected_price_change_2: sample_around(
                    rng,
                    assumptions.expected_price_change_2,
                    config.spread,
                ),
            };
            future_value(position, &sampled, config.horizon_months)
        })
        .collect();

    outcomes.sort_by(|a, b| a.value.total_cmp(&b.value));

    let worst = outcomes[nearest_rank_index(outcomes.len(), WORST_PERCENTILE)];
    let best = outcomes[nearest_rank_index(outcomes.len(), BEST_PERCENTILE)];
    let expected = match config.expected_case {
        ExpectedCase::CentralInputs => central,
        ExpectedCase::SampleMean => sample_mean(&outcomes),
    };

    info!(
        samples = outcomes.len(),
        horizon = config.horizon_months,
        worst = worst.value,
        expected = expected.value,
        best = best.value,
        "pool monte carlo complete"
    );

    MonteCarloOutcome {
        worst,
        expected,
        best,
        samples: outcomes.len(),
        expected_case: config.expected_case,
    }
}

fn sample_mean(outcomes: &[ProjectionResult]) -> ProjectionResult {
    let values: Vec<f64> = outcomes.iter().map(|o| o.value).collect();
    let losses: Vec<f64> = outcomes.iter().map(|o| o.impermanent_loss_pct).collect();
    ProjectionResult::new(round_currency(mean(&values)), round_dp(mean(&losses), 2))
}
