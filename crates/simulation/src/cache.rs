//! Memoization of seeded simulation runs.
//!
//! Entries are keyed by every input that influences a run, including the
//! seed, so a hit returns exactly what a fresh run would. Unseeded runs are
//! never cached.

use crate::monte_carlo::asset::{AssetSimulation, AssetSimulationParams, monte_carlo_asset};
use crate::monte_carlo::pool::{PoolMonteCarloConfig, monte_carlo_pool};
use crate::rng::seeded_rng;
use cached::{Cached, SizedCache};
use lp_risk_domain::enums::ExpectedCase;
use lp_risk_domain::value_objects::monte_carlo_outcome::MonteCarloOutcome;
use lp_risk_domain::value_objects::pool_position::PoolPosition;
use lp_risk_domain::value_objects::yield_assumptions::YieldAssumptions;
use tracing::debug;

/// Bit-exact key over a run's full input tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScenarioKey(Vec<u64>);

/// Maps a float to its bit pattern, folding -0.0 into 0.0.
fn float_key(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

fn case_key(case: ExpectedCase) -> u64 {
    match case {
        ExpectedCase::CentralInputs => 0,
        ExpectedCase::SampleMean => 1,
    }
}

impl ScenarioKey {
    /// Key for a pool run.
    pub fn pool(
        position: &PoolPosition,
        assumptions: &YieldAssumptions,
        config: &PoolMonteCarloConfig,
        seed: u64,
    ) -> Self {
        Self(vec![
            0,
            float_key(position.initial_price_1),
            float_key(position.initial_price_2),
            float_key(position.current_price_1),
            float_key(position.current_price_2),
            float_key(position.investment),
            u64::from(position.is_new_pool),
            float_key(assumptions.apy),
            float_key(assumptions.expected_price_change_1),
            float_key(assumptions.expected_price_change_2),
            config.samples as u64,
            i64::from(config.horizon_months) as u64,
            float_key(config.spread),
            case_key(config.expected_case),
            seed,
        ])
    }

    /// Key for an asset run.
    pub fn asset(params: &AssetSimulationParams, seed: u64) -> Self {
        Self(vec![
            1,
            float_key(params.investment),
            float_key(params.expected_annual_return),
            params.volatility.map_or(u64::MAX, float_key),
            u64::from(params.volatility.is_some()),
            u64::from(params.months),
            u64::from(params.fear_greed.value()),
            params.samples as u64,
            case_key(params.expected_case),
            seed,
        ])
    }
}

/// Bounded memo table for simulation results.
///
/// Backed by a least-recently-used `SizedCache`; once full, the entry used
/// longest ago is evicted.
pub struct SimulationCache<V> {
    store: SizedCache<ScenarioKey, V>,
}

impl<V: Clone> Default for SimulationCache<V> {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl<V: Clone> SimulationCache<V> {
    /// Entries kept by `new`.
    pub const DEFAULT_CAPACITY: usize = 1_000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: SizedCache::with_size(capacity.max(1)),
        }
    }

    /// Returns the cached value for `key`, computing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: ScenarioKey, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.store.cache_get(&key) {
            return value.clone();
        }
        let value = compute();
        self.store.cache_set(key, value.clone());
        value
    }

    /// Looks up `key`, counting the hit or miss.
    pub fn get(&mut self, key: &ScenarioKey) -> Option<&V> {
        self.store.cache_get(key)
    }

    /// Drops one entry.
    pub fn invalidate(&mut self, key: &ScenarioKey) -> Option<V> {
        self.store.cache_remove(key)
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        debug!(entries = self.store.cache_size(), "clearing simulation cache");
        self.store.cache_clear();
        self.store.cache_reset_metrics();
    }

    pub fn len(&self) -> usize {
        self.store.cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.store.cache_capacity().unwrap_or(Self::DEFAULT_CAPACITY)
    }

    pub fn hits(&self) -> u64 {
        self.store.cache_hits().unwrap_or(0)
    }

    pub fn misses(&self) -> u64 {
        self.store.cache_misses().unwrap_or(0)
    }
}

/// Seeded pool Monte Carlo, memoized in `cache`.
pub fn cached_monte_carlo_pool(
    cache: &mut SimulationCache<MonteCarloOutcome>,
    position: &PoolPosition,
    assumptions: &YieldAssumptions,
    config: &PoolMonteCarloConfig,
    seed: u64,
) -> MonteCarloOutcome {
    let key = ScenarioKey::pool(position, assumptions, config, seed);
    cache.get_or_insert_with(key, || {
        monte_carlo_pool(position, assumptions, config, &mut seeded_rng(Some(seed)))
    })
}

/// Seeded asset Monte Carlo, memoized in `cache`.
pub fn cached_monte_carlo_asset(
    cache: &mut SimulationCache<AssetSimulation>,
    params: &AssetSimulationParams,
    seed: u64,
) -> AssetSimulation {
    let key = ScenarioKey::asset(params, seed);
    cache.get_or_insert_with(key, || monte_carlo_asset(params, &mut seeded_rng(Some(seed))))
}
