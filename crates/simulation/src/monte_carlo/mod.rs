//! Monte Carlo outcome ranges.
//!
//! Two models are provided:
//! - `pool`: sensitivity sampling of yield and drift around a pool projection
//! - `asset`: sentiment-driven path simulation of a single asset

pub mod asset;
pub mod pool;

pub use asset::{AssetSimulation, AssetSimulationParams, monte_carlo_asset};
pub use pool::{PoolMonteCarloConfig, monte_carlo_pool};

/// Default number of sampled scenarios.
pub const DEFAULT_SAMPLES: usize = 200;

/// Fewest samples for which percentile reporting is meaningful.
pub const MIN_SAMPLES: usize = 10;

/// Percentile reported as the worst case.
pub const WORST_PERCENTILE: usize = 10;

/// Percentile reported as the best case.
pub const BEST_PERCENTILE: usize = 90;
