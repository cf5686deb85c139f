//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use lp_risk_simulation::prelude::*;
//! ```

// Cache
pub use crate::cache::{
    ScenarioKey, SimulationCache, cached_monte_carlo_asset, cached_monte_carlo_pool,
};

// Monte Carlo
pub use crate::monte_carlo::{
    AssetSimulation, AssetSimulationParams, DEFAULT_SAMPLES, PoolMonteCarloConfig,
    monte_carlo_asset, monte_carlo_pool,
};

// Price paths
pub use crate::price_path::{DeterministicReturns, ReturnModel, SentimentReturnModel, ValuePath};

// Generator
pub use crate::rng::seeded_rng;

// Sentiment
pub use crate::sentiment::{adjusted_volatility, monthly_volatility};
