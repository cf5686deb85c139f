//! Stochastic simulation for liquidity pool and single-asset positions.
//!
//! This crate provides:
//! - Seeded random number generation for reproducible runs
//! - Sentiment-adjusted volatility and skew
//! - Monthly price path generation
//! - Monte Carlo outcome ranges for pools and assets
//! - Memoization of seeded runs

/// Prelude module for convenient imports.
pub mod prelude;

/// Memoization of seeded runs.
pub mod cache;
/// Monte Carlo runners.
pub mod monte_carlo;
/// Monthly value paths and return models.
pub mod price_path;
/// Generator construction.
pub mod rng;
/// Fear and greed adjustments.
pub mod sentiment;
/// Percentiles and sampling helpers.
pub mod statistics;
