//! Valuation and risk metrics for liquidity pool positions.
//!
//! This crate holds the deterministic half of the engine:
//! - Constant-product pool valuation and impermanent loss
//! - Future value projection under yield and linear price drift
//! - Break-even searches, with and without drift
//! - Return statistics (drawdown, Sharpe, Sortino)
//! - Composite risk scores for assets, pools and positions
//!
//! Every function is pure and never fails on numeric input; degenerate
//! inputs produce documented fallback values instead.

/// Ordinal and label enums.
pub mod enums;
/// Input validation errors.
pub mod error;
/// Pool math and rounding.
pub mod math;
/// Metrics built on the pool math.
pub mod metrics;
/// Immutable inputs and results.
pub mod value_objects;

pub use enums::{ExpectedCase, RiskCategory, RiskFactor, Sentiment};
pub use error::InputError;
pub use math::constant_product::pool_value;
pub use metrics::break_even::{
    MAX_BREAK_EVEN_MONTHS, break_even_months, break_even_months_with_price_changes,
};
pub use metrics::impermanent_loss::impermanent_loss;
pub use metrics::projection::future_value;
pub use metrics::risk::{
    AssetRiskInputs, PoolRiskInputs, PositionRiskInputs, asset_risk_score, pool_risk_score,
    position_risk_score,
};
pub use value_objects::{
    BreakEven, FearGreedIndex, MonteCarloOutcome, PoolPosition, PoolValuation, ProjectionResult,
    RiskScore, SubScore, YieldAssumptions,
};
