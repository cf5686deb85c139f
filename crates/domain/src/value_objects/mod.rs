pub mod break_even;
pub mod fear_greed;
pub mod monte_carlo_outcome;
pub mod pool_position;
pub mod projection;
pub mod risk_score;
pub mod yield_assumptions;

pub use break_even::BreakEven;
pub use fear_greed::FearGreedIndex;
pub use monte_carlo_outcome::MonteCarloOutcome;
pub use pool_position::PoolPosition;
pub use projection::{PoolValuation, ProjectionResult};
pub use risk_score::{RiskScore, SubScore};
pub use yield_assumptions::YieldAssumptions;
