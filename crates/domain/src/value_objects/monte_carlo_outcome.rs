use crate::enums::ExpectedCase;
use crate::value_objects::projection::ProjectionResult;
use serde::{Deserialize, Serialize};

/// Outcome range of a pool Monte Carlo run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloOutcome {
    /// 10th percentile outcome by value.
    pub worst: ProjectionResult,
    /// Central estimate, produced per `expected_case`.
    pub expected: ProjectionResult,
    /// 90th percentile outcome by value.
    pub best: ProjectionResult,
    /// Number of sampled scenarios.
    pub samples: usize,
    /// Convention used for `expected`.
    pub expected_case: ExpectedCase,
}

impl MonteCarloOutcome {
    /// Spread between the best and worst outcomes.
    #[must_use]
    pub fn value_range(&self) -> f64 {
        self.best.value - self.worst.value
    }
}
