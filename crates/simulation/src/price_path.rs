//! Monthly return models and compounded value paths.

use crate::sentiment::{beta_shape, monthly_volatility};
use lp_risk_domain::enums::Sentiment;
use lp_risk_domain::metrics::returns::max_drawdown_pct;
use rand::Rng;
use rand_distr::{Beta, Distribution, Normal};

/// Generates a sequence of simple monthly returns.
pub trait ReturnModel {
    fn monthly_returns<R: Rng + ?Sized>(&self, rng: &mut R, months: usize) -> Vec<f64>;
}

/// Sentiment-skewed return model.
///
/// Each path first draws an annual return from a Beta distribution rescaled
/// onto `[expected - volatility, expected + volatility]`, then draws monthly
/// returns around the equivalent monthly rate.
#[derive(Debug, Clone)]
pub struct SentimentReturnModel {
    /// Expected annual return as a fraction.
    pub expected_annual_return: f64,
    /// Annual volatility after skew.
    pub adjusted_volatility: f64,
    /// Monthly volatility; monthly draws use half of it as standard deviation.
    pub monthly_volatility: f64,
    beta: Option<Beta<f64>>,
}

impl SentimentReturnModel {
    pub fn new(expected_annual_return: f64, adjusted_volatility: f64, sentiment: Sentiment) -> Self {
        let (alpha, beta) = beta_shape(sentiment);
        Self {
            expected_annual_return,
            adjusted_volatility,
            monthly_volatility: monthly_volatility(adjusted_volatility),
            beta: Beta::new(alpha, beta).ok(),
        }
    }

    /// Draws one annual return.
    pub fn annual_return<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let unit = self.beta.as_ref().map_or(0.5, |beta| beta.sample(rng));
        let low = self.expected_annual_return - self.adjusted_volatility;
        low + unit * 2.0 * self.adjusted_volatility
    }
}

/// Monthly rate equivalent to `annual_return`; a total loss floors at -100%.
pub fn monthly_base_return(annual_return: f64) -> f64 {
    (1.0 + annual_return).max(0.0).powf(1.0 / 12.0) - 1.0
}

impl ReturnModel for SentimentReturnModel {
    fn monthly_returns<R: Rng + ?Sized>(&self, rng: &mut R, months: usize) -> Vec<f64> {
        let base = monthly_base_return(self.annual_return(rng));
        match Normal::new(base, self.monthly_volatility / 2.0) {
            Ok(normal) => (0..months).map(|_| normal.sample(rng)).collect(),
            Err(_) => vec![base; months],
        }
    }
}

/// Replays fixed monthly returns, cycling when the path is longer.
#[derive(Debug, Clone)]
pub struct DeterministicReturns {
    pub returns: Vec<f64>,
}

impl DeterministicReturns {
    pub fn new(returns: Vec<f64>) -> Self {
        Self { returns }
    }
}

impl ReturnModel for DeterministicReturns {
    fn monthly_returns<R: Rng + ?Sized>(&self, _rng: &mut R, months: usize) -> Vec<f64> {
        if self.returns.is_empty() {
            return vec![0.0; months];
        }
        self.returns.iter().copied().cycle().take(months).collect()
    }
}

/// A compounded value path with the returns that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuePath {
    /// Values from the start, one more entry than `monthly_returns`.
    pub values: Vec<f64>,
    pub monthly_returns: Vec<f64>,
}

impl ValuePath {
    /// Compounds `monthly_returns` from `start`.
    ///
    /// A month can lose at most everything, so values never turn negative.
    pub fn compound(start: f64, monthly_returns: Vec<f64>) -> Self {
        let mut values = Vec::with_capacity(monthly_returns.len() + 1);
        values.push(start);

        let mut current = start;
        for r in &monthly_returns {
            current *= (1.0 + r).max(0.0);
            values.push(current);
        }

        Self {
            values,
            monthly_returns,
        }
    }

    /// Draws and compounds a path from `model`.
    pub fn generate<M: ReturnModel, R: Rng + ?Sized>(
        model: &M,
        rng: &mut R,
        start: f64,
        months: usize,
    ) -> Self {
        Self::compound(start, model.monthly_returns(rng, months))
    }

    pub fn final_value(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// Caps the final value at `ceiling`.
    pub fn cap_final(&mut self, ceiling: f64) {
        if let Some(last) = self.values.last_mut() {
            *last = last.min(ceiling);
        }
    }

    pub fn max_drawdown_pct(&self) -> f64 {
        max_drawdown_pct(&self.values)
    }
}
