//! Path and return statistics.

/// Months per year, used to annualize monthly statistics.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Largest peak-to-trough drop along `path`, in percent.
///
/// Returns 0 for empty or monotonically rising paths.
pub fn max_drawdown_pct(path: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_drawdown = 0.0_f64;

    for &value in path {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let drawdown = (peak - value) / peak * 100.0;
            max_drawdown = max_drawdown.max(drawdown);
        }
    }

    max_drawdown
}

/// Annualized Sharpe ratio of monthly returns.
///
/// # Arguments
///
/// * `monthly_returns` - Simple monthly returns as fractions
/// * `risk_free_annual_pct` - Annual risk-free rate in percent
///
/// # Returns
///
/// * `Option<f64>` - `None` with fewer than two returns or zero dispersion.
pub fn sharpe_ratio(monthly_returns: &[f64], risk_free_annual_pct: f64) -> Option<f64> {
    if monthly_returns.len() < 2 {
        return None;
    }
    let risk_free = risk_free_annual_pct / 100.0 / MONTHS_PER_YEAR;
    let excess: Vec<f64> = monthly_returns.iter().map(|r| r - risk_free).collect();

    let mean = mean(&excess);
    let variance = excess.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
        / (excess.len() - 1) as f64;
    let std_dev = variance.sqrt();

    if std_dev > f64::EPSILON && std_dev.is_finite() {
        Some(mean / std_dev * MONTHS_PER_YEAR.sqrt())
    } else {
        None
    }
}

/// Annualized Sortino ratio of monthly returns; only shortfalls below the
/// risk-free rate count as risk.
///
/// Returns `None` with fewer than two returns or no downside at all.
pub fn sortino_ratio(monthly_returns: &[f64], risk_free_annual_pct: f64) -> Option<f64> {
    if monthly_returns.len() < 2 {
        return None;
    }
    let risk_free = risk_free_annual_pct / 100.0 / MONTHS_PER_YEAR;
    let excess: Vec<f64> = monthly_returns.iter().map(|r| r - risk_free).collect();

    let downside = (excess.iter().map(|r| r.min(0.0).powi(2)).sum::<f64>()
        / excess.len() as f64)
        .sqrt();

    if downside > f64::EPSILON && downside.is_finite() {
        Some(mean(&excess) / downside * MONTHS_PER_YEAR.sqrt())
    } else {
        None
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
