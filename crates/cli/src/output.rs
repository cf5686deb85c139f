//! Table and JSON rendering.

use anyhow::{Context, Result};
use lp_risk_domain::math::rounding::to_decimal_2dp;
use lp_risk_domain::value_objects::risk_score::RiskScore;
use prettytable::{Table, row};
use serde::Serialize;

/// Output format selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

impl Format {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Table }
    }

    /// Prints `value` as pretty JSON, or the table built by `table`.
    pub fn emit<T, F>(self, value: &T, table: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce(&T) -> Table,
    {
        match self {
            Self::Json => {
                let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
                println!("{json}");
            }
            Self::Table => {
                table(value).printstd();
            }
        }
        Ok(())
    }
}

/// Two-column metric table.
pub fn metric_table<I>(rows: I) -> Table
where
    I: IntoIterator<Item = (&'static str, String)>,
{
    let mut table = Table::new();
    table.set_titles(row!["Metric", "Value"]);
    for (name, value) in rows {
        table.add_row(row![name, r->value]);
    }
    table
}

/// Half-even rounded to cents; non-finite values print as-is.
fn two_dp(value: f64) -> String {
    to_decimal_2dp(value).map_or_else(|| value.to_string(), |d| format!("{d:.2}"))
}

pub fn money(value: f64) -> String {
    format!("${}", two_dp(value))
}

pub fn pct(value: f64) -> String {
    format!("{}%", two_dp(value))
}

pub fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// Breakdown of a composite score, one row per factor.
pub fn risk_table(score: &RiskScore) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Factor", "Score", "Weight", "Input"]);
    for component in &score.components {
        let input = if component.provided { "provided" } else { "missing" };
        table.add_row(row![
            component.factor.to_string(),
            r->format!("{:.0}", component.score),
            r->format!("{:.2}", component.weight),
            input
        ]);
    }
    table.add_row(row![
        b->"Composite",
        rb->format!("{:.2}", score.score),
        "",
        b->score.category.to_string()
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_risk_domain::metrics::risk::{PoolRiskInputs, pool_risk_score};

    #[test]
    fn test_format_from_flag() {
        assert_eq!(Format::from_flag(true), Format::Json);
        assert_eq!(Format::from_flag(false), Format::Table);
    }

    #[test]
    fn test_formatters() {
        assert_eq!(money(10_000.0), "$10000.00");
        assert_eq!(pct(5.719), "5.72%");
        assert_eq!(money(0.125), "$0.12");
        assert_eq!(money(f64::INFINITY), "$inf");
        assert_eq!(optional(None), "n/a");
        assert_eq!(optional(Some(1.234)), "1.23");
    }

    #[test]
    fn test_risk_table_has_row_per_factor_plus_total() {
        let score = pool_risk_score(&PoolRiskInputs {
            tvl_usd: 5_000_000.0,
            trust_score: 4,
            apy: 20.0,
        });
        let table = risk_table(&score);
        assert_eq!(table.len(), score.components.len() + 1);
    }
}
