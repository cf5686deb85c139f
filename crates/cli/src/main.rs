//! Command Line Interface for the LP Risk Engine.
mod output;
mod scenario;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use lp_risk_domain::enums::ExpectedCase;
use lp_risk_domain::metrics::break_even::break_even_months_for_position;
use lp_risk_domain::metrics::risk::{
    AssetRiskInputs, PoolRiskInputs, PositionRiskInputs, asset_risk_score, pool_risk_score,
    position_risk_score,
};
use lp_risk_domain::value_objects::fear_greed::FearGreedIndex;
use lp_risk_domain::value_objects::pool_position::PoolPosition;
use lp_risk_domain::value_objects::yield_assumptions::YieldAssumptions;
use lp_risk_domain::{
    BreakEven, InputError, MonteCarloOutcome, ProjectionResult, RiskScore,
    break_even_months_with_price_changes, future_value,
};
use lp_risk_simulation::monte_carlo::{AssetSimulationParams, monte_carlo_asset, monte_carlo_pool};
use lp_risk_simulation::rng::seeded_rng;
use output::{Format, metric_table, money, optional, pct, risk_table};
use scenario::Scenario;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lp-risk")]
#[command(about = "Liquidity pool valuation, projection and risk scoring", long_about = None)]
struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Seed for reproducible simulations
    #[arg(long, global = true, env = "LP_RISK_SEED")]
    seed: Option<u64>,

    /// JSON scenario file supplying inputs; flags override it
    #[arg(long, global = true)]
    scenario: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a position and its impermanent loss at current prices
    Pool {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Project a position's value over a horizon
    Project {
        #[command(flatten)]
        position: PositionArgs,
        #[command(flatten)]
        yields: YieldArgs,
        /// Horizon in months
        #[arg(long, default_value_t = 12, allow_negative_numbers = true)]
        months: i32,
    },
    /// Months of yield needed to recover impermanent loss
    BreakEven {
        #[command(flatten)]
        position: PositionArgs,
        #[command(flatten)]
        yields: YieldArgs,
    },
    /// Monte Carlo range of a pool projection
    SimulatePool {
        #[command(flatten)]
        position: PositionArgs,
        #[command(flatten)]
        yields: YieldArgs,
        /// Number of sampled scenarios
        #[arg(long)]
        samples: Option<usize>,
        /// Horizon in months
        #[arg(long, allow_negative_numbers = true)]
        months: Option<i32>,
        /// Relative half-width of the sampling ranges
        #[arg(long)]
        spread: Option<f64>,
        /// Convention for the expected value
        #[arg(long, value_enum)]
        expected: Option<ExpectedArg>,
    },
    /// Monte Carlo paths of a single asset
    SimulateAsset {
        #[command(flatten)]
        asset: AssetArgs,
        /// Annual risk-free rate in percent, for Sharpe and Sortino
        #[arg(long, default_value_t = 0.0)]
        risk_free: f64,
    },
    /// Composite pool risk score
    ScorePool {
        /// Total value locked in USD
        #[arg(long)]
        tvl: Option<f64>,
        /// Platform trust score, 1 to 5
        #[arg(long)]
        trust: Option<u8>,
        /// Advertised APY in percent
        #[arg(long)]
        apy: Option<f64>,
    },
    /// Composite asset risk score
    ScoreAsset {
        #[command(flatten)]
        risk: AssetRiskArgs,
    },
    /// Composite position risk score
    ScorePosition {
        #[command(flatten)]
        position: PositionArgs,
        #[command(flatten)]
        yields: YieldArgs,
        /// Horizon in months for the net return
        #[arg(long, default_value_t = 12)]
        months: i32,
        /// Pool TVL in USD
        #[arg(long)]
        tvl: Option<f64>,
        /// Signed TVL change in percent
        #[arg(long, allow_negative_numbers = true)]
        tvl_change: Option<f64>,
    },
}

#[derive(Args)]
struct PositionArgs {
    /// Price of asset 1 at entry
    #[arg(long)]
    initial_price_1: Option<f64>,
    /// Price of asset 2 at entry
    #[arg(long)]
    initial_price_2: Option<f64>,
    /// Price of asset 1 today; defaults to the entry price
    #[arg(long)]
    current_price_1: Option<f64>,
    /// Price of asset 2 today; defaults to the entry price
    #[arg(long)]
    current_price_2: Option<f64>,
    /// Amount invested in quote currency
    #[arg(long)]
    investment: Option<f64>,
}

impl PositionArgs {
    fn resolve(&self, base: Option<&PoolPosition>) -> Result<PoolPosition> {
        let initial_price_1 = self
            .initial_price_1
            .or(base.map(|p| p.initial_price_1))
            .context("missing --initial-price-1")?;
        let initial_price_2 = self
            .initial_price_2
            .or(base.map(|p| p.initial_price_2))
            .context("missing --initial-price-2")?;
        let investment = self
            .investment
            .or(base.map(|p| p.investment))
            .context("missing --investment")?;
        let current_1 = self.current_price_1.or(base.map(|p| p.current_price_1));
        let current_2 = self.current_price_2.or(base.map(|p| p.current_price_2));

        let position = match (current_1, current_2) {
            (None, None) => PoolPosition::new_pool(initial_price_1, initial_price_2, investment),
            (current_1, current_2) => PoolPosition::new(
                initial_price_1,
                initial_price_2,
                current_1.unwrap_or(initial_price_1),
                current_2.unwrap_or(initial_price_2),
                investment,
            ),
        };
        warn_invalid("position", position.validate());
        Ok(position)
    }
}

#[derive(Args)]
struct YieldArgs {
    /// Annual percentage yield
    #[arg(long, allow_negative_numbers = true)]
    apy: Option<f64>,
    /// Expected annual price change of asset 1, in percent
    #[arg(long, allow_negative_numbers = true)]
    price_change_1: Option<f64>,
    /// Expected annual price change of asset 2, in percent
    #[arg(long, allow_negative_numbers = true)]
    price_change_2: Option<f64>,
}

impl YieldArgs {
    fn resolve(&self, base: Option<&YieldAssumptions>) -> Result<YieldAssumptions> {
        let apy = self.apy.or(base.map(|a| a.apy)).context("missing --apy")?;
        let change_1 = self
            .price_change_1
            .or(base.map(|a| a.expected_price_change_1))
            .unwrap_or(0.0);
        let change_2 = self
            .price_change_2
            .or(base.map(|a| a.expected_price_change_2))
            .unwrap_or(0.0);

        let assumptions = YieldAssumptions::new(apy).with_price_changes(change_1, change_2);
        warn_invalid("assumptions", assumptions.validate());
        Ok(assumptions)
    }
}

#[derive(Args)]
struct AssetArgs {
    /// Amount invested in quote currency
    #[arg(long)]
    investment: Option<f64>,
    /// Expected annual return as a fraction
    #[arg(long, allow_negative_numbers = true)]
    expected_return: Option<f64>,
    /// Annual volatility as a fraction; derived from sentiment when omitted
    #[arg(long)]
    volatility: Option<f64>,
    /// Horizon in months
    #[arg(long)]
    months: Option<u32>,
    /// Fear & greed index, 0 to 100
    #[arg(long)]
    fear_greed: Option<u32>,
    /// Number of simulated paths
    #[arg(long)]
    samples: Option<usize>,
    /// Convention for the expected value
    #[arg(long, value_enum)]
    expected: Option<ExpectedArg>,
}

impl AssetArgs {
    fn resolve(&self, base: Option<&AssetSimulationParams>) -> Result<AssetSimulationParams> {
        let investment = self
            .investment
            .or(base.map(|p| p.investment))
            .context("missing --investment")?;
        let expected_return = self
            .expected_return
            .or(base.map(|p| p.expected_annual_return))
            .context("missing --expected-return")?;
        let months = self
            .months
            .or(base.map(|p| p.months))
            .context("missing --months")?;

        let mut params = AssetSimulationParams::new(investment, expected_return, months);
        if let Some(base) = base {
            params.volatility = base.volatility;
            params.fear_greed = base.fear_greed;
            params.samples = base.samples;
            params.expected_case = base.expected_case;
        }
        if let Some(volatility) = self.volatility {
            params = params.with_volatility(volatility);
        }
        if let Some(index) = self.fear_greed {
            params = params.with_fear_greed(FearGreedIndex::new(index)?);
        }
        if let Some(samples) = self.samples {
            params = params.with_samples(samples);
        }
        if let Some(expected) = self.expected {
            params = params.with_expected_case(expected.into());
        }
        warn_invalid("asset simulation", params.validate());
        Ok(params)
    }
}

#[derive(Args)]
struct AssetRiskArgs {
    /// Maximum drawdown in percent
    #[arg(long)]
    max_drawdown: Option<f64>,
    /// Circulating over total supply
    #[arg(long)]
    dilution: Option<f64>,
    /// Share of supply held by the top holders, in percent
    #[arg(long)]
    concentration: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    sharpe: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    sortino: Option<f64>,
    /// Security audit score, 0 to 100
    #[arg(long)]
    audit: Option<f64>,
    /// Market capitalization in USD
    #[arg(long)]
    market_cap: Option<f64>,
    /// Fear & greed index, 0 to 100
    #[arg(long)]
    fear_greed: Option<u32>,
    /// 24h volume over market cap
    #[arg(long)]
    liquidity: Option<f64>,
}

impl AssetRiskArgs {
    /// Overlays the given flags on `base`.
    fn resolve(&self, base: AssetRiskInputs) -> Result<AssetRiskInputs> {
        let fear_greed = self.fear_greed.map(FearGreedIndex::new).transpose()?;
        Ok(AssetRiskInputs {
            max_drawdown_pct: self.max_drawdown.or(base.max_drawdown_pct),
            dilution_ratio: self.dilution.or(base.dilution_ratio),
            supply_concentration_pct: self.concentration.or(base.supply_concentration_pct),
            sharpe_ratio: self.sharpe.or(base.sharpe_ratio),
            sortino_ratio: self.sortino.or(base.sortino_ratio),
            audit_score: self.audit.or(base.audit_score),
            market_cap_usd: self.market_cap.or(base.market_cap_usd),
            fear_greed: fear_greed.or(base.fear_greed),
            liquidity_ratio: self.liquidity.or(base.liquidity_ratio),
        })
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExpectedArg {
    /// Projection at the unsampled inputs
    Central,
    /// Mean of the sampled outcomes
    Mean,
}

impl From<ExpectedArg> for ExpectedCase {
    fn from(arg: ExpectedArg) -> Self {
        match arg {
            ExpectedArg::Central => ExpectedCase::CentralInputs,
            ExpectedArg::Mean => ExpectedCase::SampleMean,
        }
    }
}

fn warn_invalid(what: &str, result: Result<(), InputError>) {
    if let Err(error) = result {
        warn!(%error, "invalid {what}, results fall back to defaults where undefined");
    }
}

#[derive(Serialize)]
struct BreakEvenReport {
    impermanent_loss_pct: f64,
    without_drift: BreakEven,
    with_drift: Option<BreakEven>,
}

#[derive(Serialize)]
struct PoolSimulationReport {
    #[serde(flatten)]
    outcome: MonteCarloOutcome,
    central: ProjectionResult,
}

#[derive(Serialize)]
struct AssetSimulationReport {
    worst: f64,
    expected: f64,
    best: f64,
    max_drawdown_pct: f64,
    value_at_risk_95: f64,
    adjusted_volatility: f64,
    value_cap: f64,
    sharpe_ratio: Option<f64>,
    sortino_ratio: Option<f64>,
    risk: RiskScore,
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = Format::from_flag(cli.json);
    let scenario = Scenario::load_optional(cli.scenario.as_deref())?;
    debug!(seed = ?cli.seed, "starting");

    match &cli.command {
        Commands::Pool { position } => {
            let position = position.resolve(scenario.position.as_ref())?;
            let valuation = position.valuation();
            format.emit(&valuation, |v| {
                metric_table([
                    ("Investment", money(position.investment)),
                    ("Pool value", money(v.pool_value)),
                    ("Value if held", money(v.value_if_held)),
                    ("Impermanent loss", pct(v.impermanent_loss_pct)),
                    ("Loss vs hold", money(v.loss_vs_hold())),
                ])
            })?;
        }
        Commands::Project {
            position,
            yields,
            months,
        } => {
            let position = position.resolve(scenario.position.as_ref())?;
            let assumptions = yields.resolve(scenario.assumptions.as_ref())?;
            let projection = future_value(&position, &assumptions, *months);
            format.emit(&projection, |p| {
                metric_table([
                    ("Horizon", format!("{months} months")),
                    ("Investment", money(position.investment)),
                    ("Projected value", money(p.value)),
                    ("Impermanent loss", pct(p.impermanent_loss_pct)),
                ])
            })?;
        }
        Commands::BreakEven { position, yields } => {
            let position = position.resolve(scenario.position.as_ref())?;
            let assumptions = yields.resolve(scenario.assumptions.as_ref())?;
            let report = BreakEvenReport {
                impermanent_loss_pct: position.valuation().impermanent_loss_pct,
                without_drift: break_even_months_for_position(&position, assumptions.apy),
                with_drift: assumptions
                    .has_drift()
                    .then(|| break_even_months_with_price_changes(&position, &assumptions)),
            };
            format.emit(&report, |r| {
                metric_table([
                    ("Impermanent loss", pct(r.impermanent_loss_pct)),
                    ("Break-even at current prices", r.without_drift.to_string()),
                    (
                        "Break-even with price drift",
                        r.with_drift.map_or_else(|| "n/a".to_string(), |b| b.to_string()),
                    ),
                ])
            })?;
        }
        Commands::SimulatePool {
            position,
            yields,
            samples,
            months,
            spread,
            expected,
        } => {
            let position = position.resolve(scenario.position.as_ref())?;
            let assumptions = yields.resolve(scenario.assumptions.as_ref())?;
            let mut config = scenario.pool_simulation.unwrap_or_default();
            if let Some(samples) = samples {
                config = config.with_samples(*samples);
            }
            if let Some(months) = months {
                config = config.with_horizon(*months);
            }
            if let Some(spread) = spread {
                config.spread = *spread;
            }
            if let Some(expected) = expected {
                config = config.with_expected_case((*expected).into());
            }
            warn_invalid("pool simulation", config.validate());

            let outcome = monte_carlo_pool(
                &position,
                &assumptions,
                &config,
                &mut seeded_rng(cli.seed),
            );
            let report = PoolSimulationReport {
                outcome,
                central: future_value(&position, &assumptions, config.horizon_months),
            };
            format.emit(&report, |r| {
                metric_table([
                    ("Samples", r.outcome.samples.to_string()),
                    ("Horizon", format!("{} months", config.horizon_months)),
                    ("Worst (p10)", money(r.outcome.worst.value)),
                    ("Expected", money(r.outcome.expected.value)),
                    ("Best (p90)", money(r.outcome.best.value)),
                    ("Central projection", money(r.central.value)),
                    ("Worst-case IL", pct(r.outcome.worst.impermanent_loss_pct)),
                ])
            })?;
        }
        Commands::SimulateAsset { asset, risk_free } => {
            let params = asset.resolve(scenario.asset.as_ref())?;
            let simulation = monte_carlo_asset(&params, &mut seeded_rng(cli.seed));

            let simulated = simulation.risk_inputs(*risk_free);
            let base = scenario.asset_risk.unwrap_or_default();
            let inputs = AssetRiskInputs {
                fear_greed: Some(params.fear_greed),
                ..merge_asset_inputs(simulated, base)
            };

            let report = AssetSimulationReport {
                worst: simulation.worst,
                expected: simulation.expected,
                best: simulation.best,
                max_drawdown_pct: simulation.max_drawdown_pct,
                value_at_risk_95: simulation.value_at_risk_95,
                adjusted_volatility: simulation.adjusted_volatility,
                value_cap: simulation.value_cap,
                sharpe_ratio: simulation.sharpe_ratio(*risk_free),
                sortino_ratio: simulation.sortino_ratio(*risk_free),
                risk: asset_risk_score(&inputs),
            };
            format.emit(&report, |r| {
                let mut table = metric_table([
                    ("Worst (p10)", money(r.worst)),
                    ("Expected", money(r.expected)),
                    ("Best (p90)", money(r.best)),
                    ("Value cap", money(r.value_cap)),
                    ("Value at risk (95%)", money(r.value_at_risk_95)),
                    ("Max drawdown", pct(r.max_drawdown_pct)),
                    ("Adjusted volatility", pct(r.adjusted_volatility * 100.0)),
                    ("Sharpe", optional(r.sharpe_ratio)),
                    ("Sortino", optional(r.sortino_ratio)),
                ]);
                table.add_row(prettytable::row![
                    "Risk score",
                    r->format!("{:.2} ({})", r.risk.score, r.risk.category)
                ]);
                table
            })?;
        }
        Commands::ScorePool { tvl, trust, apy } => {
            let base = scenario.pool_risk;
            let inputs = PoolRiskInputs {
                tvl_usd: tvl
                    .or(base.map(|b| b.tvl_usd))
                    .context("missing --tvl")?,
                trust_score: trust
                    .or(base.map(|b| b.trust_score))
                    .context("missing --trust")?,
                apy: apy.or(base.map(|b| b.apy)).context("missing --apy")?,
            };
            if !(1..=5).contains(&inputs.trust_score) {
                warn_invalid(
                    "pool risk",
                    Err(InputError::TrustScoreOutOfRange(inputs.trust_score)),
                );
            }
            let score = pool_risk_score(&inputs);
            format.emit(&score, risk_table)?;
        }
        Commands::ScoreAsset { risk } => {
            let inputs = risk.resolve(scenario.asset_risk.unwrap_or_default())?;
            let score = asset_risk_score(&inputs);
            format.emit(&score, risk_table)?;
        }
        Commands::ScorePosition {
            position,
            yields,
            months,
            tvl,
            tvl_change,
        } => {
            let position = position.resolve(scenario.position.as_ref())?;
            let assumptions = yields.resolve(scenario.assumptions.as_ref())?;
            let projection = future_value(&position, &assumptions, *months);
            let tvl_usd = tvl.or(scenario.tvl_usd).unwrap_or(0.0);
            let tvl_change_pct = tvl_change.or(scenario.tvl_change_pct).unwrap_or(0.0);

            let inputs = PositionRiskInputs::from_projection(
                &position,
                &projection,
                tvl_usd,
                tvl_change_pct,
            );
            let score = position_risk_score(&inputs);
            format.emit(&score, risk_table)?;
        }
    }

    Ok(())
}

/// Prefers simulated figures, falling back to the scenario's.
fn merge_asset_inputs(simulated: AssetRiskInputs, base: AssetRiskInputs) -> AssetRiskInputs {
    AssetRiskInputs {
        max_drawdown_pct: simulated.max_drawdown_pct.or(base.max_drawdown_pct),
        dilution_ratio: simulated.dilution_ratio.or(base.dilution_ratio),
        supply_concentration_pct: simulated
            .supply_concentration_pct
            .or(base.supply_concentration_pct),
        sharpe_ratio: simulated.sharpe_ratio.or(base.sharpe_ratio),
        sortino_ratio: simulated.sortino_ratio.or(base.sortino_ratio),
        audit_score: simulated.audit_score.or(base.audit_score),
        market_cap_usd: simulated.market_cap_usd.or(base.market_cap_usd),
        fear_greed: simulated.fear_greed.or(base.fear_greed),
        liquidity_ratio: simulated.liquidity_ratio.or(base.liquidity_ratio),
    }
}
