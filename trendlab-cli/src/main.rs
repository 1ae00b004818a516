//! TrendLab CLI — run a backtest against a CSV bar feed.

mod feed;
mod strategies;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trendlab_core::commission::CommissionModel;
use trendlab_core::config::Settings;
use trendlab_core::domain::ContractRegistry;
use trendlab_core::engine::{BacktestEngine, EngineConfig};
use trendlab_core::risk::{RiskManagerConfig, StopConfig};

use feed::FeedFormat;
use strategies::SmaCrossover;

#[derive(Parser)]
#[command(name = "trendlab", about = "Event-driven backtester for TX/MTX futures")]
struct Cli {
    /// Path to the bar CSV file
    #[arg(long)]
    bars: String,

    /// CSV layout: "taifex" or "generic"
    #[arg(long, default_value = "generic")]
    format: FeedFormat,

    /// Contract symbol traded (must resolve against the contract registry)
    #[arg(long, default_value = "TX")]
    symbol: String,

    /// Optional TOML settings file
    #[arg(long)]
    config: Option<String>,

    /// Fast SMA period for the default crossover strategy
    #[arg(long, default_value_t = 10)]
    fast: usize,

    /// Slow SMA period for the default crossover strategy
    #[arg(long, default_value_t = 30)]
    slow: usize,

    /// Contracts per entry
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let bars = feed::load_bars(&cli.bars, cli.format, &cli.symbol)?;
    tracing::info!(count = bars.len(), path = %cli.bars, "loaded bars");

    let contracts = ContractRegistry::new();
    let commission = CommissionModel::new(settings.backtest.commission_per_contract, settings.backtest.tax_rate);

    let risk_config = RiskManagerConfig {
        stops: StopConfig {
            stop_loss_points: settings.risk.stop_loss_points,
            take_profit_points: settings.risk.take_profit_points,
            trailing_stop_points: settings.risk.trailing_stop_points,
            time_stop_bars: settings.risk.time_stop_bars,
        },
        max_position_contracts: settings.risk.max_position_contracts,
        max_total_exposure_pct: settings.risk.max_total_exposure_pct,
        max_daily_loss: settings.risk.max_daily_loss,
        max_drawdown_pct: settings.risk.max_drawdown_pct,
    };

    let engine_config = EngineConfig {
        initial_capital: settings.backtest.initial_capital,
        slippage_ticks: settings.backtest.slippage_ticks,
        max_history: 500,
        auto_close_before_session_end: settings.risk.auto_close_before_session_end,
    };

    let mut engine = BacktestEngine::new(engine_config, contracts, commission, risk_config);
    let mut strategy = SmaCrossover::new(cli.fast, cli.slow, cli.symbol.clone(), cli.quantity);

    let result = engine.run(&bars, &mut strategy)?;

    println!("bars processed:   {}", result.bar_count);
    println!("final equity:     {}", result.final_equity);
    println!("trades:           {}", result.trades.len());
    println!("total commission: {}", result.total_commission);
    println!("total tax:        {}", result.total_tax);

    Ok(())
}
