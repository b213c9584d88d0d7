use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use market_beacon::analytics;
use market_beacon::core::config::ExchangeConfig;
use market_beacon::core::types::{Granularity, OrderBookLevel};
use market_beacon::BitgetBuilder;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// How much of the market to analyze in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AnalysisMode {
    /// Trades and candles only
    Fast,
    /// Trades, candles, and the order book
    Full,
}

#[derive(Debug, Parser)]
#[command(
    name = "market-beacon",
    version,
    about = "Bitget spot market analysis"
)]
struct Cli {
    /// The trading symbol to analyze (e.g., BTCUSDT)
    #[arg(long, default_value = "BTCUSDT")]
    symbol: String,

    /// Number of recent trades to analyze
    #[arg(long, default_value_t = 100)]
    trade_limit: u32,

    /// Number of candles for technical analysis
    #[arg(long, default_value_t = 300)]
    candle_limit: u32,

    /// Candle granularity (e.g., 5min, 1h, 1day)
    #[arg(long, default_value = "1h")]
    granularity: Granularity,

    /// Analysis mode
    #[arg(long, value_enum, default_value_t = AnalysisMode::Full)]
    mode: AnalysisMode,

    /// Force order book analysis regardless of mode
    #[arg(long)]
    orderbook: bool,

    /// Order book aggregation level
    #[arg(long, default_value = "step0")]
    orderbook_level: OrderBookLevel,

    /// Number of order book levels to fetch
    #[arg(long, default_value_t = 50)]
    orderbook_limit: u32,

    /// Start of the trade time range (RFC 3339, e.g. 2024-01-01T00:00:00Z)
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// End of the trade time range (RFC 3339)
    #[arg(long)]
    end: Option<DateTime<Utc>>,

    /// Also write the JSON report to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_config() -> anyhow::Result<ExchangeConfig> {
    #[cfg(feature = "env-file")]
    let config = ExchangeConfig::from_env_auto("BITGET")?;
    #[cfg(not(feature = "env-file"))]
    let config = ExchangeConfig::from_env("BITGET")?;
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Market beacon starting");

    let config = load_config().context("failed to load Bitget credentials")?;
    let connector = BitgetBuilder::new().with_config(config).build()?;

    let server_time = connector.market.get_server_time().await?;
    info!(server_time = %server_time.server_time, "Connected to Bitget");

    let symbols = connector.market.get_supported_symbols().await?;
    // TODO: allow symbols listed after this snapshot was taken
    if !symbols.iter().any(|s| s == &cli.symbol) {
        anyhow::bail!("invalid symbol '{}': not in the supported spot list", cli.symbol);
    }
    info!(symbol = %cli.symbol, "Symbol validated");

    let trades = connector
        .market
        .get_trades(&cli.symbol, cli.start, cli.end, cli.trade_limit)
        .await?;
    let candles = connector
        .market
        .get_candles(&cli.symbol, cli.granularity, cli.candle_limit)
        .await?;

    let order_book = if cli.mode == AnalysisMode::Full || cli.orderbook {
        Some(
            connector
                .market
                .get_order_book(&cli.symbol, cli.orderbook_level, cli.orderbook_limit)
                .await?,
        )
    } else {
        None
    };

    let report = analytics::run_analysis(&cli.symbol, &trades, &candles, order_book.as_ref());

    let json = serde_json::to_string_pretty(&report)?;
    // JSON on stdout for piping; everything else goes through tracing
    println!("{}", json);

    if let Some(path) = &cli.output {
        std::fs::write(path, &json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    info!("Market beacon finished");
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
