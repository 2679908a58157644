//! updown_pnl - Main Entry Point
//!
//! Streams recent Up/Down trades from the trade store and prints
//! complete-set P&L per market on every refresh.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use updown_pnl::config::{load_config, LogFormat};
use updown_pnl::presenter::{JsonPresenter, TableOptions, TablePresenter};
use updown_pnl::{PgTradeStore, PnlMonitor, Presenter};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Refresh interval in seconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Filter by market slug (partial match)
    #[arg(short, long)]
    slug: Option<String>,

    /// Look back N minutes for P&L
    #[arg(short, long)]
    minutes: Option<u64>,

    /// Trade store connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Emit JSON lines instead of tables
    #[arg(long)]
    json: bool,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Run a single refresh pass and exit
    #[arg(long)]
    once: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    // Logs go to stderr; stdout is the presentation channel
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!(e))
}

async fn run<P: Presenter>(mut monitor: PnlMonitor<PgTradeStore, P>, once: bool) -> Result<()> {
    if once {
        monitor.tick().await?;
        return Ok(());
    }

    monitor
        .run(async {
            // If the signal handler cannot be installed, run until killed
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let mut config = load_config(Some(args.config.as_str())).context("loading configuration")?;
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    if let Some(interval) = args.interval {
        config.monitor.refresh_interval_secs = interval;
    }
    if let Some(minutes) = args.minutes {
        config.monitor.pnl_lookback_minutes = minutes;
    }
    if args.slug.is_some() {
        config.monitor.market_filter = args.slug.filter(|s| !s.is_empty());
    }
    if let Some(level) = args.log_level {
        config.settings.log_level = level;
    }
    config.validate().context("validating configuration")?;

    init_tracing(&config.settings.log_level, config.settings.log_format)?;

    info!("Starting updown_pnl");
    info!("Configuration file: {}", args.config);

    let store = PgTradeStore::connect(&config.database)
        .await
        .context("connecting to trade store")?;

    let settings = config.monitor.clone();
    if args.json {
        let monitor = PnlMonitor::new(store, JsonPresenter::new(io::stdout()), settings);
        run(monitor, args.once).await?;
    } else {
        let interactive = io::stdout().is_terminal();
        let options = TableOptions {
            clear_screen: interactive && !args.once,
            color: interactive && !args.no_color,
            max_trades: config.monitor.recent_trades_display,
            imbalance_alert_threshold: config.monitor.imbalance_alert_threshold,
        };
        let monitor = PnlMonitor::new(store, TablePresenter::new(io::stdout(), options), settings);
        run(monitor, args.once).await?;
    }

    info!("Stopped");
    Ok(())
}
