use analytics::{AnalyticsEngine, DashboardSettings};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, DataOverrides, LoggingSettings, load_config};
use core_types::{DateRange, Page};
use dataset::Dataset;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod render;

use render::{OutputFormat, PageContext, render};

/// The main entry point for the Orderscope dashboard.
#[tokio::main]
async fn main() -> Result<()> {
    // ORDERSCOPE__* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    config.apply(&cli.overrides);

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_tracing(&config.logging)?;

    // The dataset is loaded exactly once and shared read-only from here on.
    let dataset = Dataset::load(&config.data.path).with_context(|| {
        format!(
            "Failed to load the order dataset from '{}'",
            config.data.path.display()
        )
    })?;

    let engine = AnalyticsEngine::new(DashboardSettings {
        top_products: config.dashboard.top_products,
        top_categories: config.dashboard.top_categories,
    })?;

    // Execute the appropriate command
    match cli.command {
        Commands::Dashboard(args) => handle_page(
            Page::Dashboard,
            &args.range,
            args.format,
            None,
            &dataset,
            &engine,
            &config,
        ),
        Commands::Raw(args) => handle_page(
            Page::RawData,
            &args.range,
            args.format,
            args.limit,
            &dataset,
            &engine,
            &config,
        ),
        Commands::Bounds => handle_bounds(&dataset),
        Commands::Serve(args) => handle_serve(args, dataset, engine, &config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Explore an e-commerce order export: totals, best sellers and purchase patterns
/// for any date range.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to `config.toml` in the working directory, if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: DataOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show summary metrics, top products and categories, and purchase patterns.
    Dashboard(DashboardArgs),
    /// Show the raw order rows behind the dashboard.
    Raw(RawArgs),
    /// Print the first and last purchase dates in the dataset.
    Bounds,
    /// Serve the dashboard as a JSON API.
    Serve(ServeArgs),
}

#[derive(Args)]
struct RangeArgs {
    /// First purchase date to include (format: YYYY-MM-DD). Defaults to the earliest in the data.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last purchase date to include (format: YYYY-MM-DD). Defaults to the latest in the data.
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Args)]
struct DashboardArgs {
    #[command(flatten)]
    range: RangeArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args)]
struct RawArgs {
    #[command(flatten)]
    range: RangeArgs,

    /// Maximum number of rows to print. Defaults to `[dashboard] raw_row_limit`.
    #[arg(long)]
    limit: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args)]
struct ServeArgs {
    /// Address to bind. Defaults to `[server] host`.
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to bind. Defaults to `[server] port`.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Console logging on stderr, plus a daily-rotated file when a log directory is configured.
fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .context("Invalid log level")?;

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Resolves the selected range, filters the dataset and prints the requested page.
fn handle_page(
    page: Page,
    args: &RangeArgs,
    format: OutputFormat,
    limit: Option<usize>,
    dataset: &Dataset,
    engine: &AnalyticsEngine,
    config: &Config,
) -> Result<()> {
    let range = DateRange::select(args.from, args.to, dataset.bounds().as_ref())?
        .context("The order dataset is empty; pass both --from and --to")?;
    let view = dataset.filter(range);
    tracing::info!(
        %page,
        start = %range.start,
        end = %range.end,
        rows = view.len(),
        "Rendering page."
    );

    let ctx = PageContext {
        range,
        view: &view,
        engine,
        currency_symbol: &config.dashboard.currency_symbol,
        raw_row_limit: limit.unwrap_or(config.dashboard.raw_row_limit),
    };
    println!("{}", render(page, &ctx, format)?);
    Ok(())
}

fn handle_bounds(dataset: &Dataset) -> Result<()> {
    match dataset.bounds() {
        Some(bounds) => println!(
            "{} to {} ({} days, {} rows)",
            bounds.start,
            bounds.end,
            bounds.num_days(),
            dataset.len()
        ),
        None => println!("The order dataset is empty."),
    }
    Ok(())
}

async fn handle_serve(
    args: ServeArgs,
    dataset: Dataset,
    engine: AnalyticsEngine,
    config: &Config,
) -> Result<()> {
    let addr = SocketAddr::new(
        args.host.unwrap_or(config.server.host),
        args.port.unwrap_or(config.server.port),
    );
    let state = web_server::AppState::new(Arc::new(dataset), engine);
    web_server::run_server(addr, state).await
}
