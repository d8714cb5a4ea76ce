//! riskstore CLI - Option Risk Inventory and Queries
//!
//! Operational entry point for the riskstore pricing and risk libraries.
//!
//! # Commands
//!
//! - `riskstore generate [--output <file>]` - Build the demo risk inventory and export it
//! - `riskstore query <TEXT>` - Answer a risk question against the inventory
//! - `riskstore price --strike <K> --tenor <T>` - Price one European option
//!
//! # Configuration
//!
//! Settings are read from `riskstore.toml` (or `--config`), then overridden by
//! `RISKSTORE_*` environment variables. `RUST_LOG` takes precedence over the
//! configured log level.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pricer_models::instruments::OptionDirection;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::price::MarketOverrides;
use commands::query::{OutputFormat, ResolverKind};
use config::RiskStoreConfig;
pub use error::{CliError, Result};

/// riskstore option risk CLI
#[derive(Parser)]
#[command(name = "riskstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "riskstore.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the demo book and its spot/vol risk inventory
    Generate {
        /// CSV output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for reproducible books
        #[arg(short, long)]
        seed: Option<u64>,

        /// Comma-separated tickers (default: configured universe)
        #[arg(short, long, value_delimiter = ',')]
        assets: Vec<String>,
    },

    /// Answer a risk question
    Query {
        /// Request text, e.g. "metric=VEGA sector=Financials"
        text: String,

        /// Request resolution strategy
        #[arg(short, long, value_enum, default_value_t = ResolverKind::Fixed)]
        resolver: ResolverKind,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Random seed for reproducible books
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Price a single European option
    Price {
        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Time to expiry in years
        #[arg(short, long)]
        tenor: f64,

        /// Spot override
        #[arg(long)]
        spot: Option<f64>,

        /// Rate override
        #[arg(long)]
        rate: Option<f64>,

        /// Volatility override
        #[arg(long)]
        vol: Option<f64>,

        /// Price a put instead of a call
        #[arg(long)]
        put: bool,
    },
}

fn init_tracing(config: &RiskStoreConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RiskStoreConfig::load_with_env_and_validate(&cli.config)?;
    init_tracing(&config, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Generate {
            output,
            seed,
            assets,
        } => {
            let assets = (!assets.is_empty()).then_some(assets.as_slice());
            commands::generate::run(&config, output.as_deref(), seed, assets)
        }
        Commands::Query {
            text,
            resolver,
            format,
            seed,
        } => commands::query::run(&config, &text, resolver, format, seed),
        Commands::Price {
            strike,
            tenor,
            spot,
            rate,
            vol,
            put,
        } => {
            let direction = if put {
                OptionDirection::Put
            } else {
                OptionDirection::Call
            };
            let overrides = MarketOverrides { spot, rate, vol };
            commands::price::run(&config, overrides, strike, tenor, direction)
        }
    }
}
