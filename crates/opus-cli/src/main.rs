//! OPUS CLI - option pricing and uncertainty sensitivities
//!
//! # Commands
//!
//! - `opus price` - price a call or put with the chosen method
//! - `opus greeks` - price plus delta, gamma, theta, vega and rho
//!
//! Rates and volatilities are entered in percent. Set `RUST_LOG=debug` (or
//! pass `--verbose`) to see the engines' diagnostics on stderr.

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;

pub use error::{CliError, Result};

use commands::PricingArgs;

/// Option pricing with Black-Scholes, binomial trees and Monte Carlo
#[derive(Parser)]
#[command(name = "opus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging when RUST_LOG is not set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option
    Price(PricingArgs),

    /// Price an option and estimate its Greeks
    Greeks(PricingArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Price(args) => {
            debug!(?args, "price command");
            commands::price::run(&args, &mut out)
        }
        Commands::Greeks(args) => {
            debug!(?args, "greeks command");
            commands::greeks::run(&args, &mut out)
        }
    }
}
