// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `ParcelPending` CLI - parcel locker history from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Parcels still waiting in a locker
//! parcelpending active
//!
//! # Everything delivered in March, as JSON
//! parcelpending --format json --pretty history --from 2024-03-01 --to 2024-03-31
//!
//! # USPS deliveries of the last two weeks, also written to a CSV file
//! parcelpending --csv usps.csv courier USPS --days 14
//!
//! # Look up a pickup code
//! parcelpending code 12345678
//!
//! # Store the login email
//! parcelpending config set email me@example.com
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use parcelpending_scrape::ClientError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{active, code, config, courier, history};

// ============================================================================
// CLI Definition
// ============================================================================

/// `ParcelPending` CLI - parcel locker history.
#[derive(Parser)]
#[command(name = "parcelpending")]
#[command(about = "Parcel locker history from the ParcelPending portal")]
#[command(long_about = r#"
Logs in to the ParcelPending resident portal and lists your parcels.

Credentials are read from --email/--password, then from the environment
variables named in the settings (PARCELPENDING_EMAIL and
PARCELPENDING_PASSWORD by default). The email may also be stored with
`parcelpending config set email <EMAIL>`.

Examples:
  parcelpending active                       # Parcels not yet picked up
  parcelpending history --from 2024-03-01    # Everything since March 1st
  parcelpending courier amazon --days 7      # Amazon deliveries this week
  parcelpending code 12345678                # Find one parcel
  parcelpending --format json active         # JSON output
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Also export the records to this CSV file.
    #[arg(long, value_name = "PATH", global = true)]
    pub csv: Option<PathBuf>,

    /// Also export the records to this JSON file.
    #[arg(long, value_name = "PATH", global = true)]
    pub json: Option<PathBuf>,

    /// Login email (overrides the environment and settings).
    #[arg(long, short = 'e', global = true)]
    pub email: Option<String>,

    /// Login password (overrides the environment).
    #[arg(long, short = 'p', global = true)]
    pub password: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List parcels delivered within a date range.
    #[command(visible_alias = "h")]
    History(history::HistoryArgs),

    /// List parcels that have not been picked up.
    #[command(visible_alias = "a")]
    Active(active::ActiveArgs),

    /// List parcels delivered by a courier.
    Courier(courier::CourierArgs),

    /// Find a parcel by its package code.
    Code(code::CodeArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Login was refused or credentials are missing.
    AuthFailed = 2,
    /// The portal could not be reached.
    ConnectionFailed = 3,
    /// The requested parcel does not exist.
    NotFound = 4,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ClientError>() {
            Some(ClientError::Authentication(_)) => Self::AuthFailed,
            Some(ClientError::Connection(_)) => Self::ConnectionFailed,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("parcelpending=debug,info")
    } else {
        EnvFilter::new("parcelpending=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::History(args) => history::run(args, &cli).await,
        Commands::Active(args) => active::run(args, &cli).await,
        Commands::Courier(args) => courier::run(args, &cli).await,
        Commands::Code(args) => code::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    std::process::exit(ExitCode::Success as i32);
}
