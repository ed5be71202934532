//! Courier command - parcels delivered by one carrier.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{connect, emit};
use crate::Cli;

/// Arguments for the courier command.
#[derive(Args)]
pub struct CourierArgs {
    /// Courier name, matched as a case-insensitive substring (e.g. "usps").
    pub name: String,

    /// Days to look back (default from settings, 30).
    #[arg(long, short)]
    pub days: Option<u32>,
}

/// Runs the courier command.
pub async fn run(args: &CourierArgs, cli: &Cli) -> Result<()> {
    let (client, settings) = connect(cli).await?;
    let days = args.days.unwrap_or(settings.courier_days);

    info!(courier = %args.name, days, "Fetching parcels by courier");
    let records = client.by_courier(&args.name, days).await?;
    emit(&records, cli).await
}
