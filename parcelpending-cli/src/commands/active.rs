//! Active command - parcels still waiting in a locker.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{connect, emit};
use crate::Cli;

/// Arguments for the active command.
#[derive(Args, Default)]
pub struct ActiveArgs {
    /// Days to look back (default from settings, 30).
    #[arg(long, short)]
    pub days: Option<u32>,
}

/// Runs the active command.
pub async fn run(args: &ActiveArgs, cli: &Cli) -> Result<()> {
    let (client, settings) = connect(cli).await?;
    let days = args.days.unwrap_or(settings.active_days);

    info!(days, "Fetching active parcels");
    let records = client.active(days).await?;
    emit(&records, cli).await
}
