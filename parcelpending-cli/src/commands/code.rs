//! Code command - look up one parcel by package code.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{connect, emit, report};
use crate::{Cli, ExitCode};

/// Arguments for the code command.
#[derive(Args)]
pub struct CodeArgs {
    /// Exact package code.
    pub code: String,

    /// Days to look back (default from settings, 90).
    #[arg(long, short)]
    pub days: Option<u32>,
}

/// Runs the code command. Exits with `NotFound` when no parcel matches.
pub async fn run(args: &CodeArgs, cli: &Cli) -> Result<()> {
    let (client, settings) = connect(cli).await?;
    let days = args.days.unwrap_or(settings.code_days);

    info!(code = %args.code, days, "Looking up parcel");
    let Some(record) = client.by_code(&args.code, days).await? else {
        report(cli, &format!("No parcel with code {} in the last {days} days", args.code));
        std::process::exit(ExitCode::NotFound as i32);
    };

    emit(std::slice::from_ref(&record), cli).await
}
