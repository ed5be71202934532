//! CLI command implementations.

pub mod active;
pub mod code;
pub mod config;
pub mod courier;
pub mod history;

use anyhow::{Context, Result};
use parcelpending_core::{Credentials, ParcelRecord};
use parcelpending_fetch::FetchSettings;
use parcelpending_scrape::ParcelPendingClient;
use parcelpending_store::{Settings, SettingsStore, export_csv, export_json};
use tracing::{debug, info};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Picks login credentials: flags first, then the environment variables
/// named in the settings, then the stored email.
pub fn resolve_credentials(
    cli: &Cli,
    settings: &Settings,
    env: impl Fn(&str) -> Option<String>,
) -> Option<Credentials> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    let email = non_empty(cli.email.clone())
        .or_else(|| non_empty(env(&settings.email_env)))
        .or_else(|| non_empty(settings.email.clone()))?;
    let password =
        non_empty(cli.password.clone()).or_else(|| non_empty(env(&settings.password_env)))?;

    Some(Credentials::new(email, password))
}

/// Transport settings derived from the stored settings.
pub fn fetch_settings(settings: &Settings) -> FetchSettings {
    let fetch = FetchSettings::default().with_timeout(settings.timeout());
    match &settings.base_url {
        Some(url) => fetch.with_base_url(url.clone()),
        None => fetch,
    }
}

/// Loads settings, builds a client and logs in.
pub async fn connect(cli: &Cli) -> Result<(ParcelPendingClient, Settings)> {
    let settings = SettingsStore::load_default().await.get().await;
    let credentials = resolve_credentials(cli, &settings, |name| std::env::var(name).ok());
    debug!(has_credentials = credentials.is_some(), "Resolved credentials");

    let mut client = ParcelPendingClient::new(fetch_settings(&settings), credentials)?;
    client.login(None, None).await?;
    info!("Logged in");

    Ok((client, settings))
}

/// Prints records in the selected format and writes any requested exports.
pub async fn emit(records: &[ParcelRecord], cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_records(records));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&records).context("Failed to render JSON")?);
        }
    }

    if let Some(path) = &cli.csv {
        if let Some(written) = export_csv(records, path).await {
            report(cli, &format!("Exported CSV to {}", written.display()));
        }
    }
    if let Some(path) = &cli.json {
        if let Some(written) = export_json(records, path).await {
            report(cli, &format!("Exported JSON to {}", written.display()));
        }
    }
    Ok(())
}

/// Prints a status line on stderr unless quiet.
pub fn report(cli: &Cli, message: &str) {
    if !cli.quiet {
        eprintln!("{message}");
    }
}
