//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use parcelpending_store::{Settings, SettingsStore, default_config_dir, default_settings_path};
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Change one setting.
    Set {
        /// Setting name (base_url, timeout_secs, active_days, courier_days,
        /// code_days, email_env, password_env, email).
        key: String,

        /// New value; `none` clears optional settings.
        value: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Set { key, value } => set_value(key, value, cli).await,
        ConfigAction::Reset => reset_config(cli).await,
    }
}

fn or_unset(value: Option<&str>) -> &str {
    value.unwrap_or("(not set)")
}

async fn show_config(cli: &Cli) -> Result<()> {
    let settings = SettingsStore::load_default().await.get().await;

    match cli.format {
        OutputFormat::Text => print!("{}", render_settings(&settings)),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn render_settings(settings: &Settings) -> String {
    let mut out = String::new();
    out.push_str("ParcelPending Configuration\n");
    out.push_str(&"─".repeat(40));
    out.push_str("\n\n");
    out.push_str(&format!(
        "Base URL:        {}\n",
        or_unset(settings.base_url.as_deref())
    ));
    out.push_str(&format!("Timeout:         {}s\n", settings.timeout_secs));
    out.push_str(&format!("Active days:     {}\n", settings.active_days));
    out.push_str(&format!("Courier days:    {}\n", settings.courier_days));
    out.push_str(&format!("Code days:       {}\n", settings.code_days));
    out.push_str(&format!("Email variable:  {}\n", settings.email_env));
    out.push_str(&format!("Password var:    {}\n", settings.password_env));
    out.push_str(&format!(
        "Email:           {}\n",
        or_unset(settings.email.as_deref())
    ));
    out
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = default_settings_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_value(key: &str, value: &str, cli: &Cli) -> Result<()> {
    let store = SettingsStore::load_default().await;
    store.update(|s| s.set(key, value)).await?;
    store.save().await?;

    info!(key, "Setting saved");
    if !cli.quiet {
        println!("Set {key} = {value}");
    }
    Ok(())
}

async fn reset_config(cli: &Cli) -> Result<()> {
    let store = SettingsStore::load_default().await;
    store.reset().await;
    store.save().await?;

    info!("Settings reset");
    if !cli.quiet {
        println!("Configuration reset to defaults");
    }
    Ok(())
}
