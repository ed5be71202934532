//! User settings and their on-disk store.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

// ============================================================================
// Settings
// ============================================================================

/// Persistent CLI settings.
///
/// Passwords are never stored here; only the name of the environment
/// variable holding one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site root override. `None` uses the public site.
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Look-back for `active`.
    pub active_days: u32,

    /// Look-back for `courier`.
    pub courier_days: u32,

    /// Look-back for `code`.
    pub code_days: u32,

    /// Environment variable holding the login email.
    pub email_env: String,

    /// Environment variable holding the password.
    pub password_env: String,

    /// Login email used when neither a flag nor the variable supplies one.
    pub email: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
            active_days: 30,
            courier_days: 30,
            code_days: 90,
            email_env: "PARCELPENDING_EMAIL".to_string(),
            password_env: "PARCELPENDING_PASSWORD".to_string(),
            email: None,
        }
    }
}

impl Settings {
    /// Keys accepted by [`Settings::set`].
    pub const KEYS: [&'static str; 8] = [
        "base_url",
        "timeout_secs",
        "active_days",
        "courier_days",
        "code_days",
        "email_env",
        "password_env",
        "email",
    ];

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Sets a field from its textual form.
    ///
    /// Optional fields are cleared by an empty value or `none`.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownKey`] for keys outside [`Settings::KEYS`],
    /// [`StoreError::InvalidValue`] for values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let value = value.trim();
        match key {
            "base_url" => self.base_url = optional(value),
            "timeout_secs" => self.timeout_secs = positive(key, value)?,
            "active_days" => self.active_days = positive(key, value)?,
            "courier_days" => self.courier_days = positive(key, value)?,
            "code_days" => self.code_days = positive(key, value)?,
            "email_env" => self.email_env = required(key, value)?,
            "password_env" => self.password_env = required(key, value)?,
            "email" => self.email = optional(value),
            _ => return Err(StoreError::UnknownKey(key.to_string())),
        }
        debug!(key, "Setting changed");
        Ok(())
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

fn required(key: &str, value: &str) -> Result<String, StoreError> {
    if value.is_empty() {
        return Err(StoreError::InvalidValue {
            key: key.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value.to_string())
}

fn positive<T>(key: &str, value: &str) -> Result<T, StoreError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    match value.parse::<T>() {
        Ok(n) if n != T::default() => Ok(n),
        _ => Err(StoreError::InvalidValue {
            key: key.to_string(),
            reason: format!("expected a positive number, got {value:?}"),
        }),
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Settings bound to the file they are persisted in.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store holding defaults.
    pub fn new(path: PathBuf) -> Self {
        Self {
            settings: Arc::new(RwLock::new(Settings::default())),
            path,
        }
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path; a missing or corrupt file yields defaults.
    pub async fn load(path: PathBuf) -> Self {
        debug!(path = %path.display(), "Loading settings");
        let settings: Settings = load_json_or_default(&path).await;
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
        }
    }

    /// File the settings are saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Applies a change in memory.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns; the settings may be partially changed.
    pub async fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Settings) -> Result<(), StoreError>,
    {
        let mut settings = self.settings.write().await;
        f(&mut settings)
    }

    /// Restores defaults in memory.
    pub async fn reset(&self) {
        *self.settings.write().await = Settings::default();
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
