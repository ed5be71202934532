//! Store error types.

use thiserror::Error;

/// Errors that can occur while persisting settings.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Settings key that does not exist.
    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    /// Value that does not fit the setting.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting being changed.
        key: String,
        /// What was wrong with the value.
        reason: String,
    },
}

impl StoreError {
    /// Returns true if the error came from the file system.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }
}
