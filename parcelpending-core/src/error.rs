//! Core error types for `ParcelPending`.

use thiserror::Error;

/// Core error type for model construction and parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A date string could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A date range whose start is after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvertedRange {
        /// Start bound as given.
        start: String,
        /// End bound as given.
        end: String,
    },
}
