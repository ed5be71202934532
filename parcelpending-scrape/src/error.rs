//! Client error type.

use parcelpending_fetch::HttpError;
use thiserror::Error;

/// Boxed error cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by [`ParcelPendingClient`](crate::ParcelPendingClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credentials were missing or rejected, the login form could not be
    /// found, or an operation needed a login first.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The site could not be reached or answered with an error status.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Anything else.
    #[error("Unexpected error during {operation}: {source}")]
    Unexpected {
        /// What the client was doing.
        operation: &'static str,
        /// The underlying cause.
        #[source]
        source: BoxError,
    },
}

impl ClientError {
    /// Classifies a transport error raised during `operation`.
    pub fn from_http(operation: &'static str, err: HttpError) -> Self {
        if err.is_transport() {
            Self::Connection(err.to_string())
        } else {
            Self::Unexpected {
                operation,
                source: Box::new(err),
            }
        }
    }

    /// Returns true for authentication failures.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns true for connection failures.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
