//! Fetch error types.

use thiserror::Error;

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
///
/// Transport failures and unsuccessful statuses are kept apart so callers can
/// tell a dead connection from a server that answered with an error page.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request could not be sent or its body could not be read.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Status code returned.
        status: u16,
        /// URL that was requested.
        url: String,
    },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl HttpError {
    /// Returns true if the error came from the network or the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { .. })
    }
}

impl From<url::ParseError> for HttpError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_is_transport() {
        let err = HttpError::Status {
            status: 500,
            url: "https://my.parcelpending.com/login".to_string(),
        };
        assert!(err.is_transport());
        assert_eq!(
            err.to_string(),
            "HTTP 500 from https://my.parcelpending.com/login"
        );
    }

    #[test]
    fn test_invalid_url_is_not_transport() {
        let err: HttpError = url::Url::parse("not a url").unwrap_err().into();
        assert!(!err.is_transport());
    }
}
