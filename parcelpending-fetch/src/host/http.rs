//! HTTP client with tracing and a cookie jar.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - A cookie store that lives as long as the client
//! - Status checking that turns 4xx/5xx responses into errors

use reqwest::{Client, Response, header};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string sent with every request.
const USER_AGENT: &str = concat!("parcelpending/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and cookie persistence.
///
/// Cookies set by any response are sent on every later request made
/// through the same client. Dropping the client drops the cookies.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with the default timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self { inner: client })
    }

    /// Performs a GET request and returns the response body.
    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn get_text(&self, url: &Url, query: &[(&str, String)]) -> Result<String, HttpError> {
        debug!(params = query.len(), "GET request");

        let response = self.inner.get(url.clone()).query(query).send().await?;
        Self::read_body(response).await
    }

    /// Submits a URL-encoded form and returns the response body.
    ///
    /// `referer` is sent as the `Referer` header.
    #[instrument(skip(self, form, referer), fields(url = %url))]
    pub async fn post_form_text(
        &self,
        url: &Url,
        form: &[(String, String)],
        referer: &Url,
    ) -> Result<String, HttpError> {
        debug!(fields = form.len(), "POST form");

        let response = self
            .inner
            .post(url.clone())
            .header(header::REFERER, referer.as_str())
            .form(form)
            .send()
            .await?;
        Self::read_body(response).await
    }

    /// Checks the status and reads the body as text.
    async fn read_body(response: Response) -> Result<String, HttpError> {
        let status = response.status();
        debug!(status = %status, "Response received");

        if status.is_client_error() || status.is_server_error() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        assert!(HttpClient::new().is_ok());
        assert!(HttpClient::with_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("parcelpending/"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = HttpClient::with_timeout(Duration::from_secs(2)).unwrap();
        let url = Url::parse("http://127.0.0.1:9/login").unwrap();

        let err = client.get_text(&url, &[]).await.unwrap_err();
        assert!(err.is_transport());
    }
}
