//! The authenticated session a client holds.
//!
//! A session owns one cookie-bearing HTTP client and an authenticated flag.
//! The flag only goes from false to true through [`Session::mark_authenticated`];
//! [`Session::renew`] replaces the client, dropping every cookie, and clears it.

use tracing::debug;

use crate::context::FetchSettings;
use crate::error::HttpError;
use crate::host::http::HttpClient;
use crate::site::Endpoints;

/// Cookie-bearing session plus its authentication state.
#[derive(Debug)]
pub struct Session {
    settings: FetchSettings,
    endpoints: Endpoints,
    http: HttpClient,
    authenticated: bool,
}

impl Session {
    /// Creates an unauthenticated session with an empty cookie jar.
    pub fn new(settings: FetchSettings) -> Result<Self, HttpError> {
        let endpoints = Endpoints::new(&settings.base_url)?;
        let http = HttpClient::with_timeout(settings.timeout)?;
        Ok(Self {
            settings,
            endpoints,
            http,
            authenticated: false,
        })
    }

    /// Discards all cookies and the authenticated flag.
    pub fn renew(&mut self) -> Result<(), HttpError> {
        debug!("Starting a fresh session");
        self.http = HttpClient::with_timeout(self.settings.timeout)?;
        self.authenticated = false;
        Ok(())
    }

    /// Returns the HTTP client carrying this session's cookies.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the site endpoints.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns true once a login has succeeded on this session.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Records a successful login.
    pub fn mark_authenticated(&mut self) {
        self.authenticated = true;
    }
}
