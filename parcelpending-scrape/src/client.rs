//! The `ParcelPending` client.
//!
//! [`ParcelPendingClient`] ties the session, the login negotiator and the
//! extraction pipeline together. Every query needs a successful
//! [`login`](ParcelPendingClient::login) on the same client first.

use chrono::Local;
use parcelpending_core::{Credentials, DateRange, ParcelRecord};
use parcelpending_fetch::{ExtractContext, ExtractPipeline, FetchSettings, Session};
use tracing::{debug, error, info, instrument, warn};

use crate::error::ClientError;
use crate::filters;
use crate::login::{LoginForm, is_failure_body};
use crate::strategies::default_pipeline;

/// Default look-back for [`ParcelPendingClient::active`].
pub const DEFAULT_ACTIVE_DAYS: u32 = 30;

/// Default look-back for [`ParcelPendingClient::by_courier`].
pub const DEFAULT_COURIER_DAYS: u32 = 30;

/// Default look-back for [`ParcelPendingClient::by_code`].
pub const DEFAULT_CODE_DAYS: u32 = 90;

/// Filter parameters the history page expects, all left empty.
const EMPTY_HISTORY_PARAMS: [&str; 11] = [
    "occupant_first_name",
    "occupant_last_name",
    "occupant_email",
    "parcel_pickup_date_start",
    "parcel_pickup_date_end",
    "parcel_id",
    "tracking_number",
    "package_code",
    "order_number",
    "package_status",
    "pick_up_origin",
];

/// Session-based client for a single `ParcelPending` account.
pub struct ParcelPendingClient {
    session: Session,
    credentials: Option<Credentials>,
    pipeline: ExtractPipeline,
    extract_ctx: ExtractContext,
}

impl ParcelPendingClient {
    /// Creates an unauthenticated client.
    ///
    /// `credentials` are used by [`login`](Self::login) when it is called
    /// without explicit ones.
    pub fn new(settings: FetchSettings, credentials: Option<Credentials>) -> Result<Self, ClientError> {
        let session = Session::new(settings).map_err(|e| ClientError::Unexpected {
            operation: "client setup",
            source: Box::new(e),
        })?;

        Ok(Self {
            session,
            credentials,
            pipeline: default_pipeline(),
            extract_ctx: ExtractContext::new(),
        })
    }

    /// Replaces the extraction pipeline.
    pub fn with_pipeline(mut self, pipeline: ExtractPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Replaces the extraction context (label matcher, walk depth).
    pub fn with_extract_context(mut self, ctx: ExtractContext) -> Self {
        self.extract_ctx = ctx;
        self
    }

    /// Returns true once a login has succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Picks per-call credentials over the ones given at construction.
    fn resolve_credentials(&self, email: Option<&str>, password: Option<&str>) -> Option<Credentials> {
        let stored = self.credentials.as_ref();
        let email = email
            .filter(|e| !e.is_empty())
            .or_else(|| stored.map(|c| c.email.as_str()))?;
        let password = password
            .filter(|p| !p.is_empty())
            .or_else(|| stored.map(|c| c.password.as_str()))?;

        let credentials = Credentials::new(email, password);
        credentials.is_complete().then_some(credentials)
    }

    /// Logs in, replacing any previous session.
    ///
    /// Credentials are checked first; when they are missing the call fails
    /// without touching the current session. Otherwise the session is reset
    /// before anything is sent, so any later failure leaves the client
    /// unauthenticated.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Authentication`] for missing or rejected credentials
    ///   and for a login page without a recognizable form
    /// - [`ClientError::Connection`] when either request fails
    #[instrument(skip_all)]
    pub async fn login(&mut self, email: Option<&str>, password: Option<&str>) -> Result<(), ClientError> {
        let Some(credentials) = self.resolve_credentials(email, password) else {
            return Err(ClientError::Authentication(
                "Email and password are required".to_string(),
            ));
        };

        self.session
            .renew()
            .map_err(|e| ClientError::from_http("login", e))?;

        info!("Fetching login page");
        let login_url = self.session.endpoints().login_url().clone();
        let page = self
            .session
            .http()
            .get_text(&login_url, &[])
            .await
            .map_err(|e| {
                error!(error = %e, "Could not load login page");
                ClientError::from_http("login", e)
            })?;

        let Some(form) = LoginForm::locate(&page) else {
            error!("Could not find login form; the page layout may have changed");
            return Err(ClientError::Authentication(
                "Could not find login form".to_string(),
            ));
        };

        let action = self
            .session
            .endpoints()
            .resolve_action(form.action.as_deref())
            .map_err(|e| ClientError::from_http("login", e))?;
        debug!(fields = form.fields.len(), "Prepared login form");

        info!(url = %action, "Submitting login form");
        let body = self
            .session
            .http()
            .post_form_text(&action, &form.submission(&credentials), &login_url)
            .await
            .map_err(|e| {
                error!(error = %e, "Login submission failed");
                ClientError::from_http("login", e)
            })?;

        if is_failure_body(&body) {
            error!("Login rejected by the server");
            return Err(ClientError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        self.session.mark_authenticated();
        info!("Login successful");
        Ok(())
    }

    fn require_login(&self) -> Result<(), ClientError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::Authentication(
                "You must login before retrieving parcel history".to_string(),
            ))
        }
    }

    /// Builds the query string for a history request.
    pub fn history_params(range: &DateRange) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = EMPTY_HISTORY_PARAMS[..3]
            .iter()
            .map(|k| (*k, String::new()))
            .collect();
        params.push(("parcel_delivery_date_start", range.start_param()));
        params.push(("parcel_delivery_date_end", range.end_param()));
        params.extend(EMPTY_HISTORY_PARAMS[3..].iter().map(|k| (*k, String::new())));
        params.push(("sort_by", "deliveryDate".to_string()));
        params.push(("sort_order", "DESC".to_string()));
        params
    }

    /// Parses a history page into records.
    pub fn extract(&self, html: &str) -> Vec<ParcelRecord> {
        let outcome = self.pipeline.extract_html(html, &self.extract_ctx);
        match outcome.matched_strategy() {
            Some(strategy) => debug!(strategy, attempts = outcome.attempts_count(), "Extracted records"),
            None => debug!(attempts = outcome.attempts_count(), "No records found in page"),
        }
        outcome.into_records()
    }

    /// Returns every parcel delivered within `range`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Authentication`] without a prior login (no request is
    /// made), [`ClientError::Connection`] if the request fails.
    #[instrument(skip_all, fields(range = %range))]
    pub async fn history(&self, range: &DateRange) -> Result<Vec<ParcelRecord>, ClientError> {
        self.require_login()?;

        info!("Requesting parcel history");
        let params = Self::history_params(range);
        let body = self
            .session
            .http()
            .get_text(self.session.endpoints().history_url(), &params)
            .await
            .map_err(|e| {
                error!(error = %e, "Could not retrieve parcel history");
                ClientError::from_http("history", e)
            })?;

        let records = self.extract(&body);
        if records.is_empty() {
            warn!("History page contained no parcels");
        } else {
            info!(count = records.len(), "Found parcels");
        }
        Ok(records)
    }

    fn recent(days: u32) -> DateRange {
        DateRange::last_days(days, Local::now().date_naive())
    }

    /// Returns parcels from the last `days` days that are not picked up.
    ///
    /// # Errors
    ///
    /// Same as [`history`](Self::history).
    pub async fn active(&self, days: u32) -> Result<Vec<ParcelRecord>, ClientError> {
        let records = self.history(&Self::recent(days)).await?;
        Ok(filters::active(records))
    }

    /// Returns parcels from the last `days` days whose courier contains
    /// `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Same as [`history`](Self::history).
    pub async fn by_courier(&self, name: &str, days: u32) -> Result<Vec<ParcelRecord>, ClientError> {
        let records = self.history(&Self::recent(days)).await?;
        Ok(filters::by_courier(records, name))
    }

    /// Looks up a parcel by its exact package code within the last `days`
    /// days.
    ///
    /// # Errors
    ///
    /// Same as [`history`](Self::history).
    pub async fn by_code(&self, code: &str, days: u32) -> Result<Option<ParcelRecord>, ClientError> {
        let records = self.history(&Self::recent(days)).await?;
        Ok(filters::by_code(records, code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(credentials: Option<Credentials>) -> ParcelPendingClient {
        ParcelPendingClient::new(FetchSettings::default(), credentials).unwrap()
    }

    #[test]
    fn test_history_params_order() {
        let range = DateRange::new("03/01/2024", "03/31/2024");
        let params = ParcelPendingClient::history_params(&range);
        let keys: Vec<_> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "occupant_first_name",
                "occupant_last_name",
                "occupant_email",
                "parcel_delivery_date_start",
                "parcel_delivery_date_end",
                "parcel_pickup_date_start",
                "parcel_pickup_date_end",
                "parcel_id",
                "tracking_number",
                "package_code",
                "order_number",
                "package_status",
                "pick_up_origin",
                "sort_by",
                "sort_order",
            ]
        );
        assert_eq!(params[3].1, "03/01/2024");
        assert_eq!(params[4].1, "03/31/2024");
        assert_eq!(params[13].1, "deliveryDate");
        assert_eq!(params[14].1, "DESC");
    }

    #[test]
    fn test_resolve_credentials_prefers_call_arguments() {
        let c = client(Some(Credentials::new("stored@example.com", "stored")));
        let resolved = c.resolve_credentials(Some("call@example.com"), None).unwrap();
        assert_eq!(resolved.email, "call@example.com");
        assert_eq!(resolved.password, "stored");
    }

    #[test]
    fn test_resolve_credentials_empty_falls_back() {
        let c = client(Some(Credentials::new("stored@example.com", "stored")));
        let resolved = c.resolve_credentials(Some(""), Some("")).unwrap();
        assert_eq!(resolved.email, "stored@example.com");
    }

    #[test]
    fn test_resolve_credentials_missing() {
        assert!(client(None).resolve_credentials(Some("a@b.c"), None).is_none());
        assert!(client(None).resolve_credentials(None, None).is_none());
    }

    #[tokio::test]
    async fn test_login_without_credentials() {
        let mut c = client(None);
        let err = c.login(None, None).await.unwrap_err();
        assert!(matches!(err, ClientError::Authentication(ref m) if m == "Email and password are required"));
        assert!(!c.is_authenticated());
    }

    #[tokio::test]
    async fn test_history_requires_login() {
        let c = client(None);
        let range = DateRange::new("01/01/2024", "01/31/2024");
        let err = c.history(&range).await.unwrap_err();
        assert!(err.is_authentication());
        assert!(err.to_string().contains("You must login"));
    }
}
