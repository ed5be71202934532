//! Login form discovery and submission.
//!
//! The login page is fetched, its form located and replayed with every
//! hidden field intact, then the response is checked for the failure
//! marker.

use parcelpending_core::Credentials;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::html::{select_document, select_within};

/// Inputs the client always supplies itself.
const EXCLUDED_FIELDS: [&str; 4] = ["username", "password", "signin", "signin_mobile"];

/// Value sent for the submit button.
const SIGNIN_VALUE: &str = "signin";

/// Lowercase text the site shows after rejected credentials.
const FAILURE_MARKER: &str = "invalid username or password";

/// A login form lifted out of the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// The form's `action` attribute, if present.
    pub action: Option<String>,
    /// Named inputs other than the credential fields, in document order.
    pub fields: Vec<(String, String)>,
}

impl LoginForm {
    /// Finds the login form in a page.
    ///
    /// Tried in order: `form#login`, `form[name=login]`, then the first form
    /// holding both a `username` and a `password` input.
    pub fn locate(html: &str) -> Option<Self> {
        let document = Html::parse_document(html);

        let form = select_document(&document, "form#login")
            .into_iter()
            .next()
            .or_else(|| select_document(&document, r#"form[name="login"]"#).into_iter().next())
            .or_else(|| {
                select_document(&document, "form").into_iter().find(|form| {
                    !select_within(*form, r#"input[name="username"]"#).is_empty()
                        && !select_within(*form, r#"input[name="password"]"#).is_empty()
                })
            })?;

        Some(Self::from_element(form))
    }

    fn from_element(form: ElementRef<'_>) -> Self {
        let mut fields: Vec<(String, String)> = Vec::new();

        for input in select_within(form, "input") {
            let Some(name) = input.value().attr("name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if EXCLUDED_FIELDS.contains(&name) {
                continue;
            }
            let value = input.value().attr("value").unwrap_or_default().to_string();
            debug!(field = name, "Found form field");

            // Later inputs with the same name win, keeping the first position
            match fields.iter_mut().find(|(n, _)| n == name) {
                Some(existing) => existing.1 = value,
                None => fields.push((name.to_string(), value)),
            }
        }

        Self {
            action: form.value().attr("action").map(str::to_string),
            fields,
        }
    }

    /// Builds the form body: collected fields, then the credentials and the
    /// submit button value.
    pub fn submission(&self, credentials: &Credentials) -> Vec<(String, String)> {
        let mut body = self.fields.clone();
        body.push(("username".to_string(), credentials.email.clone()));
        body.push(("password".to_string(), credentials.password.clone()));
        body.push(("signin".to_string(), SIGNIN_VALUE.to_string()));
        body
    }
}

/// Returns true if the response to a login attempt reports bad credentials.
pub fn is_failure_body(body: &str) -> bool {
    body.to_lowercase().contains(FAILURE_MARKER)
}
