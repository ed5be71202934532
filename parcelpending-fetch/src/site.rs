//! Target site endpoints.

use url::Url;

use crate::error::HttpError;

/// Default site root.
pub const DEFAULT_BASE_URL: &str = "https://my.parcelpending.com";

/// Login page path.
const LOGIN_PATH: &str = "login";

/// Parcel history page path.
const HISTORY_PATH: &str = "parcel-history";

/// URLs of the pages the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    root: Url,
    login: Url,
    history: Url,
}

impl Endpoints {
    /// Builds endpoints under the given site root.
    ///
    /// Any path on `base_url` is discarded; pages live at the site root.
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        let mut root = Url::parse(base_url)?;
        if root.cannot_be_a_base() {
            return Err(HttpError::InvalidUrl(format!("{base_url} cannot be a base URL")));
        }
        root.set_path("/");
        root.set_query(None);
        root.set_fragment(None);

        let login = root.join(LOGIN_PATH)?;
        let history = root.join(HISTORY_PATH)?;
        Ok(Self {
            root,
            login,
            history,
        })
    }

    /// Login page URL.
    pub fn login_url(&self) -> &Url {
        &self.login
    }

    /// Parcel history page URL.
    pub fn history_url(&self) -> &Url {
        &self.history
    }

    /// Resolves a login form's `action` attribute to a submission URL.
    ///
    /// - missing or empty: the login page itself
    /// - starting with `http` and parseable as a URL: used verbatim
    /// - starting with `/`: relative to the site root
    /// - anything else: appended to the site root
    pub fn resolve_action(&self, action: Option<&str>) -> Result<Url, HttpError> {
        let action = action.map(str::trim).unwrap_or_default();
        if action.is_empty() {
            return Ok(self.login.clone());
        }
        if action.starts_with("http") {
            if let Ok(url) = Url::parse(action) {
                return Ok(url);
            }
        }
        Ok(self.root.join(action.trim_start_matches('/'))?)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).unwrap_or_else(|e| {
            panic!("Built-in base URL {DEFAULT_BASE_URL} is invalid: {e}")
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.login_url().as_str(),
            "https://my.parcelpending.com/login"
        );
        assert_eq!(
            endpoints.history_url().as_str(),
            "https://my.parcelpending.com/parcel-history"
        );
    }

    #[test]
    fn test_base_path_is_discarded() {
        let endpoints = Endpoints::new("http://127.0.0.1:8080/some/page?x=1").unwrap();
        assert_eq!(endpoints.login_url().as_str(), "http://127.0.0.1:8080/login");
    }

    #[test]
    fn test_resolve_action_variants() {
        let endpoints = Endpoints::default();

        assert_eq!(
            endpoints.resolve_action(None).unwrap().as_str(),
            "https://my.parcelpending.com/login"
        );
        assert_eq!(
            endpoints.resolve_action(Some("  ")).unwrap().as_str(),
            "https://my.parcelpending.com/login"
        );
        assert_eq!(
            endpoints
                .resolve_action(Some("https://auth.example.com/signin"))
                .unwrap()
                .as_str(),
            "https://auth.example.com/signin"
        );
        assert_eq!(
            endpoints.resolve_action(Some("/login/submit")).unwrap().as_str(),
            "https://my.parcelpending.com/login/submit"
        );
        assert_eq!(
            endpoints.resolve_action(Some("do-login")).unwrap().as_str(),
            "https://my.parcelpending.com/do-login"
        );
    }

    #[test]
    fn test_resolve_action_http_prefixed_path() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.resolve_action(Some("httpLogin.aspx")).unwrap().as_str(),
            "https://my.parcelpending.com/httpLogin.aspx"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            Endpoints::new("not a url"),
            Err(HttpError::InvalidUrl(_))
        ));
    }
}
