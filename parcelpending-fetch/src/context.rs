//! Settings and shared context for fetch and extraction.
//!
//! [`FetchSettings`] configures the session transport; [`ExtractContext`] is
//! passed to every extraction strategy and carries the label matcher and the
//! limits the strategies share.

use std::sync::Arc;
use std::time::Duration;

use crate::matcher::{LabelMatcher, SubstringMatcher};
use crate::site::DEFAULT_BASE_URL;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of ancestor levels walked from a label anchor.
const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 5;

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for the session transport.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Site root the endpoints are built under.
    pub base_url: String,
    /// Timeout for each request.
    pub timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetchSettings {
    /// Creates settings for a different site root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Creates settings with custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Extract Context
// ============================================================================

/// Context provided to extraction strategies.
#[derive(Debug, Clone)]
pub struct ExtractContext {
    /// Label matcher used for every labelled-fragment lookup.
    pub matcher: Arc<dyn LabelMatcher>,
    /// How many ancestors the anchor strategy may climb.
    pub max_ancestor_depth: usize,
}

impl ExtractContext {
    /// Creates a context with the substring matcher.
    pub fn new() -> Self {
        Self {
            matcher: Arc::new(SubstringMatcher),
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }

    /// Replaces the label matcher.
    pub fn with_matcher(mut self, matcher: Arc<dyn LabelMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Sets the ancestor walk limit.
    pub fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = depth;
        self
    }
}

impl Default for ExtractContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::BoundaryMatcher;

    #[test]
    fn test_default_settings() {
        let settings = FetchSettings::default();
        assert_eq!(settings.base_url, "https://my.parcelpending.com");
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_settings_builders() {
        let settings = FetchSettings::default()
            .with_base_url("http://localhost:9000")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_context() {
        let ctx = ExtractContext::new();
        assert_eq!(ctx.matcher.name(), "substring");
        assert_eq!(ctx.max_ancestor_depth, 5);
    }

    #[test]
    fn test_context_with_matcher() {
        let ctx = ExtractContext::new()
            .with_matcher(Arc::new(BoundaryMatcher))
            .with_max_ancestor_depth(2);
        assert_eq!(ctx.matcher.name(), "boundary");
        assert_eq!(ctx.max_ancestor_depth, 2);
    }
}
