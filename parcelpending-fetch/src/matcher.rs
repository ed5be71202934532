//! Label matching for labelled text fragments.
//!
//! Pages render fields as text like `Package Code: 12345678`. A
//! [`LabelMatcher`] decides whether a text fragment carries a label and
//! strips it to recover the value. The cascade only talks to the trait, so a
//! stricter matcher can replace the default without touching any strategy.

use std::fmt;

/// Decides whether text carries a label and extracts the value after it.
pub trait LabelMatcher: Send + Sync + fmt::Debug {
    /// Short identifier for logging.
    fn name(&self) -> &'static str;

    /// Returns true if `text` carries `label`.
    fn matches(&self, text: &str, label: &str) -> bool;

    /// Removes `label` from `text` and trims the remainder.
    fn strip(&self, text: &str, label: &str) -> String;

    /// Returns the value following `label`, if `text` carries it.
    ///
    /// The value may be empty when the label stands alone in the text.
    fn value(&self, text: &str, label: &str) -> Option<String> {
        if self.matches(text, label) {
            Some(self.strip(text, label))
        } else {
            None
        }
    }

    /// Returns true if `text` is nothing but `label`.
    fn is_bare_label(&self, text: &str, label: &str) -> bool {
        text.trim() == label
    }
}

// ============================================================================
// Substring Matcher
// ============================================================================

/// Literal, case-sensitive, unanchored substring matching.
///
/// A value that happens to contain the label text elsewhere is corrupted by
/// [`strip`](LabelMatcher::strip), which removes every occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl LabelMatcher for SubstringMatcher {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn matches(&self, text: &str, label: &str) -> bool {
        text.contains(label)
    }

    fn strip(&self, text: &str, label: &str) -> String {
        text.replace(label, "").trim().to_string()
    }
}

// ============================================================================
// Boundary Matcher
// ============================================================================

/// Matches only when the label opens the (trimmed) text.
///
/// Only the leading label is removed, so values containing the label text
/// survive intact.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryMatcher;

impl LabelMatcher for BoundaryMatcher {
    fn name(&self) -> &'static str {
        "boundary"
    }

    fn matches(&self, text: &str, label: &str) -> bool {
        text.trim_start().starts_with(label)
    }

    fn strip(&self, text: &str, label: &str) -> String {
        let text = text.trim_start();
        text.strip_prefix(label).unwrap_or(text).trim().to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
