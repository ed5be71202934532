//! Last-resort regexes over container text.

use std::sync::LazyLock;

use parcelpending_core::{Field, ParcelRecord};
use parcelpending_fetch::{ExtractContext, ExtractKind, ExtractStrategy};
use regex::Regex;
use scraper::Html;
use tracing::debug;

use super::PACKAGE_CODE_LABEL;
use crate::html::{element_text, record_containers};

/// Class keywords marking a container.
const CONTAINER_KEYWORDS: [&str; 2] = ["parcel", "package"];

/// Known carrier names.
static COURIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(USPS|UPS|FedEx|DHL|Amazon|OnTrac|LaserShip|Canada Post|Purolator)\b")
        .expect("Invalid regex")
});

/// "Locker 14", "locker box #14", "Locker Box #: 14"
static LOCKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\blocker(?:\s*box)?\s*#?\s*:?\s*(\d+)").expect("Invalid regex")
});

/// Size vocabulary; `X-Large` is listed first so it wins over `Large`.
static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(X-Large|Small|Medium|Large)\b").expect("Invalid regex")
});

/// Keeps the raw container text and whatever the regexes recover from it.
pub struct RawTextStrategy;

impl RawTextStrategy {
    /// Creates a new raw text strategy.
    pub fn new() -> Self {
        Self
    }

    fn capture(re: &Regex, text: &str) -> Option<String> {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn parse_text(text: &str) -> ParcelRecord {
        let mut record = ParcelRecord::new();
        record.set(Field::RawContent, text);

        if let Some(courier) = Self::capture(&COURIER_RE, text) {
            record.set(Field::Courier, courier);
        }
        if let Some(locker) = Self::capture(&LOCKER_RE, text) {
            record.set(Field::LockerBox, locker);
        }
        if let Some(size) = Self::capture(&SIZE_RE, text) {
            record.set(Field::Size, size);
        }
        record
    }
}

impl Default for RawTextStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for RawTextStrategy {
    fn id(&self) -> &str {
        "raw_text"
    }

    fn kind(&self) -> ExtractKind {
        ExtractKind::RawText
    }

    fn extract(&self, document: &Html, ctx: &ExtractContext) -> Vec<ParcelRecord> {
        let containers = record_containers(
            document,
            &CONTAINER_KEYWORDS,
            PACKAGE_CODE_LABEL,
            ctx.matcher.as_ref(),
        );
        debug!(containers = containers.len(), "Scanning container text");

        containers
            .into_iter()
            .map(|container| Self::parse_text(&element_text(container)))
            .filter(|record| record.has_fields_besides(Field::RawContent))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::fixtures;

    #[test]
    fn test_raw_text_page() {
        let records = RawTextStrategy::new()
            .extract(&Html::parse_document(fixtures::RAW_TEXT_PAGE), &ExtractContext::new());
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.courier(), Some("FedEx"));
        assert_eq!(record.locker_box(), Some("14"));
        assert_eq!(record.size(), Some("large"));
        assert_eq!(
            record.get(Field::RawContent),
            Some("Shipped via FedEx to locker 14, size large.")
        );
    }

    #[test]
    fn test_x_large_preferred() {
        let record = RawTextStrategy::parse_text("Locker Box #: 3 (X-Large)");
        assert_eq!(record.size(), Some("X-Large"));
        assert_eq!(record.locker_box(), Some("3"));
    }

    #[test]
    fn test_ups_is_not_found_inside_words() {
        let record = RawTextStrategy::parse_text("Groups of lockers");
        assert!(!record.has_fields_besides(Field::RawContent));
    }
}
