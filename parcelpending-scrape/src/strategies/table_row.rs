//! Tabular parcel listings.

use parcelpending_core::{Field, ParcelRecord};
use parcelpending_fetch::{ExtractContext, ExtractKind, ExtractStrategy};
use scraper::{ElementRef, Html};
use tracing::debug;

use super::{apply_locker, fill_labelled};
use crate::html::{class_has_any, class_of, element_text, select_document, select_within};

/// Class keywords marking a row as a parcel.
const ROW_KEYWORDS: [&str; 2] = ["parcel", "package"];

/// Cell class keywords and the field each maps to, checked in order.
const CELL_KEYWORDS: [(&[&str], Field); 4] = [
    (&["code", "id"], Field::PackageCode),
    (&["status", "state"], Field::Status),
    (&["locker", "box"], Field::LockerBox),
    (&["courier", "carrier"], Field::Courier),
];

/// Extracts one record per `tr` whose class mentions parcel or package.
pub struct TableRowStrategy;

impl TableRowStrategy {
    /// Creates a new table row strategy.
    pub fn new() -> Self {
        Self
    }

    /// Maps a cell class onto a field.
    fn classify(class: &str) -> Option<Field> {
        CELL_KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| class.contains(k)))
            .map(|(_, field)| *field)
    }

    fn extract_row(row: ElementRef<'_>, ctx: &ExtractContext) -> ParcelRecord {
        let mut record = ParcelRecord::new();

        for cell in select_within(row, "td, th") {
            let Some(field) = Self::classify(&class_of(cell)) else {
                continue;
            };
            if record.contains(field) {
                continue;
            }
            let text = element_text(cell);
            if field == Field::LockerBox {
                apply_locker(&mut record, &text);
            } else {
                record.set(field, text);
            }
        }

        fill_labelled(&mut record, row, ctx);
        record
    }
}

impl Default for TableRowStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for TableRowStrategy {
    fn id(&self) -> &str {
        "table_row"
    }

    fn kind(&self) -> ExtractKind {
        ExtractKind::TableRow
    }

    fn extract(&self, document: &Html, ctx: &ExtractContext) -> Vec<ParcelRecord> {
        let rows: Vec<_> = select_document(document, "tr")
            .into_iter()
            .filter(|row| class_has_any(*row, &ROW_KEYWORDS))
            .collect();
        debug!(rows = rows.len(), "Found parcel rows");

        rows.into_iter()
            .map(|row| Self::extract_row(row, ctx))
            .filter(ParcelRecord::is_valid)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::fixtures;

    fn extract(html: &str) -> Vec<ParcelRecord> {
        TableRowStrategy::new().extract(&Html::parse_document(html), &ExtractContext::new())
    }

    #[test]
    fn test_classify() {
        assert_eq!(TableRowStrategy::classify("package-code"), Some(Field::PackageCode));
        assert_eq!(TableRowStrategy::classify("parcel-id"), Some(Field::PackageCode));
        assert_eq!(TableRowStrategy::classify("state"), Some(Field::Status));
        assert_eq!(TableRowStrategy::classify("box"), Some(Field::LockerBox));
        assert_eq!(TableRowStrategy::classify("carrier"), Some(Field::Courier));
        assert_eq!(TableRowStrategy::classify("price"), None);
    }

    #[test]
    fn test_rows_from_classes() {
        let records = extract(fixtures::TABLE_PAGE);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].package_code(), Some("11112222"));
        assert_eq!(records[0].status(), Some("Delivered"));
        assert_eq!(records[0].locker_box(), Some("12"));
        assert_eq!(records[0].size(), Some("Small"));
        assert_eq!(records[0].courier(), Some("FedEx"));

        assert_eq!(records[1].status(), Some("Picked Up"));
        assert_eq!(records[1].locker_box(), Some("3"));
        assert!(records[1].courier().is_none());
    }

    #[test]
    fn test_labelled_fragments_supplement_cells() {
        let records = extract(fixtures::TABLE_PAGE);
        assert_eq!(records[1].get(Field::Delivered), Some("03/01/2024"));
    }

    #[test]
    fn test_unclassed_rows_are_ignored() {
        let records = extract("<table><tr><td class='code'>1</td></tr></table>");
        assert!(records.is_empty());
    }
}
