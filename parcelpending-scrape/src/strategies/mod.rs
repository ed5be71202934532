//! Record extraction strategies.
//!
//! Five independent heuristics, from the most to the least confident:
//!
//! | Strategy | ID | Looks for |
//! |----------|----|-----------|
//! | [`LabelledBlockStrategy`] | `labelled_block` | `div.parcel-section` blocks |
//! | [`TableRowStrategy`] | `table_row` | `tr` rows with a parcel/package class |
//! | [`GenericContainerStrategy`] | `generic_container` | any parcel/package/delivery container |
//! | [`AnchorLabelStrategy`] | `anchor_label` | bare `Package Code:` labels |
//! | [`RawTextStrategy`] | `raw_text` | regexes over container text |
//!
//! None of them assumes another has run; [`default_pipeline`] orders them.

mod anchor_label;
mod generic_container;
mod labelled_block;
mod raw_text;
mod table_row;

pub use anchor_label::AnchorLabelStrategy;
pub use generic_container::GenericContainerStrategy;
pub use labelled_block::LabelledBlockStrategy;
pub use raw_text::RawTextStrategy;
pub use table_row::TableRowStrategy;

use parcelpending_core::{Field, ParcelRecord};
use parcelpending_fetch::{ExtractContext, ExtractPipeline};
use scraper::ElementRef;

use crate::html::labelled_value;

/// Label preceding the pickup code.
pub const PACKAGE_CODE_LABEL: &str = "Package Code:";

/// Labelled fragments and the fields they fill, in lookup order.
pub const LABELS: [(Field, &str); 6] = [
    (Field::PackageCode, PACKAGE_CODE_LABEL),
    (Field::Status, "Package Status:"),
    (Field::LockerBox, "Locker Box #:"),
    (Field::Courier, "Courier:"),
    (Field::Delivered, "Delivered:"),
    (Field::StatusChange, "Status Change:"),
];

/// Builds the pipeline with all five strategies.
pub fn default_pipeline() -> ExtractPipeline {
    ExtractPipeline::with_strategies(vec![
        Box::new(LabelledBlockStrategy::new()),
        Box::new(TableRowStrategy::new()),
        Box::new(GenericContainerStrategy::new()),
        Box::new(AnchorLabelStrategy::new()),
        Box::new(RawTextStrategy::new()),
    ])
}

/// Fills every labelled field the record is still missing from `container`.
pub(crate) fn fill_labelled(record: &mut ParcelRecord, container: ElementRef<'_>, ctx: &ExtractContext) {
    for (field, label) in LABELS {
        if record.contains(field) {
            continue;
        }
        let Some(value) = labelled_value(container, label, ctx.matcher.as_ref()) else {
            continue;
        };
        if field == Field::LockerBox {
            apply_locker(record, &value);
        } else {
            record.set(field, value);
        }
    }
}

/// Returns true once every labelled field is present.
pub(crate) fn has_all_labels(record: &ParcelRecord) -> bool {
    LABELS.iter().all(|(field, _)| record.contains(*field))
}

/// Splits `"42 (Medium)"` into the locker box number and its size.
///
/// The size is the content of the first parenthesized group; the box number
/// is everything before the first `(`.
pub(crate) fn apply_locker(record: &mut ParcelRecord, text: &str) {
    let Some(open) = text.find('(') else {
        record.set(Field::LockerBox, text);
        return;
    };

    record.set(Field::LockerBox, &text[..open]);
    if let Some(close) = text[open + 1..].find(')') {
        record.set_if_absent(Field::Size, &text[open + 1..open + 1 + close]);
    }
}

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_locker_with_size() {
        let mut record = ParcelRecord::new();
        apply_locker(&mut record, "42 (Medium)");
        assert_eq!(record.locker_box(), Some("42"));
        assert_eq!(record.size(), Some("Medium"));
    }

    #[test]
    fn test_apply_locker_without_size() {
        let mut record = ParcelRecord::new();
        apply_locker(&mut record, "17");
        assert_eq!(record.locker_box(), Some("17"));
        assert!(record.size().is_none());
    }

    #[test]
    fn test_apply_locker_unclosed_paren() {
        let mut record = ParcelRecord::new();
        apply_locker(&mut record, "9 (Large");
        assert_eq!(record.locker_box(), Some("9"));
        assert!(record.size().is_none());
    }

    #[test]
    fn test_default_pipeline_order() {
        let ids: Vec<_> = default_pipeline()
            .strategy_info()
            .into_iter()
            .map(|info| info.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "labelled_block",
                "table_row",
                "generic_container",
                "anchor_label",
                "raw_text"
            ]
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let pipeline = default_pipeline();
        let ctx = ExtractContext::new();
        let first = pipeline.extract_html(fixtures::LABELLED_PAGE, &ctx).records;
        let second = pipeline.extract_html(fixtures::LABELLED_PAGE, &ctx).records;
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_table_page_falls_back_past_labelled_block() {
        let outcome = default_pipeline().extract_html(fixtures::TABLE_PAGE, &ExtractContext::new());
        assert_eq!(outcome.matched_strategy(), Some("table_row"));
        assert_eq!(outcome.attempts_count(), 2);
        assert_eq!(outcome.records.len(), 2);
    }

    #[test]
    fn test_unrelated_page_yields_nothing() {
        let outcome = default_pipeline().extract_html(fixtures::EMPTY_PAGE, &ExtractContext::new());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.attempts_count(), 5);
    }
}
