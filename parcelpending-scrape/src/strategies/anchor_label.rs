//! Records anchored on bare `Package Code:` labels.
//!
//! Used when the page carries no recognizable markup at all. Every text node
//! that reads exactly `Package Code:` starts a record; the remaining labels
//! are searched for in a bounded number of enclosing elements.

use parcelpending_core::{Field, ParcelRecord};
use parcelpending_fetch::{ExtractContext, ExtractKind, ExtractStrategy};
use scraper::{ElementRef, Html};
use tracing::debug;

use super::{PACKAGE_CODE_LABEL, fill_labelled, has_all_labels};
use crate::html::{element_text, normalize_ws};

/// Builds one record per standalone package code label.
pub struct AnchorLabelStrategy;

impl AnchorLabelStrategy {
    /// Creates a new anchor label strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnchorLabelStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for AnchorLabelStrategy {
    fn id(&self) -> &str {
        "anchor_label"
    }

    fn kind(&self) -> ExtractKind {
        ExtractKind::AnchorLabel
    }

    fn extract(&self, document: &Html, ctx: &ExtractContext) -> Vec<ParcelRecord> {
        let matcher = ctx.matcher.as_ref();
        let anchors: Vec<_> = document
            .root_element()
            .descendants()
            .filter(|n| {
                n.value()
                    .as_text()
                    .is_some_and(|t| matcher.is_bare_label(t, PACKAGE_CODE_LABEL))
            })
            .collect();
        debug!(anchors = anchors.len(), "Found package code anchors");

        let mut records = Vec::with_capacity(anchors.len());
        for anchor in &anchors {
            let mut record = ParcelRecord::new();

            // Value: next non-empty sibling of the label, or of its element
            let sibling_value = anchor
                .next_siblings()
                .chain(anchor.parent().into_iter().flat_map(|p| p.next_siblings()))
                .find_map(|n| {
                    let text = match n.value().as_text() {
                        Some(text) => normalize_ws(text),
                        None => ElementRef::wrap(n).map(element_text).unwrap_or_default(),
                    };
                    (!text.is_empty()).then_some(text)
                });
            if let Some(code) = sibling_value {
                record.set(Field::PackageCode, code);
            }

            let mut current = anchor.parent().and_then(ElementRef::wrap);
            for _ in 0..ctx.max_ancestor_depth {
                let Some(ancestor) = current else {
                    break;
                };
                let enclosed = anchors
                    .iter()
                    .filter(|a| a.ancestors().any(|x| x.id() == ancestor.id()))
                    .count();
                if enclosed > 1 {
                    break;
                }

                fill_labelled(&mut record, ancestor, ctx);
                if has_all_labels(&record) {
                    break;
                }
                current = ancestor.parent().and_then(ElementRef::wrap);
            }

            if record.is_valid() {
                records.push(record);
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::fixtures;

    fn extract_with(html: &str, ctx: &ExtractContext) -> Vec<ParcelRecord> {
        AnchorLabelStrategy::new().extract(&Html::parse_document(html), ctx)
    }

    #[test]
    fn test_anchor_records() {
        let records = extract_with(fixtures::ANCHOR_PAGE, &ExtractContext::new());
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].package_code(), Some("55556666"));
        assert_eq!(records[0].status(), Some("Delivered"));
        assert_eq!(records[0].courier(), Some("UPS Ground"));

        assert_eq!(records[1].package_code(), Some("77778888"));
        assert_eq!(records[1].status(), Some("Picked up"));
        // The walk stops below the shared list, so no courier leaks across
        assert!(records[1].courier().is_none());
    }

    #[test]
    fn test_walk_depth_is_bounded() {
        let html = r#"<div><p>Courier: UPS</p><div><div><div>
                        <span>Package Code:</span><span>1</span>
                      </div></div></div></div>"#;

        let shallow = extract_with(html, &ExtractContext::new().with_max_ancestor_depth(2));
        assert!(shallow[0].courier().is_none());

        let deep = extract_with(html, &ExtractContext::new());
        assert_eq!(deep[0].courier(), Some("UPS"));
    }

    #[test]
    fn test_inline_label_is_not_an_anchor() {
        let records = extract_with("<p>Package Code: 123</p>", &ExtractContext::new());
        assert!(records.is_empty());
    }
}
