//! Labelled parcel blocks.
//!
//! The history page renders each parcel as a `div.parcel-section` holding
//! one `Label: value` line per field.

use parcelpending_core::{Field, ParcelRecord};
use parcelpending_fetch::{ExtractContext, ExtractKind, ExtractStrategy};
use scraper::{ElementRef, Html};
use tracing::debug;

use super::fill_labelled;
use crate::html::select_document;

/// Container selector for one parcel.
const SECTION_SELECTOR: &str = "div.parcel-section";

/// Minimum length of a bare digit line taken as the internal parcel ID.
const MIN_PACKAGE_ID_DIGITS: usize = 6;

/// Extracts records from `div.parcel-section` blocks.
pub struct LabelledBlockStrategy;

impl LabelledBlockStrategy {
    /// Creates a new labelled block strategy.
    pub fn new() -> Self {
        Self
    }

    fn extract_section(section: ElementRef<'_>, ctx: &ExtractContext) -> ParcelRecord {
        let mut record = ParcelRecord::new();
        fill_labelled(&mut record, section, ctx);

        let package_id = section.text().map(str::trim).find(|line| {
            line.len() >= MIN_PACKAGE_ID_DIGITS
                && line.bytes().all(|b| b.is_ascii_digit())
                && Some(*line) != record.package_code()
        });
        if let Some(id) = package_id {
            record.set(Field::PackageId, id);
        }

        record
    }
}

impl Default for LabelledBlockStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for LabelledBlockStrategy {
    fn id(&self) -> &str {
        "labelled_block"
    }

    fn kind(&self) -> ExtractKind {
        ExtractKind::LabelledBlock
    }

    fn extract(&self, document: &Html, ctx: &ExtractContext) -> Vec<ParcelRecord> {
        let sections = select_document(document, SECTION_SELECTOR);
        debug!(sections = sections.len(), "Found parcel sections");

        sections
            .into_iter()
            .map(|section| Self::extract_section(section, ctx))
            .filter(ParcelRecord::is_valid)
            .collect()
    }
}
