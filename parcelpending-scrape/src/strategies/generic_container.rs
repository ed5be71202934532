//! Any container hinting at parcel content.

use parcelpending_core::ParcelRecord;
use parcelpending_fetch::{ExtractContext, ExtractKind, ExtractStrategy};
use scraper::Html;
use tracing::debug;

use super::{PACKAGE_CODE_LABEL, fill_labelled};
use crate::html::record_containers;

/// Class keywords marking a container.
const CONTAINER_KEYWORDS: [&str; 3] = ["parcel", "package", "delivery"];

/// Runs the labelled-fragment search over parcel-ish containers, one per record.
pub struct GenericContainerStrategy;

impl GenericContainerStrategy {
    /// Creates a new generic container strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenericContainerStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractStrategy for GenericContainerStrategy {
    fn id(&self) -> &str {
        "generic_container"
    }

    fn kind(&self) -> ExtractKind {
        ExtractKind::GenericContainer
    }

    fn extract(&self, document: &Html, ctx: &ExtractContext) -> Vec<ParcelRecord> {
        let containers = record_containers(
            document,
            &CONTAINER_KEYWORDS,
            PACKAGE_CODE_LABEL,
            ctx.matcher.as_ref(),
        );
        debug!(containers = containers.len(), "Found candidate containers");

        containers
            .into_iter()
            .map(|container| {
                let mut record = ParcelRecord::new();
                fill_labelled(&mut record, container, ctx);
                record
            })
            .filter(ParcelRecord::is_valid)
            .collect()
    }
}
