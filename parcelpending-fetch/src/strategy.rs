//! Extraction strategy trait and types.
//!
//! A strategy is one heuristic for locating parcel records in a history page.
//! The page markup is not stable, so several strategies are tried in
//! priority order, from the most specific layout to a raw-text fallback.

use std::fmt;

use parcelpending_core::ParcelRecord;
use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::context::ExtractContext;

// ============================================================================
// Extract Kind
// ============================================================================

/// The page layout a strategy targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractKind {
    /// `div` blocks with a parcel-section class and labelled lines.
    LabelledBlock,
    /// Table rows with classified cells.
    TableRow,
    /// Any container whose class hints at parcel content.
    GenericContainer,
    /// Ancestors of bare `Package Code:` labels.
    AnchorLabel,
    /// Regular expressions over container text.
    RawText,
}

impl ExtractKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LabelledBlock => "Labelled Block",
            Self::TableRow => "Table Row",
            Self::GenericContainer => "Generic Container",
            Self::AnchorLabel => "Anchor Label",
            Self::RawText => "Raw Text",
        }
    }
}

impl fmt::Display for ExtractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Extract Strategy Trait
// ============================================================================

/// A heuristic for extracting parcel records from a history page.
///
/// Strategies must not assume any other strategy ran before them, and must
/// be deterministic: the same document always yields the same records.
///
/// ## Implementing a Strategy
///
/// ```ignore
/// struct LabelledBlockStrategy;
///
/// impl ExtractStrategy for LabelledBlockStrategy {
///     fn id(&self) -> &str {
///         "history.labelled_block"
///     }
///
///     fn kind(&self) -> ExtractKind {
///         ExtractKind::LabelledBlock
///     }
///
///     fn extract(&self, document: &Html, ctx: &ExtractContext) -> Vec<ParcelRecord> {
///         // Find blocks and read labelled lines with ctx.matcher
///     }
/// }
/// ```
pub trait ExtractStrategy: Send + Sync {
    /// Unique identifier for this strategy (e.g. "history.table_row").
    fn id(&self) -> &str;

    /// The layout this strategy targets.
    fn kind(&self) -> ExtractKind;

    /// Extracts records from the document.
    ///
    /// Returns an empty vector when the layout is not recognized; never fails.
    fn extract(&self, document: &Html, ctx: &ExtractContext) -> Vec<ParcelRecord>;

    /// Priority of this strategy (higher = try first).
    ///
    /// Default priorities follow decreasing confidence:
    /// - Labelled Block: 100
    /// - Table Row: 80
    /// - Generic Container: 60
    /// - Anchor Label: 40
    /// - Raw Text: 20
    fn priority(&self) -> u32 {
        match self.kind() {
            ExtractKind::LabelledBlock => 100,
            ExtractKind::TableRow => 80,
            ExtractKind::GenericContainer => 60,
            ExtractKind::AnchorLabel => 40,
            ExtractKind::RawText => 20,
        }
    }
}

// ============================================================================
// Strategy Info
// ============================================================================

/// Information about a strategy (for reporting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Strategy ID.
    pub id: String,
    /// Strategy kind.
    pub kind: ExtractKind,
    /// Priority.
    pub priority: u32,
}

impl StrategyInfo {
    /// Creates strategy info from a strategy implementation.
    pub fn from_strategy(strategy: &dyn ExtractStrategy) -> Self {
        Self {
            id: strategy.id().to_string(),
            kind: strategy.kind(),
            priority: strategy.priority(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
