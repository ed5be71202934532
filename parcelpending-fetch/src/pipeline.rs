//! Extraction pipeline for running strategies in order.
//!
//! The pipeline takes a list of extraction strategies and runs them in
//! priority order until one yields at least one record. Later strategies are
//! never invoked once an earlier one succeeds.

use std::time::{Duration, Instant};

use parcelpending_core::ParcelRecord;
use scraper::Html;
use tracing::{debug, info, instrument};

use crate::context::ExtractContext;
use crate::strategy::{ExtractKind, ExtractStrategy, StrategyInfo};

// ============================================================================
// Extract Attempt
// ============================================================================

/// Record of a single strategy run.
#[derive(Debug, Clone)]
pub struct ExtractAttempt {
    /// The strategy ID that was run.
    pub strategy_id: String,
    /// The layout the strategy targets.
    pub kind: ExtractKind,
    /// Number of records the strategy produced.
    pub records: usize,
    /// How long the run took.
    pub duration: Duration,
}

impl ExtractAttempt {
    /// Returns true if the strategy produced records.
    pub fn matched(&self) -> bool {
        self.records > 0
    }
}

// ============================================================================
// Extract Outcome
// ============================================================================

/// The outcome of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOutcome {
    /// Records from the winning strategy, in document order.
    pub records: Vec<ParcelRecord>,
    /// All strategy runs, in the order they happened.
    pub attempts: Vec<ExtractAttempt>,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl ExtractOutcome {
    /// Returns true if any strategy produced records.
    pub fn is_match(&self) -> bool {
        !self.records.is_empty()
    }

    /// Returns the number of strategies that were run.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the winning strategy ID, if any.
    pub fn matched_strategy(&self) -> Option<&str> {
        self.attempts
            .iter()
            .find(|a| a.matched())
            .map(|a| a.strategy_id.as_str())
    }

    /// Consumes the outcome, returning the records.
    pub fn into_records(self) -> Vec<ParcelRecord> {
        self.records
    }
}

// ============================================================================
// Extract Pipeline
// ============================================================================

/// A cascade of extraction strategies tried in order.
pub struct ExtractPipeline {
    strategies: Vec<Box<dyn ExtractStrategy>>,
}

impl ExtractPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Creates a pipeline with the given strategies.
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractStrategy>>) -> Self {
        let mut pipeline = Self { strategies };
        pipeline.sort_by_priority();
        pipeline
    }

    /// Adds a strategy to the pipeline.
    pub fn add_strategy(&mut self, strategy: Box<dyn ExtractStrategy>) {
        self.strategies.push(strategy);
        self.sort_by_priority();
    }

    /// Sorts strategies by priority (highest first). Ties keep insertion order.
    fn sort_by_priority(&mut self) {
        self.strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Returns the number of strategies in the pipeline.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Returns information about all strategies, in execution order.
    pub fn strategy_info(&self) -> Vec<StrategyInfo> {
        self.strategies
            .iter()
            .map(|s| StrategyInfo::from_strategy(s.as_ref()))
            .collect()
    }

    /// Parses `html` and runs the cascade over it.
    pub fn extract_html(&self, html: &str, ctx: &ExtractContext) -> ExtractOutcome {
        let document = Html::parse_document(html);
        self.execute(&document, ctx)
    }

    /// Runs strategies in order until one yields records.
    ///
    /// Records without any populated field are dropped before a strategy's
    /// output is judged.
    #[instrument(skip_all, fields(strategies = self.strategies.len()))]
    pub fn execute(&self, document: &Html, ctx: &ExtractContext) -> ExtractOutcome {
        let start = Instant::now();
        let mut attempts = Vec::new();

        for strategy in &self.strategies {
            let strategy_id = strategy.id();
            let kind = strategy.kind();
            let attempt_start = Instant::now();

            debug!(strategy = %strategy_id, kind = %kind, "Running extraction strategy");

            let mut records = strategy.extract(document, ctx);
            records.retain(ParcelRecord::is_valid);

            attempts.push(ExtractAttempt {
                strategy_id: strategy_id.to_string(),
                kind,
                records: records.len(),
                duration: attempt_start.elapsed(),
            });

            if !records.is_empty() {
                info!(
                    strategy = %strategy_id,
                    count = records.len(),
                    "Extraction strategy matched"
                );
                return ExtractOutcome {
                    records,
                    attempts,
                    duration: start.elapsed(),
                };
            }

            debug!(strategy = %strategy_id, "Strategy found no records");
        }

        debug!("No extraction strategy matched");
        ExtractOutcome {
            records: Vec::new(),
            attempts,
            duration: start.elapsed(),
        }
    }
}

impl Default for ExtractPipeline {
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
    use parcelpending_core::Field;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockStrategy {
        id: String,
        kind: ExtractKind,
        codes: Vec<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl MockStrategy {
        fn new(id: &str, kind: ExtractKind, codes: Vec<&'static str>) -> Self {
            Self {
                id: id.to_string(),
                kind,
                codes,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn calls(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    impl ExtractStrategy for MockStrategy {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> ExtractKind {
            self.kind
        }

        fn extract(&self, _document: &Html, _ctx: &ExtractContext) -> Vec<ParcelRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.codes
                .iter()
                .map(|code| [(Field::PackageCode, *code)].into_iter().collect())
                .collect()
        }
    }

    struct BlankStrategy;

    impl ExtractStrategy for BlankStrategy {
        fn id(&self) -> &str {
            "test.blank"
        }

        fn kind(&self) -> ExtractKind {
            ExtractKind::LabelledBlock
        }

        fn extract(&self, _document: &Html, _ctx: &ExtractContext) -> Vec<ParcelRecord> {
            vec![ParcelRecord::new(), ParcelRecord::new()]
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = ExtractPipeline::new();
        let outcome = pipeline.extract_html("<html></html>", &ExtractContext::new());

        assert!(!outcome.is_match());
        assert_eq!(outcome.attempts_count(), 0);
    }

    #[test]
    fn test_first_match_wins_and_stops() {
        let table = MockStrategy::new("test.table", ExtractKind::TableRow, vec!["1", "2"]);
        let raw = MockStrategy::new("test.raw", ExtractKind::RawText, vec!["9"]);
        let raw_calls = raw.calls();

        // Inserted out of order; priority puts the table strategy first
        let pipeline = ExtractPipeline::with_strategies(vec![Box::new(raw), Box::new(table)]);
        let outcome = pipeline.extract_html("<p></p>", &ExtractContext::new());

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.matched_strategy(), Some("test.table"));
        assert_eq!(outcome.attempts_count(), 1);
        assert_eq!(raw_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fallback_when_strategy_finds_nothing() {
        let pipeline = ExtractPipeline::with_strategies(vec![
            Box::new(MockStrategy::new("test.block", ExtractKind::LabelledBlock, vec![])),
            Box::new(MockStrategy::new("test.anchor", ExtractKind::AnchorLabel, vec!["7"])),
        ]);
        let outcome = pipeline.extract_html("<p></p>", &ExtractContext::new());

        assert_eq!(outcome.attempts_count(), 2);
        assert_eq!(outcome.matched_strategy(), Some("test.anchor"));
        assert_eq!(outcome.records[0].package_code(), Some("7"));
    }

    #[test]
    fn test_empty_records_do_not_count_as_match() {
        let pipeline = ExtractPipeline::with_strategies(vec![
            Box::new(BlankStrategy),
            Box::new(MockStrategy::new("test.raw", ExtractKind::RawText, vec!["5"])),
        ]);
        let outcome = pipeline.extract_html("<p></p>", &ExtractContext::new());

        assert_eq!(outcome.matched_strategy(), Some("test.raw"));
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn test_strategy_info_is_in_execution_order() {
        let mut pipeline = ExtractPipeline::new();
        pipeline.add_strategy(Box::new(MockStrategy::new("b", ExtractKind::RawText, vec![])));
        pipeline.add_strategy(Box::new(MockStrategy::new("a", ExtractKind::TableRow, vec![])));

        let ids: Vec<_> = pipeline.strategy_info().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(pipeline.len(), 2);
    }
}
