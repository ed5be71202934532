//! History command - parcels delivered within a date range.

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use parcelpending_core::{DateBound, DateRange};
use tracing::info;

use super::{connect, emit};
use crate::Cli;

/// Look-back used when `--from` is omitted.
const DEFAULT_HISTORY_DAYS: i64 = 30;

/// Arguments for the history command.
#[derive(Args, Default)]
pub struct HistoryArgs {
    /// First delivery date (YYYY-MM-DD or MM/DD/YYYY). Defaults to 30 days ago.
    #[arg(long)]
    pub from: Option<String>,

    /// Last delivery date (YYYY-MM-DD or MM/DD/YYYY). Defaults to today.
    #[arg(long)]
    pub to: Option<String>,
}

impl HistoryArgs {
    /// Builds the query range relative to `today`.
    ///
    /// Text that is not a recognized date is passed to the portal verbatim.
    pub fn range(&self, today: NaiveDate) -> Result<DateRange> {
        let start = self
            .from
            .as_deref()
            .map_or_else(|| DateBound::Date(today - Duration::days(DEFAULT_HISTORY_DAYS)), DateBound::parse);
        let end = self
            .to
            .as_deref()
            .map_or(DateBound::Date(today), DateBound::parse);

        DateRange::checked(start, end).context("Invalid date range")
    }
}

/// Runs the history command.
pub async fn run(args: &HistoryArgs, cli: &Cli) -> Result<()> {
    let range = args.range(Local::now().date_naive())?;
    let (client, _) = connect(cli).await?;

    info!(range = %range, "Fetching parcel history");
    let records = client.history(&range).await?;
    emit(&records, cli).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    #[test]
    fn test_default_range() {
        let range = HistoryArgs::default().range(today()).unwrap();
        assert_eq!(range.start_param(), "03/01/2024");
        assert_eq!(range.end_param(), "03/31/2024");
    }

    #[test]
    fn test_explicit_dates() {
        let args = HistoryArgs {
            from: Some("2024-01-15".to_string()),
            to: Some("02/01/2024".to_string()),
        };
        let range = args.range(today()).unwrap();
        assert_eq!(range.start_param(), "01/15/2024");
        assert_eq!(range.end_param(), "02/01/2024");
    }

    #[test]
    fn test_free_text_passes_through() {
        let args = HistoryArgs {
            from: Some("last week".to_string()),
            to: None,
        };
        assert_eq!(args.range(today()).unwrap().start_param(), "last week");
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let args = HistoryArgs {
            from: Some("2024-03-31".to_string()),
            to: Some("2024-03-01".to_string()),
        };
        assert!(args.range(today()).is_err());
    }
}
