//! CSV and JSON export of parcel records.
//!
//! Export never fails the caller: an empty record list or an I/O error is
//! logged and reported as `None`.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use parcelpending_core::ParcelRecord;
use tracing::{error, info, warn};

use crate::error::StoreError;
use crate::persistence::create_parent_dirs;

/// Field separator.
const SEP: char = ',';

/// Returns the sorted union of all keys, used as the CSV header.
pub fn csv_header(records: &[ParcelRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.keys().map(str::to_string))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<'a>(out: &mut String, row: impl IntoIterator<Item = &'a str>) {
    for (i, cell) in row.into_iter().enumerate() {
        if i > 0 {
            out.push(SEP);
        }
        if needs_quotes(cell) {
            let _ = write!(out, "\"{}\"", cell.replace('"', "\"\""));
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

/// Renders records as CSV. Missing cells are empty.
pub fn to_csv_string(records: &[ParcelRecord]) -> String {
    let header = csv_header(records);
    let mut out = String::new();

    write_row(&mut out, header.iter().map(String::as_str));
    for record in records {
        write_row(
            &mut out,
            header.iter().map(|key| record.get_key(key).unwrap_or_default()),
        );
    }
    out
}

/// Renders records as a pretty-printed JSON array.
pub fn to_json_string(records: &[ParcelRecord]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(records)?)
}

async fn write_file(path: &Path, contents: String) -> Result<(), StoreError> {
    create_parent_dirs(path).await?;
    tokio::fs::write(path, contents).await?;
    Ok(())
}

/// Writes records to `path` as CSV.
///
/// Returns the path written, or `None` if there was nothing to export or
/// the write failed.
pub async fn export_csv(records: &[ParcelRecord], path: &Path) -> Option<PathBuf> {
    if records.is_empty() {
        warn!("No parcels to export");
        return None;
    }

    match write_file(path, to_csv_string(records)).await {
        Ok(()) => {
            info!(path = %path.display(), count = records.len(), "Exported parcels to CSV");
            Some(path.to_path_buf())
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to export CSV");
            None
        }
    }
}

/// Writes records to `path` as JSON.
///
/// Returns the path written, or `None` if there was nothing to export or
/// the write failed.
pub async fn export_json(records: &[ParcelRecord], path: &Path) -> Option<PathBuf> {
    if records.is_empty() {
        warn!("No parcels to export");
        return None;
    }

    let result = match to_json_string(records) {
        Ok(json) => write_file(path, json).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            info!(path = %path.display(), count = records.len(), "Exported parcels to JSON");
            Some(path.to_path_buf())
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to export JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcelpending_core::Field;

    fn sample() -> Vec<ParcelRecord> {
        let first: ParcelRecord = [
            (Field::PackageCode, "12345678"),
            (Field::Status, "Picked up"),
            (Field::Courier, "USPS"),
        ]
        .into_iter()
        .collect();
        let second: ParcelRecord = [
            (Field::PackageCode, "87654321"),
            (Field::LockerBox, "7"),
            (Field::Status, "Delivered, awaiting \"pickup\""),
        ]
        .into_iter()
        .collect();
        vec![first, second]
    }

    #[test]
    fn test_csv_header_is_sorted_union() {
        assert_eq!(
            csv_header(&sample()),
            vec!["courier", "locker_box", "package_code", "status"]
        );
    }

    #[test]
    fn test_csv_rows() {
        let csv = to_csv_string(&sample());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "courier,locker_box,package_code,status");
        assert_eq!(lines[1], "USPS,,12345678,Picked up");
        assert_eq!(lines[2], ",7,87654321,\"Delivered, awaiting \"\"pickup\"\"\"");
    }

    #[tokio::test]
    async fn test_export_empty_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parcels.csv");

        assert!(export_csv(&[], &path).await.is_none());
        assert!(export_json(&[], &path).await.is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_export_csv_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("parcels.csv");

        let written = export_csv(&sample(), &path).await.unwrap();
        assert_eq!(written, path);

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.starts_with("courier,locker_box,package_code,status\n"));
    }

    #[tokio::test]
    async fn test_export_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parcels.json");

        export_json(&sample(), &path).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("\n  {"));
        let parsed: Vec<ParcelRecord> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, sample());
    }

    #[tokio::test]
    async fn test_export_to_directory_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_csv(&sample(), dir.path()).await.is_none());
    }
}
