//! Record filters behind the client's convenience queries.

use parcelpending_core::ParcelRecord;

/// Status of parcels that have left the locker, compared lowercased.
const PICKED_UP: &str = "picked up";

/// Keeps records with a status other than "picked up".
///
/// Records without a status cannot be shown to be active and are dropped.
pub fn active(records: Vec<ParcelRecord>) -> Vec<ParcelRecord> {
    records
        .into_iter()
        .filter(|r| r.status().is_some_and(|s| s.to_lowercase() != PICKED_UP))
        .collect()
}

/// Keeps records whose courier contains `name`, ignoring case.
pub fn by_courier(records: Vec<ParcelRecord>, name: &str) -> Vec<ParcelRecord> {
    let needle = name.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.courier().is_some_and(|c| c.to_lowercase().contains(&needle)))
        .collect()
}

/// Returns the first record whose package code equals `code` exactly.
pub fn by_code(records: Vec<ParcelRecord>, code: &str) -> Option<ParcelRecord> {
    records.into_iter().find(|r| r.package_code() == Some(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcelpending_core::Field;

    fn record(code: &str, status: Option<&str>, courier: Option<&str>) -> ParcelRecord {
        let mut r = ParcelRecord::new();
        r.set(Field::PackageCode, code);
        if let Some(status) = status {
            r.set(Field::Status, status);
        }
        if let Some(courier) = courier {
            r.set(Field::Courier, courier);
        }
        r
    }

    fn sample() -> Vec<ParcelRecord> {
        vec![
            record("1", Some("Picked up"), Some("USPS")),
            record("2", Some("Delivered"), Some("usps ground")),
            record("3", Some("PICKED UP"), Some("Amazon")),
            record("4", None, Some("FedEx")),
            record("5", Some("Picked up late"), None),
        ]
    }

    fn codes(records: &[ParcelRecord]) -> Vec<&str> {
        records.iter().filter_map(ParcelRecord::package_code).collect()
    }

    #[test]
    fn test_active() {
        let active = active(sample());
        assert_eq!(codes(&active), vec!["2", "5"]);
    }

    #[test]
    fn test_by_courier_substring_case_insensitive() {
        let usps = by_courier(sample(), "USPS");
        assert_eq!(codes(&usps), vec!["1", "2"]);
        assert!(by_courier(sample(), "dhl").is_empty());
    }

    #[test]
    fn test_by_code_exact() {
        assert_eq!(by_code(sample(), "3").unwrap().courier(), Some("Amazon"));
        assert!(by_code(sample(), "33").is_none());
        assert!(by_code(Vec::new(), "1").is_none());
    }

    #[test]
    fn test_by_code_returns_first_match() {
        let records = vec![
            record("9", Some("Delivered"), None),
            record("9", Some("Picked up"), None),
        ];
        assert_eq!(by_code(records, "9").unwrap().status(), Some("Delivered"));
    }
}
