//! Parcel records.
//!
//! A [`ParcelRecord`] is a best-effort mapping from field name to text value.
//! Which fields are present depends on the page layout the extractor ran
//! against, so no field is mandatory.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Field
// ============================================================================

/// Field names the extractor knows how to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Pickup code printed on the notification.
    PackageCode,
    /// Current package status (e.g. "Picked up").
    Status,
    /// Locker box number.
    LockerBox,
    /// Locker box size category (e.g. "Medium").
    Size,
    /// Delivering courier.
    Courier,
    /// Delivery timestamp as rendered by the site.
    Delivered,
    /// Last status change timestamp as rendered by the site.
    StatusChange,
    /// Internal parcel identifier.
    PackageId,
    /// Raw text of the container the record was recovered from.
    RawContent,
}

impl Field {
    /// All recognized fields.
    pub const ALL: [Field; 9] = [
        Field::PackageCode,
        Field::Status,
        Field::LockerBox,
        Field::Size,
        Field::Courier,
        Field::Delivered,
        Field::StatusChange,
        Field::PackageId,
        Field::RawContent,
    ];

    /// Returns the key this field is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PackageCode => "package_code",
            Self::Status => "status",
            Self::LockerBox => "locker_box",
            Self::Size => "size",
            Self::Courier => "courier",
            Self::Delivered => "delivered",
            Self::StatusChange => "status_change",
            Self::PackageId => "package_id",
            Self::RawContent => "raw_content",
        }
    }

    /// Looks up a field by its key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parcel Record
// ============================================================================

/// One extracted package entry.
///
/// Values are trimmed on insertion and empty values are never stored, so
/// every key present maps to a non-empty string. Keys iterate in
/// alphabetical order and the record serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelRecord {
    fields: BTreeMap<String, String>,
}

impl ParcelRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value.
    ///
    /// Returns false (and stores nothing) if the trimmed value is empty.
    pub fn set(&mut self, field: Field, value: impl AsRef<str>) -> bool {
        self.insert(field.as_str(), value)
    }

    /// Sets a field only if it is not already present.
    ///
    /// Returns true if the value was stored.
    pub fn set_if_absent(&mut self, field: Field, value: impl AsRef<str>) -> bool {
        if self.contains(field) {
            return false;
        }
        self.set(field, value)
    }

    /// Inserts a value under an arbitrary key.
    ///
    /// Used for keys outside [`Field`], e.g. records read back from an export.
    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) -> bool {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return false;
        }
        self.fields.insert(key.into(), value.to_string());
        true
    }

    /// Returns the value of a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.get_key(field.as_str())
    }

    /// Returns the value stored under a key.
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns true if the field is present.
    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(field.as_str())
    }

    /// Package code, if extracted.
    pub fn package_code(&self) -> Option<&str> {
        self.get(Field::PackageCode)
    }

    /// Package status, if extracted.
    pub fn status(&self) -> Option<&str> {
        self.get(Field::Status)
    }

    /// Locker box number, if extracted.
    pub fn locker_box(&self) -> Option<&str> {
        self.get(Field::LockerBox)
    }

    /// Locker size, if extracted.
    pub fn size(&self) -> Option<&str> {
        self.get(Field::Size)
    }

    /// Courier, if extracted.
    pub fn courier(&self) -> Option<&str> {
        self.get(Field::Courier)
    }

    /// Returns true if the record holds at least one populated field.
    pub fn is_valid(&self) -> bool {
        self.fields.values().any(|v| !v.is_empty())
    }

    /// Returns true if any field other than `field` is populated.
    pub fn has_fields_besides(&self, field: Field) -> bool {
        self.fields
            .iter()
            .any(|(k, v)| k != field.as_str() && !v.is_empty())
    }

    /// Number of populated fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the keys in alphabetical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(key, value)` pairs in alphabetical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<V: AsRef<str>> FromIterator<(Field, V)> for ParcelRecord {
    fn from_iter<I: IntoIterator<Item = (Field, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.set(field, value);
        }
        record
    }
}

// ============================================================================
// Tests
// ============================================================================
