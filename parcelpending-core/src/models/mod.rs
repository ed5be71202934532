//! Domain models for the `ParcelPending` client.
//!
//! ## Submodules
//!
//! - [`record`] - Parcel records and their recognized fields
//! - [`range`] - Date bounds for history queries
//! - [`credentials`] - Login credentials

mod credentials;
mod range;
mod record;

// Re-export everything at the models level
pub use credentials::Credentials;
pub use range::{DateBound, DateRange, QUERY_DATE_FORMAT};
pub use record::{Field, ParcelRecord};
