// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ParcelPending` Core
//!
//! Core types and models for the `ParcelPending` client.
//!
//! This crate provides the foundational types used across all other
//! `ParcelPending` crates:
//!
//! - Domain models (parcel records, date ranges, credentials)
//! - Error types
//!
//! ## Key Types
//!
//! - [`ParcelRecord`] - One extracted package entry, a field-name to value map
//! - [`Field`] - The field names the extractor knows how to populate
//! - [`DateRange`] / [`DateBound`] - Bounds of a history query
//! - [`Credentials`] - Email and password used to log in

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{Credentials, DateBound, DateRange, Field, ParcelRecord, QUERY_DATE_FORMAT};
