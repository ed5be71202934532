// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ParcelPending` Scrape
//!
//! The client for the `ParcelPending` resident portal.
//!
//! - [`client::ParcelPendingClient`] - Login plus history queries
//! - [`login`] - Login form discovery and replay
//! - [`strategies`] - The five record extraction heuristics
//! - [`filters`] - Pure filters behind `active`, `by_courier` and `by_code`
//!
//! ## Usage
//!
//! ```ignore
//! use parcelpending_fetch::FetchSettings;
//! use parcelpending_scrape::ParcelPendingClient;
//!
//! let mut client = ParcelPendingClient::new(FetchSettings::default(), None)?;
//! client.login(Some("me@example.com"), Some("secret")).await?;
//!
//! for parcel in client.active(30).await? {
//!     println!("{:?}", parcel.package_code());
//! }
//! ```

pub mod client;
pub mod error;
pub mod filters;
pub mod html;
pub mod login;
pub mod strategies;

pub use client::{DEFAULT_ACTIVE_DAYS, DEFAULT_CODE_DAYS, DEFAULT_COURIER_DAYS, ParcelPendingClient};
pub use error::ClientError;
pub use login::LoginForm;
pub use strategies::{
    AnchorLabelStrategy, GenericContainerStrategy, LabelledBlockStrategy, RawTextStrategy,
    TableRowStrategy, default_pipeline,
};
