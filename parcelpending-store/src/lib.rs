// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ParcelPending` Store
//!
//! Everything the client writes to disk.
//!
//! - **Export**: CSV and JSON sinks for parcel records
//! - **Settings**: CLI preferences with persistence
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use parcelpending_store::{SettingsStore, export_csv};
//!
//! let store = SettingsStore::load_default().await;
//! let settings = store.get().await;
//!
//! if let Some(path) = export_csv(&records, Path::new("parcels.csv")).await {
//!     println!("Wrote {}", path.display());
//! }
//! ```

pub mod error;
pub mod export;
pub mod persistence;
pub mod settings;

pub use error::StoreError;
pub use export::{csv_header, export_csv, export_json, to_csv_string, to_json_string};
pub use persistence::{
    create_parent_dirs, default_config_dir, default_settings_path, load_json, load_json_or_default,
    save_json,
};
pub use settings::{Settings, SettingsStore};
