// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ParcelPending` Fetch
//!
//! Session transport and the record extraction pipeline for the
//! `ParcelPending` client.
//!
//! ## Host APIs
//!
//! - [`host::http`] - Cookie-bearing HTTP client with tracing
//! - [`session::Session`] - The single authenticated session of a client
//! - [`site::Endpoints`] - Login and history URLs of the target site
//!
//! ## Extraction Pipeline
//!
//! The extraction pipeline runs extraction strategies in priority order
//! until one of them yields records:
//!
//! - [`strategy::ExtractStrategy`] - Trait for extraction heuristics
//! - [`pipeline::ExtractPipeline`] - Runs strategies in order
//! - [`context::ExtractContext`] - Label matcher and walk limits shared by strategies
//! - [`matcher::LabelMatcher`] - Pluggable label matching
//!
//! ## Example
//!
//! ```ignore
//! use parcelpending_fetch::{ExtractContext, ExtractPipeline};
//!
//! let pipeline = ExtractPipeline::with_strategies(vec![
//!     Box::new(LabelledBlockStrategy::new()),
//!     Box::new(TableRowStrategy::new()),
//! ]);
//!
//! let outcome = pipeline.extract_html(&body, &ExtractContext::new());
//! ```

// Core modules
pub mod context;
pub mod error;
pub mod host;
pub mod matcher;
pub mod pipeline;
pub mod session;
pub mod site;
pub mod strategy;

// Re-export key types at crate root

// Errors
pub use error::HttpError;

// Host APIs
pub use host::http::HttpClient;
pub use session::Session;
pub use site::{DEFAULT_BASE_URL, Endpoints};

// Strategy & Pipeline
pub use context::{ExtractContext, FetchSettings};
pub use matcher::{BoundaryMatcher, LabelMatcher, SubstringMatcher};
pub use pipeline::{ExtractAttempt, ExtractOutcome, ExtractPipeline};
pub use strategy::{ExtractKind, ExtractStrategy, StrategyInfo};
