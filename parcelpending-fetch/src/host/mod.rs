//! Host APIs for talking to the target site.
//!
//! - [`http`] - Cookie-bearing HTTP client with tracing

pub mod http;

pub use http::HttpClient;
