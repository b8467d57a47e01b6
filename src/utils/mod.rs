//! Utility modules supporting the fetch pipeline.
//!
//! - [`HttpClient`]: reqwest client configured with the PubMed user agent and timeout

mod http;

pub use http::HttpClient;
