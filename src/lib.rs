//! # Paper Fetcher
//!
//! Searches PubMed, extracts bibliographic fields from the returned records and
//! flags authors whose affiliation looks like a pharmaceutical or biotech company.
//!
//! ## Architecture
//!
//! - [`sources`]: search and detail clients behind the [`Source`] trait
//! - [`extract`]: pattern-based field extraction from record XML
//! - [`classify`]: industry affiliation classifier
//! - [`pipeline`]: sequential search → fetch → extract → classify run
//! - [`output`]: CSV and console sinks
//! - [`models`]: records, classifications and output rows
//! - [`config`]: configuration management
//! - [`utils`]: HTTP client

pub mod classify;
pub mod config;
pub mod extract;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{PaperRow, Record, SearchQuery};
pub use pipeline::PaperFetcher;
pub use sources::{Source, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
