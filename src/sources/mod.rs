//! Literature sources.
//!
//! A [`Source`] answers two questions: which identifiers match a query, and
//! what is the raw record payload for one identifier. [`PubMedSource`] talks
//! to NCBI E-utilities; [`MockSource`] serves canned payloads for tests.

mod mock;
mod pubmed;

pub use mock::MockSource;
pub use pubmed::PubMedSource;

use crate::models::SearchQuery;
use async_trait::async_trait;

/// Interface for a searchable bibliographic database.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "pubmed")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search for identifiers matching the query, in the order the source ranks them.
    ///
    /// Returns at most `query.max_results` non-empty identifiers.
    async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, SourceError>;

    /// Fetch the raw record payload for a single identifier
    async fn fetch_details(&self, id: &str) -> Result<String, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Transport failure or non-success HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// Response body not in the expected format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err: SourceError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
