//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::SearchQuery;
use crate::sources::{Source, SourceError};

/// A mock source that returns predefined identifiers and payloads.
///
/// Every `fetch_details` call is recorded so tests can assert call order.
#[derive(Debug, Default)]
pub struct MockSource {
    ids: Vec<String>,
    payloads: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl MockSource {
    /// Create a new mock source with no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identifier returned by search together with its payload.
    pub fn with_record(mut self, id: impl Into<String>, payload: impl Into<String>) -> Self {
        let id = id.into();
        self.payloads.insert(id.clone(), payload.into());
        self.ids.push(id);
        self
    }

    /// Add an identifier returned by search that has no payload, so fetching it fails.
    pub fn with_missing_record(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    /// Identifiers fetched so far, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, SourceError> {
        Ok(self.ids.iter().take(query.max_results).cloned().collect())
    }

    async fn fetch_details(&self, id: &str) -> Result<String, SourceError> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(id.to_string());
        }

        self.payloads
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::Network(format!("mock has no record {}", id)))
    }
}
