//! HTTP client utilities.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::PubMedConfig;
use crate::sources::SourceError;

/// Shared HTTP client carrying the fixed client-identifying header
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a client from the PubMed endpoint settings
    pub fn new(config: &PubMedConfig) -> Result<Self, SourceError> {
        Self::with_user_agent(&config.user_agent, config.timeout_secs.map(Duration::from_secs))
    }

    /// Create a client with a custom user agent and optional request timeout
    pub fn with_user_agent(user_agent: &str, timeout: Option<Duration>) -> Result<Self, SourceError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| SourceError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Start a GET request
    pub fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url)
    }
}
