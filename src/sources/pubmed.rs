//! PubMed research source implementation using E-utilities API.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::PubMedConfig;
use crate::models::SearchQuery;
use crate::sources::{Source, SourceError};
use crate::utils::HttpClient;

/// PubMed research source
///
/// Uses `esearch` (JSON) to turn a query into PMIDs and `efetch` (XML) to
/// retrieve one record at a time.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    config: PubMedConfig,
}

impl PubMedSource {
    /// Create a new PubMed source
    pub fn new(config: PubMedConfig) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::new(&config)?),
            config,
        })
    }

    /// Create with a custom HTTP client
    pub fn with_client(client: Arc<HttpClient>, config: PubMedConfig) -> Self {
        Self { client, config }
    }

    /// Build E-utilities search URL
    fn build_search_url(&self, query: &SearchQuery) -> String {
        let params = [
            ("db", self.config.database.clone()),
            ("term", query.query.clone()),
            ("retmode", "json".to_string()),
            ("retmax", query.max_results.to_string()),
        ];

        format!("{}?{}", self.config.search_url, encode_params(&params))
    }

    /// Build E-utilities fetch URL for a single PubMed ID
    fn build_fetch_url(&self, id: &str) -> String {
        let params = [
            ("db", self.config.database.clone()),
            ("id", id.to_string()),
            ("retmode", "xml".to_string()),
        ];

        format!("{}?{}", self.config.fetch_url, encode_params(&params))
    }

    /// Parse E-utilities search response JSON
    fn parse_search_response(body: &str, max_results: usize) -> Result<Vec<String>, SourceError> {
        #[derive(Debug, Deserialize)]
        struct ESearchResponse {
            #[serde(default)]
            esearchresult: Option<ESearchResult>,
        }

        #[derive(Debug, Deserialize)]
        struct ESearchResult {
            #[serde(default)]
            idlist: Vec<String>,
            #[serde(rename = "ERROR", default)]
            error: Option<String>,
        }

        let response: ESearchResponse = serde_json::from_str(body).map_err(|e| {
            SourceError::Parse(format!("Failed to parse PubMed search JSON: {}", e))
        })?;

        let Some(result) = response.esearchresult else {
            return Ok(Vec::new());
        };

        if let Some(error) = result.error.as_deref() {
            tracing::warn!("PubMed search reported an error: {}", error);
        }

        Ok(result
            .idlist
            .into_iter()
            .filter(|id| !id.trim().is_empty())
            .take(max_results)
            .collect())
    }

    async fn get_text(&self, url: &str, action: &str) -> Result<String, SourceError> {
        tracing::debug!(url, "PubMed request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to {}: {}", action, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Network(format!(
                "PubMed API returned status: {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))
    }
}

fn encode_params(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl Source for PubMedSource {
    fn id(&self) -> &str {
        "pubmed"
    }

    fn name(&self) -> &str {
        "PubMed"
    }

    async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, SourceError> {
        if query.query.trim().is_empty() {
            return Err(SourceError::InvalidRequest("query must not be empty".to_string()));
        }
        if query.max_results == 0 {
            return Err(SourceError::InvalidRequest(
                "max_results must be positive".to_string(),
            ));
        }

        let url = self.build_search_url(query);
        let body = self.get_text(&url, "search PubMed").await?;
        let ids = Self::parse_search_response(&body, query.max_results)?;

        tracing::debug!(count = ids.len(), query = %query.query, "PubMed search finished");
        Ok(ids)
    }

    async fn fetch_details(&self, id: &str) -> Result<String, SourceError> {
        let url = self.build_fetch_url(id);
        self.get_text(&url, "fetch PubMed details").await
    }
}
