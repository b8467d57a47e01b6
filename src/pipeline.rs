//! Search → fetch → extract → classify pipeline.

use std::sync::Arc;

use crate::classify::AffiliationClassifier;
use crate::config::Config;
use crate::extract::FieldExtractor;
use crate::models::{PaperRow, SearchQuery};
use crate::sources::{PubMedSource, Source, SourceError};

/// Runs a query against a source and turns every hit into an output row.
///
/// Records are fetched one at a time in the order the search returned them.
/// The first failure aborts the run.
#[derive(Debug, Clone)]
pub struct PaperFetcher {
    source: Arc<dyn Source>,
    extractor: FieldExtractor,
    classifier: AffiliationClassifier,
}

impl PaperFetcher {
    pub fn new(source: Arc<dyn Source>, classifier: AffiliationClassifier) -> Self {
        Self {
            source,
            extractor: FieldExtractor::new(),
            classifier,
        }
    }

    /// PubMed-backed fetcher built from configuration
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let source = PubMedSource::new(config.pubmed.clone())?;
        Ok(Self::new(
            Arc::new(source),
            AffiliationClassifier::new(&config.classifier),
        ))
    }

    pub async fn get_papers(&self, query: &SearchQuery) -> Result<Vec<PaperRow>, SourceError> {
        let ids = self.source.search_ids(query).await?;
        tracing::info!(
            source = self.source.name(),
            count = ids.len(),
            "Found {} paper(s) for query: {}",
            ids.len(),
            query.query
        );

        let mut rows = Vec::with_capacity(ids.len());
        for id in &ids {
            rows.push(self.fetch_row(id).await?);
        }

        Ok(rows)
    }

    async fn fetch_row(&self, id: &str) -> Result<PaperRow, SourceError> {
        let payload = self.source.fetch_details(id).await?;
        let record = self.extractor.extract(id, &payload)?;
        let classification = self
            .classifier
            .classify(record.authors(), record.affiliations());

        tracing::debug!(
            id,
            authors = record.authors().len(),
            affiliations = record.affiliations().len(),
            flagged = classification.non_academic_authors.len(),
            "Processed record"
        );

        Ok(PaperRow::new(&record, &classification))
    }
}
