//! Industry affiliation classifier.

use crate::config::ClassifierConfig;
use crate::models::{Classification, UNKNOWN};

/// Flags authors whose affiliation contains an industry indicator.
///
/// Matching is case-sensitive literal containment. Authors and affiliations
/// are paired by position only, which is an approximation: PubMed lists
/// affiliations per author, so an author with several affiliations shifts
/// every later pairing.
#[derive(Debug, Clone)]
pub struct AffiliationClassifier {
    industry_keywords: Vec<String>,
    academic_markers: Vec<String>,
}

impl AffiliationClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            industry_keywords: config.industry_keywords.clone(),
            academic_markers: config.academic_markers.clone(),
        }
    }

    /// Whether the affiliation contains any industry indicator
    pub fn is_industry(&self, affiliation: &str) -> bool {
        self.industry_keywords
            .iter()
            .any(|keyword| affiliation.contains(keyword.as_str()))
    }

    /// Whether the affiliation contains an academic marker such as `.edu`.
    ///
    /// Informational only; classification never consults it.
    pub fn has_academic_marker(&self, affiliation: &str) -> bool {
        self.academic_markers
            .iter()
            .any(|marker| affiliation.contains(marker.as_str()))
    }

    pub fn classify(&self, authors: &[String], affiliations: &[String]) -> Classification {
        let mut classification = Classification::default();

        for (i, affiliation) in affiliations.iter().enumerate() {
            if !self.is_industry(affiliation) {
                continue;
            }

            let author = authors.get(i).map(String::as_str).unwrap_or(UNKNOWN);
            if self.has_academic_marker(affiliation) {
                tracing::debug!(author, affiliation = %affiliation, "industry affiliation also carries an academic marker");
            }

            classification.non_academic_authors.push(author.to_string());
            classification.companies.insert(affiliation.clone());
        }

        classification
    }
}

impl Default for AffiliationClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}
