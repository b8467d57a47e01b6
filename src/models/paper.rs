//! Paper record and output row models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Placeholder for a missing title
pub const TITLE_NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing date component, author or affiliation
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for an empty author or company list in output rows
pub const NONE: &str = "None";

/// Placeholder for a missing corresponding email
pub const EMAIL_NOT_FOUND: &str = "Not found";

/// A bibliographic record extracted from one PubMed payload.
///
/// Records are built once by the field extractor and never mutated afterwards,
/// so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    id: String,
    title: String,
    publication_date: String,
    authors: Vec<String>,
    affiliations: Vec<String>,
    corresponding_email: String,
}

impl Record {
    /// PubMed identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Article title, or `"N/A"`
    pub fn title(&self) -> &str {
        &self.title
    }

    /// `year`, `year-month` or `year-month-day`
    pub fn publication_date(&self) -> &str {
        &self.publication_date
    }

    /// Authors in document order
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Affiliations in document order
    pub fn affiliations(&self) -> &[String] {
        &self.affiliations
    }

    /// First email address in the payload, or `"Not found"`
    pub fn corresponding_email(&self) -> &str {
        &self.corresponding_email
    }

    /// Pair every author with the affiliation at the same position.
    ///
    /// The pairing is positional, not semantic: surplus affiliations are dropped
    /// and authors without a counterpart get `"Unknown"`.
    pub fn author_affiliations(&self) -> Vec<(&str, &str)> {
        self.authors
            .iter()
            .enumerate()
            .map(|(i, author)| {
                let affiliation = self.affiliations.get(i).map(String::as_str).unwrap_or(UNKNOWN);
                (author.as_str(), affiliation)
            })
            .collect()
    }
}

/// Builder for constructing Record objects
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Create a builder with every field set to its sentinel
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            record: Record {
                id: id.into(),
                title: TITLE_NOT_AVAILABLE.to_string(),
                publication_date: UNKNOWN.to_string(),
                authors: Vec::new(),
                affiliations: Vec::new(),
                corresponding_email: EMAIL_NOT_FOUND.to_string(),
            },
        }
    }

    /// Set title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = title.into();
        self
    }

    /// Set publication date
    pub fn publication_date(mut self, date: impl Into<String>) -> Self {
        self.record.publication_date = date.into();
        self
    }

    /// Set authors
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.record.authors = authors;
        self
    }

    /// Set affiliations
    pub fn affiliations(mut self, affiliations: Vec<String>) -> Self {
        self.record.affiliations = affiliations;
        self
    }

    /// Set corresponding email
    pub fn corresponding_email(mut self, email: impl Into<String>) -> Self {
        self.record.corresponding_email = email.into();
        self
    }

    /// Build the Record
    pub fn build(self) -> Record {
        self.record
    }
}

/// Authors and companies flagged as non-academic for one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Authors whose affiliation matched an industry indicator, in affiliation order
    pub non_academic_authors: Vec<String>,

    /// Matching affiliations, deduplicated and sorted
    pub companies: BTreeSet<String>,
}

impl Classification {
    /// Whether nothing was flagged
    pub fn is_empty(&self) -> bool {
        self.non_academic_authors.is_empty() && self.companies.is_empty()
    }
}

/// One output row with the fixed six-column layout.
///
/// Serde renames give the CSV header names; field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRow {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Publication Date")]
    pub publication_date: String,

    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,

    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,

    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

impl PaperRow {
    /// Column names in output order
    pub const HEADERS: [&'static str; 6] = [
        "PubmedID",
        "Title",
        "Publication Date",
        "Non-academic Author(s)",
        "Company Affiliation(s)",
        "Corresponding Author Email",
    ];

    /// Combine a record with its classification
    pub fn new(record: &Record, classification: &Classification) -> Self {
        Self {
            pubmed_id: record.id().to_string(),
            title: record.title().to_string(),
            publication_date: record.publication_date().to_string(),
            non_academic_authors: join_or_none(classification.non_academic_authors.iter()),
            company_affiliations: join_or_none(classification.companies.iter()),
            corresponding_email: record.corresponding_email().to_string(),
        }
    }

    /// Cell values in column order
    pub fn values(&self) -> [&str; 6] {
        [
            self.pubmed_id.as_str(),
            self.title.as_str(),
            self.publication_date.as_str(),
            self.non_academic_authors.as_str(),
            self.company_affiliations.as_str(),
            self.corresponding_email.as_str(),
        ]
    }
}

impl fmt::Display for PaperRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in Self::HEADERS.iter().zip(self.values()) {
            if !first {
                write!(f, " | ")?;
            }
            write!(f, "{}: {}", name, value)?;
            first = false;
        }
        Ok(())
    }
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a String>) -> String {
    let items: Vec<&str> = items.map(String::as_str).collect();
    if items.is_empty() {
        NONE.to_string()
    } else {
        items.join(", ")
    }
}
