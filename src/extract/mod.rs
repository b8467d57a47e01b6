//! Field extraction from raw PubMed XML payloads.
//!
//! Extraction is a flat pattern scan over the text: tag nesting is never
//! validated and every field is matched independently, so partial or
//! malformed markup still yields a record. Absent fields fall back to the
//! sentinels in [`crate::models`].

use quick_xml::escape::unescape;
use regex::Regex;

use crate::models::{Record, RecordBuilder, EMAIL_NOT_FOUND, TITLE_NOT_AVAILABLE, UNKNOWN};
use crate::sources::SourceError;

/// Compiled patterns for the fields we pull out of a record.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    title: Regex,
    year: Regex,
    month: Regex,
    day: Regex,
    author: Regex,
    affiliation: Regex,
    email: Regex,
    last_name: Regex,
    fore_name: Regex,
    initials: Regex,
    collective_name: Regex,
    inner_tag: Regex,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            title: element("ArticleTitle"),
            year: pattern(r"<Year>(\d{4})</Year>"),
            month: pattern(r"<Month>([A-Za-z]+|\d{1,2})</Month>"),
            day: pattern(r"<Day>(\d{1,2})</Day>"),
            author: element("Author"),
            affiliation: element("Affiliation"),
            email: pattern(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
            last_name: element("LastName"),
            fore_name: element("ForeName"),
            initials: element("Initials"),
            collective_name: element("CollectiveName"),
            inner_tag: pattern(r"<[^>]+>"),
        }
    }

    /// Build a record from one payload.
    ///
    /// Only a blank payload is an error; any missing field degrades to its sentinel.
    pub fn extract(&self, id: &str, payload: &str) -> Result<Record, SourceError> {
        if payload.trim().is_empty() {
            return Err(SourceError::Parse(format!("Empty payload for record {}", id)));
        }

        let title = self
            .title
            .captures(payload)
            .map(|caps| self.clean_text(&caps[1]))
            .unwrap_or_else(|| TITLE_NOT_AVAILABLE.to_string());

        let email = self
            .email
            .find(payload)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| EMAIL_NOT_FOUND.to_string());

        Ok(RecordBuilder::new(id)
            .title(title)
            .publication_date(self.publication_date(payload))
            .authors(self.authors(payload))
            .affiliations(self.affiliations(payload))
            .corresponding_email(email)
            .build())
    }

    /// First year, month and day tags in the payload, composed with [`compose_date`]
    pub fn publication_date(&self, payload: &str) -> String {
        let year = first_capture(&self.year, payload);
        let month = first_capture(&self.month, payload);
        let day = first_capture(&self.day, payload);

        compose_date(year, month, day)
    }

    /// Every author element, in document order
    pub fn authors(&self, payload: &str) -> Vec<String> {
        self.author
            .captures_iter(payload)
            .map(|caps| self.author_name(&caps[1]))
            .collect()
    }

    /// Every affiliation element, in document order
    pub fn affiliations(&self, payload: &str) -> Vec<String> {
        self.affiliation
            .captures_iter(payload)
            .map(|caps| self.clean_text(&caps[1]))
            .collect()
    }

    fn author_name(&self, content: &str) -> String {
        if let Some(collective) = first_capture(&self.collective_name, content) {
            return self.clean_text(collective);
        }

        let last = first_capture(&self.last_name, content);
        let first = first_capture(&self.fore_name, content)
            .or_else(|| first_capture(&self.initials, content));

        match (first, last) {
            (Some(first), Some(last)) => self.clean_text(&format!("{} {}", first, last)),
            (None, Some(last)) => self.clean_text(last),
            _ => self.clean_text(content),
        }
    }

    /// Strip inner tags, collapse whitespace and resolve XML entities
    fn clean_text(&self, raw: &str) -> String {
        let stripped = self.inner_tag.replace_all(raw, " ");
        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

        match unescape(&collapsed) {
            Ok(text) => text.into_owned(),
            Err(_) => collapsed,
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose a partial date.
///
/// `year-month-day` when a day is present, `year-month` when only a month is,
/// otherwise the year alone. A missing year or month inside a composition is
/// rendered as `"Unknown"`.
pub fn compose_date(year: Option<&str>, month: Option<&str>, day: Option<&str>) -> String {
    let year = year.unwrap_or(UNKNOWN);

    match (month, day) {
        (month, Some(day)) => format!("{}-{}-{}", year, month.unwrap_or(UNKNOWN), day),
        (Some(month), None) => format!("{}-{}", year, month),
        (None, None) => year.to_string(),
    }
}

fn first_capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Pattern for an element that may carry attributes and span lines
fn element(tag: &str) -> Regex {
    pattern(&format!(r"(?s)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>"))
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("extraction patterns are valid")
}
