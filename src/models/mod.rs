//! Core data models for records, classifications and output rows.

mod paper;
mod search;

pub use paper::{
    Classification, PaperRow, Record, RecordBuilder, EMAIL_NOT_FOUND, NONE, TITLE_NOT_AVAILABLE,
    UNKNOWN,
};
pub use search::{SearchQuery, DEFAULT_MAX_RESULTS};
