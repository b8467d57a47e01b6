//! Configuration management.
//!
//! Settings come from an optional TOML file layered under environment
//! variables prefixed with `PAPER_FETCHER` (nested keys use `__`, e.g.
//! `PAPER_FETCHER_PUBMED__TIMEOUT_SECS=20`).
//!
//! ```toml
//! [pubmed]
//! user_agent = "PubMedPaperFetcher/1.0"
//! timeout_secs = 30
//!
//! [search]
//! max_results = 25
//!
//! [classifier]
//! industry_keywords = ["Inc", "Ltd", "Pharmaceutical", "Biotech", "Corp", "LLC"]
//! academic_markers = [".edu", ".ac.", ".gov"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::DEFAULT_MAX_RESULTS;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "paper-fetcher.toml";

const ENV_PREFIX: &str = "PAPER_FETCHER";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// PubMed E-utilities settings
    #[serde(default)]
    pub pubmed: PubMedConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Affiliation classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// PubMed E-utilities endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubMedConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,

    #[serde(default = "default_fetch_url")]
    pub fetch_url: String,

    #[serde(default = "default_database")]
    pub database: String,

    /// Sent as `User-Agent` on every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout; `None` leaves the transport default in place
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            fetch_url: default_fetch_url(),
            database: default_database(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

fn default_search_url() -> String {
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi".to_string()
}

fn default_fetch_url() -> String {
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi".to_string()
}

fn default_database() -> String {
    "pubmed".to_string()
}

fn default_user_agent() -> String {
    "PubMedPaperFetcher/1.0".to_string()
}

/// Search defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// Indicator lists used by the affiliation classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Case-sensitive substrings that mark an affiliation as industry
    #[serde(default = "default_industry_keywords")]
    pub industry_keywords: Vec<String>,

    /// Substrings typical of academic addresses. Not used to classify.
    #[serde(default = "default_academic_markers")]
    pub academic_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            industry_keywords: default_industry_keywords(),
            academic_markers: default_academic_markers(),
        }
    }
}

fn default_industry_keywords() -> Vec<String> {
    ["Inc", "Ltd", "Pharmaceutical", "Biotech", "Corp", "LLC"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_academic_markers() -> Vec<String> {
    [".edu", ".ac.", ".gov"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?
        .try_deserialize()
}

/// Get the configuration from environment variables and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment())
        .build()?
        .try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("paper-fetcher").join("config.toml"))
        .filter(|path| path.is_file())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
