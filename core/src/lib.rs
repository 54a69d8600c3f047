pub mod cache;
pub mod clean;
pub mod error;

pub use error::{CacheError, ConfigError, FetchError};

use serde::Serialize;
use std::collections::HashMap;

/// token -> occurrence count. This is the contract handed to rendering.
pub type WordFrequencyTable = HashMap<String, u32>;

/// The two corpora the pipeline builds independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusKind {
    Keywords,
    Descriptions,
}

impl CorpusKind {
    pub const ALL: [CorpusKind; 2] = [CorpusKind::Keywords, CorpusKind::Descriptions];

    pub fn as_str(&self) -> &'static str {
        match self {
            CorpusKind::Keywords => "keywords",
            CorpusKind::Descriptions => "descriptions",
        }
    }

    /// Cache file name under the cache root.
    pub fn cache_file(&self) -> &'static str {
        match self {
            CorpusKind::Keywords => "keywords.txt",
            CorpusKind::Descriptions => "descriptions.txt",
        }
    }
}

/// Where a corpus came from in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusSource {
    Scraped,
    Cached,
}

/// Aggregated page text for one corpus. Immutable once built or loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub raw_text: String,
    /// Number of successful pages folded in. Not recoverable from cache,
    /// so a cache-loaded corpus carries None.
    pub page_count: Option<u32>,
}

/// One person discovered on an index page. Unique by URL within a crawl.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacultyLink {
    pub name: String,
    pub url: String,
}

/// Outcome of fetching one page. Failures are recorded, never fatal.
#[derive(Debug)]
pub struct ScrapeResult {
    pub url: String,
    pub body: Result<String, FetchError>,
}
