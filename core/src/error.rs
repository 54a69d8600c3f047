use std::path::PathBuf;
use thiserror::Error;

/// Per-page fetch failure. Recoverable: callers skip the page and count it.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("empty body")]
    EmptyBody,
}

/// Cache I/O failure. Recoverable: reads fall back to scraping, writes are
/// logged and skipped.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io: {0}")]
    Io(#[from] std::io::Error),
}

/// Startup configuration failure. Fatal, checked before any network I/O.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("removed-words file not found: {0}")]
    RemovedWordsMissing(PathBuf),
    #[error("removed-words file unreadable: {path}: {source}")]
    RemovedWordsUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}
