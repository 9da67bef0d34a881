use thiserror::Error;

/// Errors raised by the threat-intelligence store and feed importer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("threat-intel store I/O error: {0}")]
    Io(#[from] rusqlite::Error),

    #[error("feed download failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("feed parse error: {0}")]
    FeedParse(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
