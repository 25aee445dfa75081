//! Error type shared by the scraping pipeline.
//!
//! Failures fall into three families:
//!
//! - **Configuration**: the base URL is missing or malformed, or the HTTP
//!   client could not be built. Fatal to the operation that triggered it.
//! - **Transport**: an unresolvable link, a network failure or a non-2xx
//!   response. Callers choose whether to propagate or skip (deep link
//!   collection skips, everything else propagates).
//! - **Parse**: a selector in a record spec is malformed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error fetching {uri}: {source}")]
    Transport {
        uri: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} fetching {uri}")]
    Status { uri: String, status: u16 },

    #[error("Invalid link `{uri}`: {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid field name `{0}`, expected `bucket.key`")]
    FieldName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScrapeError {
    /// True for failures raised while fetching a page.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ScrapeError::Transport { .. } | ScrapeError::Status { .. } | ScrapeError::InvalidUri { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
