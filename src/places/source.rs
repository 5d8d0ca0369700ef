use std::fmt;

use async_trait::async_trait;

use super::types::{DetailEnvelope, PageToken, SearchPage};

/// Errors a restaurant source can report to the front-end.
#[derive(Debug)]
pub enum SourceError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The proxy answered with a non-success status.
    Api { status: u16, message: String },
    /// The body could not be decoded.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Where the front-end gets restaurants from.
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Fetches one page of the restaurant search, continuing from `token` when given.
    async fn search(&self, token: Option<&PageToken>) -> Result<SearchPage, SourceError>;

    /// Fetches the detail envelope for one place.
    async fn detail(&self, place_id: &str) -> Result<DetailEnvelope, SourceError>;
}
