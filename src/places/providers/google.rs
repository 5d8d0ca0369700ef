//! Client for the upstream places API (text search, details, photo).
//!
//! Only the proxy server talks to this API; it is the one place the API key lives.
//! The key is sent as-is, including when it is missing: the upstream answers
//! with its own `REQUEST_DENIED` envelope in that case, which surfaces as
//! [`UpstreamError::Rejected`].

use std::fmt;

use log::{debug, info, warn};
use reqwest::Url;
use serde::Deserialize;

use crate::places::types::{PageToken, RestaurantSummary, SearchPage};

/// Errors from a call to the upstream places API.
#[derive(Debug)]
pub enum UpstreamError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The upstream answered with a non-success HTTP status.
    Status(u16),
    /// The upstream body was not the JSON we expected.
    Parse(String),
    /// HTTP 200 with an envelope status other than `OK`/`ZERO_RESULTS`
    /// (`REQUEST_DENIED`, `INVALID_REQUEST`, `OVER_QUERY_LIMIT`, ...).
    Rejected(String),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Network(msg) => write!(f, "upstream network error: {msg}"),
            UpstreamError::Status(status) => write!(f, "upstream returned HTTP {status}"),
            UpstreamError::Parse(msg) => write!(f, "upstream parse error: {msg}"),
            UpstreamError::Rejected(status) => write!(f, "upstream rejected request: {status}"),
        }
    }
}

impl std::error::Error for UpstreamError {}

/// Raw text search body. Everything the proxy does not re-emit is dropped here.
#[derive(Deserialize, Debug)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Decodes each result on its own so one malformed entry does not fail the page.
fn summaries(raw: Vec<serde_json::Value>) -> Vec<RestaurantSummary> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("Dropping malformed search result: {}", e);
                None
            }
        })
        .collect()
}

/// The listing always searches for this.
pub const SEARCH_QUERY: &str = "restaurant";

pub struct GooglePlaces {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GooglePlaces {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    /// Runs the fixed-query text search, continuing from `token` when given.
    pub async fn text_search(&self, token: Option<&str>) -> Result<SearchPage, UpstreamError> {
        let mut params = vec![("query", SEARCH_QUERY), ("key", self.key())];
        if let Some(token) = token {
            params.push(("pagetoken", token));
        }

        info!(
            "Upstream text search: query={}, continuation={}",
            SEARCH_QUERY,
            token.is_some()
        );

        let response = self
            .client
            .get(format!("{}/textsearch/json", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Upstream text search failed with HTTP {}", status);
            return Err(UpstreamError::Status(status));
        }

        let body: TextSearchResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        match body.status.as_deref() {
            Some("OK") | Some("ZERO_RESULTS") | None => {}
            Some(other) => {
                warn!("Upstream text search status: {}", other);
                return Err(UpstreamError::Rejected(other.to_string()));
            }
        }

        let results = summaries(body.results);
        debug!(
            "Upstream text search returned {} results, next token: {}",
            results.len(),
            body.next_page_token.is_some()
        );

        Ok(SearchPage {
            results,
            next_page_token: body.next_page_token.map(PageToken),
        })
    }

    /// Looks up one place and returns the upstream body untouched.
    pub async fn details(&self, place_id: &str) -> Result<serde_json::Value, UpstreamError> {
        info!("Upstream details lookup: place_id={}", place_id);

        let response = self
            .client
            .get(format!("{}/details/json", self.base_url))
            .query(&[("place_id", place_id), ("key", self.key())])
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Upstream details failed with HTTP {}", status);
            return Err(UpstreamError::Status(status));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))
    }

    /// Builds the keyed upstream URL for one photo.
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> Result<Url, UpstreamError> {
        let max_width = max_width.to_string();
        Url::parse_with_params(
            &format!("{}/photo", self.base_url),
            &[
                ("maxwidth", max_width.as_str()),
                ("photoreference", photo_reference),
                ("key", self.key()),
            ],
        )
        .map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}
