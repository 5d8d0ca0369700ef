//! Restaurant source backed by Mesa's own proxy (`mesa serve`).

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use serde::Deserialize;

use crate::places::{DetailEnvelope, PageToken, RestaurantSource, SearchPage, SourceError};

/// Error body the proxy sends alongside 4xx/5xx statuses.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: serde_json::Value,
}

pub struct ProxyClient {
    base_url: String,
    client: reqwest::Client,
}

impl ProxyClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Proxy URL with each of `segments` appended as one encoded path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::Network(format!("invalid proxy URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::Network(format!("invalid proxy URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Public photo URL for a reference, served as a redirect by the proxy.
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        match self.endpoint(&["api", "photo", photo_reference]) {
            Ok(mut url) => {
                url.query_pairs_mut()
                    .append_pair("maxwidth", &max_width.to_string());
                url.to_string()
            }
            Err(e) => {
                warn!("Cannot build photo URL: {}", e);
                String::new()
            }
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SourceError> {
        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Proxy response status: {}", status);

        if !status.is_success() {
            let status = status.as_u16();
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => match body.error {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                },
                Err(_) => "unknown error".to_string(),
            };
            warn!("Proxy error: {} - {}", status, message);
            return Err(SourceError::Api { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RestaurantSource for ProxyClient {
    fn name(&self) -> &str {
        "proxy"
    }

    async fn search(&self, token: Option<&PageToken>) -> Result<SearchPage, SourceError> {
        info!("Fetching restaurants (continuation={})", token.is_some());
        let mut request = self.client.get(self.endpoint(&["api", "restaurants"])?);
        if let Some(token) = token {
            request = request.query(&[("pagetoken", token.as_str())]);
        }
        self.get(request).await
    }

    async fn detail(&self, place_id: &str) -> Result<DetailEnvelope, SourceError> {
        info!("Fetching restaurant detail: {}", place_id);
        let request = self.client.get(self.endpoint(&["api", "restaurant", place_id])?);
        self.get(request).await
    }
}
