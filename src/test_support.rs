//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::state::App;
use crate::places::{
    DetailEnvelope, PageToken, RestaurantSource, RestaurantSummary, SearchPage, SourceError,
};

/// A source that never has anything, for tests that don't need real API calls.
pub struct NoopSource;

#[async_trait]
impl RestaurantSource for NoopSource {
    fn name(&self) -> &str {
        "noop"
    }

    async fn search(&self, _token: Option<&PageToken>) -> Result<SearchPage, SourceError> {
        Ok(SearchPage {
            results: Vec::new(),
            next_page_token: None,
        })
    }

    async fn detail(&self, _place_id: &str) -> Result<DetailEnvelope, SourceError> {
        Ok(DetailEnvelope {
            result: None,
            status: Some("NOT_FOUND".to_string()),
            error_message: None,
        })
    }
}

/// Creates a test App with a NoopSource and an 80-column viewport.
pub fn test_app() -> App {
    App::new(Arc::new(NoopSource), 80)
}

/// A restaurant whose name is derived from its id.
pub fn summary(place_id: &str) -> RestaurantSummary {
    RestaurantSummary {
        place_id: place_id.to_string(),
        name: format!("Restaurante {place_id}"),
        rating: 4.2,
        price_level: Some(2),
        types: vec!["restaurant".to_string()],
        formatted_address: "Rua das Laranjeiras, 10".to_string(),
        photos: Vec::new(),
        user_ratings_total: 128,
    }
}
