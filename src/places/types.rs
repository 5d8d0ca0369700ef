use serde::{Deserialize, Serialize};

/// Number of slots on the price scale. Matches the highest tier the places API issues.
pub const PRICE_SLOTS: u8 = 4;

/// Opaque continuation cursor issued by the places API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct PageToken(pub String);

impl PageToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A reference to one photo held by the places API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Photo {
    pub photo_reference: String,
}

/// One restaurant as returned by the text search.
///
/// Field names follow the upstream JSON so the proxy can re-emit them unchanged.
/// Deserialization is lenient: the places API omits fields it has no data for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RestaurantSummary {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub user_ratings_total: u32,
}

impl RestaurantSummary {
    pub fn price_indicator(&self) -> PriceIndicator {
        PriceIndicator::from_level(self.price_level)
    }
}

/// One user review on the detail page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub profile_photo_url: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub relative_time_description: String,
    #[serde(default)]
    pub text: String,
}

/// Full place details. The detail endpoint carries no `place_id` in its result
/// unless asked for, so it is optional here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RestaurantDetail {
    #[serde(default)]
    pub place_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub user_ratings_total: u32,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl RestaurantDetail {
    pub fn price_indicator(&self) -> PriceIndicator {
        PriceIndicator::from_level(self.price_level)
    }
}

/// Body of `GET /api/restaurants`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub results: Vec<RestaurantSummary>,
    pub next_page_token: Option<PageToken>,
}

/// The upstream detail envelope, forwarded verbatim by the proxy.
///
/// `status` is the places API's own verdict (`"OK"`, `"NOT_FOUND"`, ...);
/// `result` is absent unless the lookup succeeded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetailEnvelope {
    #[serde(default)]
    pub result: Option<RestaurantDetail>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl DetailEnvelope {
    pub fn into_detail(self) -> Option<RestaurantDetail> {
        self.result
    }
}

/// How a price tier should be drawn.
///
/// An absent tier is its own state, never folded into tier zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceIndicator {
    NotIdentified,
    Scale { filled: u8, empty: u8 },
}

impl PriceIndicator {
    pub fn from_level(level: Option<u8>) -> Self {
        match level {
            None => PriceIndicator::NotIdentified,
            Some(level) => {
                let filled = level.min(PRICE_SLOTS);
                PriceIndicator::Scale {
                    filled,
                    empty: PRICE_SLOTS - filled,
                }
            }
        }
    }
}
