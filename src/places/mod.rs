pub mod providers;
pub mod source;
pub mod types;

pub use providers::{GooglePlaces, ProxyClient, UpstreamError};
pub use source::{RestaurantSource, SourceError};
pub use types::{
    DetailEnvelope, PageToken, Photo, PriceIndicator, RestaurantDetail, RestaurantSummary, Review,
    SearchPage,
};
