pub mod google;
pub mod proxy;

pub use google::{GooglePlaces, UpstreamError};
pub use proxy::ProxyClient;
