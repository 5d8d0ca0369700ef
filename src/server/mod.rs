//! # Places Proxy
//!
//! The HTTP face of Mesa (`mesa serve`). Forwards to the upstream places API so
//! the API key never leaves the server, and reshapes the search response.
//!
//! | Route                              | Upstream                  |
//! |------------------------------------|---------------------------|
//! | `GET /api/restaurants?pagetoken=`  | text search               |
//! | `GET /api/restaurant/{place_id}`   | details (body verbatim)   |
//! | `GET /api/photo/{reference}`       | photo (307 redirect)      |
//!
//! No retries, no caching: a failed upstream call is a 500 for the caller.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use log::{info, warn};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod routes;

use crate::core::config::ResolvedConfig;
use crate::places::GooglePlaces;
use routes::{missing_place_handler, photo_handler, restaurant_handler, restaurants_handler};

pub struct ProxyState {
    pub places: GooglePlaces,
}

/// Builds the proxy routes around an upstream client.
pub fn router(places: GooglePlaces) -> Router {
    let state = Arc::new(ProxyState { places });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/restaurants", get(restaurants_handler))
        .route("/api/restaurant", get(missing_place_handler))
        .route("/api/restaurant/", get(missing_place_handler))
        .route("/api/restaurant/{place_id}", get(restaurant_handler))
        .route("/api/photo/{reference}", get(photo_handler))
        .layer(cors)
        .with_state(state)
}

/// Runs the proxy until Ctrl+C or SIGTERM.
pub async fn serve(config: &ResolvedConfig) -> std::io::Result<()> {
    if config.api_key.is_none() {
        warn!("No places API key configured; upstream calls will be rejected");
    }

    let places = GooglePlaces::new(config.places_base_url.clone(), config.api_key.clone());
    let app = router(places);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
