use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Redirect,
};
use log::info;
use serde::Deserialize;

use super::{ProxyState, error::ProxyError};
use crate::places::SearchPage;

/// Width requested from the photo endpoint when the client gives none.
pub const DEFAULT_PHOTO_WIDTH: u32 = 400;

#[derive(Deserialize)]
pub struct SearchParams {
    pagetoken: Option<String>,
}

#[derive(Deserialize)]
pub struct PhotoParams {
    maxwidth: Option<u32>,
}

/// `GET /api/restaurants?pagetoken=...`
pub async fn restaurants_handler(
    State(state): State<Arc<ProxyState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchPage>, ProxyError> {
    let token = params.pagetoken.as_deref().filter(|t| !t.is_empty());
    info!("GET /api/restaurants (continuation={})", token.is_some());

    let page = state
        .places
        .text_search(token)
        .await
        .map_err(ProxyError::Search)?;

    Ok(Json(page))
}

/// `GET /api/restaurant/{place_id}`: the upstream body goes back untouched.
pub async fn restaurant_handler(
    State(state): State<Arc<ProxyState>>,
    Path(place_id): Path<String>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let place_id = place_id.trim();
    if place_id.is_empty() {
        return Err(ProxyError::MissingPlaceId);
    }
    info!("GET /api/restaurant/{}", place_id);

    let body = state
        .places
        .details(place_id)
        .await
        .map_err(ProxyError::Detail)?;

    Ok(Json(body))
}

/// `GET /api/restaurant` with no id at all.
pub async fn missing_place_handler() -> ProxyError {
    ProxyError::MissingPlaceId
}

/// `GET /api/photo/{reference}?maxwidth=...`: redirects to the keyed upstream URL.
pub async fn photo_handler(
    State(state): State<Arc<ProxyState>>,
    Path(reference): Path<String>,
    Query(params): Query<PhotoParams>,
) -> Result<Redirect, ProxyError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(ProxyError::MissingPhotoReference);
    }

    let url = state
        .places
        .photo_url(reference, params.maxwidth.unwrap_or(DEFAULT_PHOTO_WIDTH))
        .map_err(ProxyError::Photo)?;

    Ok(Redirect::temporary(url.as_str()))
}
