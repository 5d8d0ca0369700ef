use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::warn;
use serde_json::json;

use crate::places::UpstreamError;

/// Everything a proxy handler can fail with. Clients get a generic message;
/// the upstream cause only goes to the log.
#[derive(Debug)]
pub enum ProxyError {
    MissingPlaceId,
    MissingPhotoReference,
    Search(UpstreamError),
    Detail(UpstreamError),
    Photo(UpstreamError),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingPlaceId | ProxyError::MissingPhotoReference => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::Search(_) | ProxyError::Detail(_) | ProxyError::Photo(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::MissingPlaceId => write!(f, "Place ID não fornecido"),
            ProxyError::MissingPhotoReference => write!(f, "Referência da foto não fornecida"),
            ProxyError::Search(_) => write!(f, "Erro ao buscar restaurantes"),
            ProxyError::Detail(_) => write!(f, "Erro ao buscar os detalhes do restaurante"),
            ProxyError::Photo(_) => write!(f, "Erro ao buscar a foto"),
        }
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProxyError::Search(e) | ProxyError::Detail(e) | ProxyError::Photo(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ProxyError::Search(e) | ProxyError::Detail(e) | ProxyError::Photo(e) => {
                warn!("{}: {}", self, e);
            }
            _ => warn!("Rejected request: {}", self),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
