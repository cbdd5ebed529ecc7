//! HTTP error mapping

use crate::export::ExportError;
use crate::state::StateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<StateError> for ApiError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::Validation(msg) => Self::Validation(msg),
            StateError::NotFound(msg) => Self::NotFound(msg),
            StateError::Store(msg) => Self::Internal(msg),
            StateError::Channel => Self::Internal("State manager unavailable".to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::EmptyCollection => Self::NotFound(e.to_string()),
            ExportError::State(inner) => inner.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_mapping() {
        let api: ApiError = StateError::NotFound("Solicitud not found: XYZ".to_string()).into();
        assert!(matches!(api, ApiError::NotFound(_)));

        let api: ApiError = StateError::Channel.into();
        assert!(matches!(api, ApiError::Internal(_)));
    }

    #[test]
    fn test_export_error_mapping() {
        let api: ApiError = ExportError::EmptyCollection.into();
        assert!(matches!(api, ApiError::NotFound(_)));
    }
}
