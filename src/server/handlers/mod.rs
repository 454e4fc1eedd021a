//! HTTP handlers for the server.

pub mod devices;
pub mod drawer;
pub mod thermal;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;

use crate::error::TillrollError;

/// A [`TillrollError`] rendered as `{"success": false, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub TillrollError);

impl From<TillrollError> for ApiError {
    fn from(e: TillrollError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            TillrollError::InvalidDocument(_)
            | TillrollError::InvalidCommand(_)
            | TillrollError::LengthExceeded { .. }
            | TillrollError::Json(_) => StatusCode::BAD_REQUEST,
            TillrollError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
            TillrollError::Connection(_) | TillrollError::NotConnected => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            TillrollError::TransferFailed { .. } | TillrollError::Aborted { .. } => {
                StatusCode::BAD_GATEWAY
            }
            TillrollError::Transport(_) | TillrollError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self.0, "request failed");
        (
            status,
            Json(json!({ "success": false, "message": self.0.to_string() })),
        )
            .into_response()
    }
}
