//! Attached printer listing.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use super::ApiError;
use super::super::state::AppState;
use crate::error::TillrollError;
use crate::transport::UsbPrinter;

/// Handle GET /api/devices - list allowed USB printers.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let usb = state.config.usb.clone();
    let devices = tokio::task::spawn_blocking(move || UsbPrinter::new(usb)?.list_printers())
        .await
        .map_err(|e| TillrollError::Transport(e.to_string()))??;

    Ok(Json(json!({ "success": true, "devices": devices })))
}
