//! Receipt rendering and direct printing.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use super::ApiError;
use super::super::state::AppState;
use crate::receipt::{
    OutputFormat, RawEnvelope, ReceiptDocument, ReceiptRequest, attachment_filename, compose,
};
use crate::transport::UsbPrinter;

#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

fn document(state: &AppState, request: ReceiptRequest) -> Result<ReceiptDocument, ApiError> {
    Ok(request.into_document(Some(&state.config.settings))?)
}

/// Handle POST /api/thermal/render - encode a receipt.
pub async fn render(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RenderQuery>,
    Json(request): Json<ReceiptRequest>,
) -> Result<Response, ApiError> {
    let doc = document(&state, request)?;
    let bytes = compose(&doc).to_bytes();
    info!(
        transaction = %doc.transaction_id,
        bytes = bytes.len(),
        format = ?query.format,
        "receipt rendered"
    );

    let response = match query.format {
        OutputFormat::Escpos => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                attachment_filename(&doc.transaction_id)
            );
            (
                [
                    (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        OutputFormat::Raw => Json(RawEnvelope::new(doc.transaction_id, &bytes)).into_response(),
    };
    Ok(response)
}

/// Handle POST /api/thermal/print - print on the attached USB printer.
pub async fn print(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReceiptRequest>,
) -> Result<Response, ApiError> {
    let doc = document(&state, request)?;
    let program = compose(&doc);

    let _guard = state.printer_lock.lock().await;
    let mut printer = UsbPrinter::new(state.config.usb.clone())?;
    let report = printer.print(&program).await?;

    info!(
        transaction = %doc.transaction_id,
        commands = report.commands,
        "receipt printed"
    );
    Ok(Json(json!({
        "success": true,
        "message": format!("Receipt {} printed", doc.transaction_id),
        "device": report.product,
        "manufacturer": report.manufacturer,
        "commands": report.commands,
    }))
    .into_response())
}
