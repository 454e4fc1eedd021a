//! Cash drawer kick.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use super::ApiError;
use super::super::state::AppState;
use crate::error::TillrollError;
use crate::ir::{Op, Program};
use crate::protocol::commands::{DEFAULT_PULSE_OFF_MS, DEFAULT_PULSE_ON_MS, DrawerPin};
use crate::transport::UsbPrinter;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DrawerRequest {
    /// 0 = connector pin 2, 1 = connector pin 5
    pub pin: u8,
    pub on_ms: u32,
    pub off_ms: u32,
}

impl Default for DrawerRequest {
    fn default() -> Self {
        Self {
            pin: 0,
            on_ms: DEFAULT_PULSE_ON_MS,
            off_ms: DEFAULT_PULSE_OFF_MS,
        }
    }
}

impl DrawerRequest {
    pub fn program(&self) -> Result<Program, TillrollError> {
        let pin = DrawerPin::from_index(self.pin)
            .ok_or_else(|| TillrollError::InvalidCommand(format!("drawer pin {}", self.pin)))?;
        let mut program = Program::with_init();
        program.push(Op::DrawerPulse {
            pin,
            on_ms: self.on_ms,
            off_ms: self.off_ms,
        });
        Ok(program)
    }
}

/// Handle POST /api/drawer/open - pulse the drawer kick connector.
pub async fn open(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DrawerRequest>,
) -> Result<Json<Value>, ApiError> {
    let program = request.program()?;

    let _guard = state.printer_lock.lock().await;
    let mut printer = UsbPrinter::new(state.config.usb.clone())?;
    printer.print(&program).await?;

    info!(pin = request.pin, "cash drawer opened");
    Ok(Json(json!({ "success": true, "message": "Cash drawer opened" })))
}
