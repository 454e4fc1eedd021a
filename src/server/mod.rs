//! # HTTP Server for Receipt Printing
//!
//! JSON API in front of the receipt composer and the USB printer.
//!
//! ## Usage
//!
//! ```bash
//! tillroll serve --listen 0.0.0.0:8080 --settings business.json
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | POST | `/api/thermal/render?format=escpos` | receipt request | ESC/POS attachment |
//! | POST | `/api/thermal/render?format=raw` | receipt request | base64 JSON envelope |
//! | POST | `/api/thermal/print` | receipt request | device and manufacturer |
//! | POST | `/api/drawer/open` | `{pin, on_ms, off_ms}` | status |
//! | GET | `/api/devices` | | attached allowed printers |

mod handlers;
mod state;

pub use handlers::ApiError;
pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::TillrollError;

/// Build the router. Exposed so it can be driven without a socket.
pub fn router(config: ServerConfig) -> Router {
    let app_state = Arc::new(AppState::new(config));

    Router::new()
        .route("/api/thermal/render", post(handlers::thermal::render))
        .route("/api/thermal/print", post(handlers::thermal::print))
        .route("/api/drawer/open", post(handlers::drawer::open))
        .route("/api/devices", get(handlers::devices::list))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use tillroll::server::{serve, ServerConfig};
/// use tillroll::receipt::BusinessSettings;
/// use tillroll::transport::UsbConfig;
///
/// # async fn example() -> Result<(), tillroll::TillrollError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     settings: BusinessSettings::default(),
///     usb: UsbConfig::default(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), TillrollError> {
    let listen_addr = config.listen_addr.clone();
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| TillrollError::Transport(format!("Failed to bind to {}: {}", listen_addr, e)))?;
    info!(addr = %listen_addr, "tillroll HTTP server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| TillrollError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::{BusinessSettings, RawEnvelope};
    use crate::transport::UsbConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    const REQUEST: &str = r#"{
        "transaction": {
            "id": 5, "created_at": "2024-01-15 14:30:00", "cashier_name": "alice",
            "section": "bar", "payment_method": "cash", "total": 15000
        },
        "items": [{ "item_name": "Coffee", "quantity": 2, "price": 3000, "total": 6000 }]
    }"#;

    fn app() -> Router {
        router(ServerConfig {
            listen_addr: "127.0.0.1:0".into(),
            settings: BusinessSettings::default(),
            usb: UsbConfig::default(),
        })
    }

    fn render_request(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_render_escpos_attachment() {
        let response = app()
            .oneshot(render_request("/api/thermal/render?format=escpos", REQUEST))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"receipt_5.bin\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(&[0x1B, 0x40]));
        assert!(body.ends_with(&[0x1D, 0x56, 0x00]));
    }

    #[tokio::test]
    async fn test_render_raw_envelope_matches_escpos() {
        let raw = app()
            .oneshot(render_request("/api/thermal/render?format=raw", REQUEST))
            .await
            .unwrap();
        assert_eq!(raw.status(), StatusCode::OK);
        let raw = to_bytes(raw.into_body(), usize::MAX).await.unwrap();
        let envelope: RawEnvelope = serde_json::from_slice(&raw).unwrap();
        assert_eq!(envelope.transaction_id.0, "5");

        let escpos = app()
            .oneshot(render_request("/api/thermal/render", REQUEST))
            .await
            .unwrap();
        let escpos = to_bytes(escpos.into_body(), usize::MAX).await.unwrap();
        assert_eq!(envelope.decode().unwrap(), escpos.to_vec());
    }

    #[tokio::test]
    async fn test_render_filename_strips_quotes_and_newlines() {
        let body = REQUEST.replace(r#""id": 5"#, r#""id": "TX\"7\n8""#);
        let response = app()
            .oneshot(render_request("/api/thermal/render", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"receipt_TX78.bin\""
        );
    }

    #[tokio::test]
    async fn test_render_rejects_bad_timestamp() {
        let body = REQUEST.replace("2024-01-15 14:30:00", "someday");
        let response = app()
            .oneshot(render_request("/api/thermal/render", &body))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
