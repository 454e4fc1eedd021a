//! Server state and configuration.

use tokio::sync::Mutex;

use crate::receipt::BusinessSettings;
use crate::transport::UsbConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Settings used when a request carries none
    pub settings: BusinessSettings,
    /// Which USB printers to accept
    pub usb: UsbConfig,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Held for the whole connect-stream-disconnect cycle; one job owns the
    /// printer at a time.
    pub printer_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            printer_lock: Mutex::new(()),
        }
    }
}
