//! # USB Bulk Transport
//!
//! Direct printing to a receipt printer on the USB bus through libusb
//! (`rusb`).
//!
//! ## Connection Sequence
//!
//! 1. Enumerate devices and keep those whose vendor ID is allowed
//! 2. Open the first match
//! 3. Select configuration 1 if the device reports none active
//! 4. Claim the first interface (detaching a kernel driver if needed)
//! 5. Find the bulk OUT endpoint in its first alternate setting
//!
//! Any failure after step 4 releases the interface again, so a failed
//! connect leaves nothing claimed.
//!
//! ## Linux Permissions
//!
//! Without root, the device node needs a udev rule, e.g.:
//!
//! ```text
//! SUBSYSTEM=="usb", ATTR{idVendor}=="04b8", MODE="0666"
//! ```
//!
//! libusb calls block, so they run on tokio's blocking pool.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rusb::{Context, Device, DeviceHandle, Direction, TransferType, UsbContext};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::stream::{BulkOut, StreamingSink};
use crate::error::TillrollError;
use crate::ir::Program;
use crate::printer::config::{known_vendor_ids, vendor_name};

/// Default per-transfer timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Which devices to accept and how long a transfer may take.
#[derive(Debug, Clone)]
pub struct UsbConfig {
    pub vendor_ids: Vec<u16>,
    pub timeout: Duration,
}

impl Default for UsbConfig {
    fn default() -> Self {
        Self {
            vendor_ids: known_vendor_ids(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// An attached device from the allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub bus: u8,
    pub address: u8,
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: Option<&'static str>,
}

/// What is known about the connection, without asking the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrinterStatus {
    pub connected: bool,
    pub product: Option<String>,
    pub manufacturer: Option<String>,
}

/// Outcome of a complete print job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintReport {
    pub commands: usize,
    pub product: Option<String>,
    pub manufacturer: Option<String>,
}

struct Connection {
    handle: Arc<DeviceHandle<Context>>,
    interface: u8,
    endpoint: u8,
    product: Option<String>,
    manufacturer: Option<String>,
}

/// A USB receipt printer.
///
/// ```no_run
/// use tillroll::transport::{UsbConfig, UsbPrinter};
/// use tillroll::ir::Program;
///
/// # async fn run() -> Result<(), tillroll::TillrollError> {
/// let mut printer = UsbPrinter::new(UsbConfig::default())?;
/// let report = printer.print(&Program::with_init()).await?;
/// println!("printed on {:?}", report.product);
/// # Ok(())
/// # }
/// ```
pub struct UsbPrinter {
    config: UsbConfig,
    context: Context,
    connection: Option<Connection>,
}

impl UsbPrinter {
    /// Create a printer handle. Fails with [`TillrollError::Unsupported`]
    /// when libusb is unavailable.
    pub fn new(config: UsbConfig) -> Result<Self, TillrollError> {
        let context = Context::new().map_err(|e| TillrollError::Unsupported(e.to_string()))?;
        Ok(Self {
            config,
            context,
            connection: None,
        })
    }

    pub fn config(&self) -> &UsbConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn status(&self) -> PrinterStatus {
        match &self.connection {
            Some(conn) => PrinterStatus {
                connected: true,
                product: conn.product.clone(),
                manufacturer: conn.manufacturer.clone(),
            },
            None => PrinterStatus::default(),
        }
    }

    /// Attached devices whose vendor ID is allowed.
    pub fn list_printers(&self) -> Result<Vec<DeviceInfo>, TillrollError> {
        let devices = self
            .context
            .devices()
            .map_err(|e| TillrollError::Connection(format!("USB enumeration failed: {e}")))?;

        let mut found = Vec::new();
        for device in devices.iter() {
            let Ok(desc) = device.device_descriptor() else {
                continue;
            };
            if !self.config.vendor_ids.contains(&desc.vendor_id()) {
                continue;
            }
            found.push(DeviceInfo {
                bus: device.bus_number(),
                address: device.address(),
                vendor_id: desc.vendor_id(),
                product_id: desc.product_id(),
                manufacturer: vendor_name(desc.vendor_id()),
            });
        }
        Ok(found)
    }

    /// Open and claim the first allowed device. A no-op when connected.
    pub async fn connect(&mut self) -> Result<PrinterStatus, TillrollError> {
        if self.connection.is_some() {
            return Ok(self.status());
        }

        let context = self.context.clone();
        let vendor_ids = self.config.vendor_ids.clone();
        let connection = tokio::task::spawn_blocking(move || open_first(&context, &vendor_ids))
            .await
            .map_err(|e| TillrollError::Connection(e.to_string()))?
            .inspect_err(|e| error!(error = %e, "USB connect failed"))?;

        info!(
            product = connection.product.as_deref().unwrap_or("unknown"),
            interface = connection.interface,
            endpoint = connection.endpoint,
            "USB printer connected"
        );
        self.connection = Some(connection);
        Ok(self.status())
    }

    /// Release the interface and close the device.
    pub async fn disconnect(&mut self) -> Result<(), TillrollError> {
        let Some(conn) = self.connection.take() else {
            return Ok(());
        };

        match Arc::try_unwrap(conn.handle) {
            Ok(mut handle) => {
                let interface = conn.interface;
                tokio::task::spawn_blocking(move || handle.release_interface(interface))
                    .await
                    .map_err(|e| TillrollError::Transport(e.to_string()))?
                    .map_err(|e| TillrollError::Transport(format!("release failed: {e}")))?;
            }
            Err(_) => warn!("USB handle still shared at disconnect; closing on last drop"),
        }
        info!("USB printer disconnected");
        Ok(())
    }

    /// Connect, initialize, stream `program`, disconnect.
    ///
    /// The printer is disconnected whether or not streaming succeeded. On
    /// failure the receipt is incomplete and must be printed again from the
    /// start.
    pub async fn print(&mut self, program: &Program) -> Result<PrintReport, TillrollError> {
        let status = self.connect().await?;

        let streamed = {
            let mut sink = StreamingSink::new(&mut *self);
            match sink.initialize().await {
                Ok(()) => sink.send_program(program).await,
                Err(e) => Err(e),
            }
        };
        let closed = self.disconnect().await;

        let commands = streamed?;
        closed?;
        Ok(PrintReport {
            commands,
            product: status.product,
            manufacturer: status.manufacturer,
        })
    }
}

#[async_trait]
impl BulkOut for UsbPrinter {
    async fn transfer_out(&mut self, data: &[u8]) -> Result<usize, TillrollError> {
        let conn = self.connection.as_ref().ok_or(TillrollError::NotConnected)?;
        let handle = Arc::clone(&conn.handle);
        let endpoint = conn.endpoint;
        let timeout = self.config.timeout;
        let data = data.to_vec();

        let written =
            tokio::task::spawn_blocking(move || handle.write_bulk(endpoint, &data, timeout))
                .await
                .map_err(|e| TillrollError::Transport(e.to_string()))?
                .map_err(|e| {
                    error!(error = %e, "bulk transfer failed");
                    TillrollError::Transport(describe(e))
                })?;

        debug!(bytes = written, "bulk transfer");
        Ok(written)
    }
}

fn describe(e: rusb::Error) -> String {
    match e {
        rusb::Error::Busy => "device busy".to_string(),
        rusb::Error::NoDevice => "device disconnected".to_string(),
        rusb::Error::Access => "access denied (check udev permissions)".to_string(),
        other => other.to_string(),
    }
}

fn open_first(context: &Context, vendor_ids: &[u16]) -> Result<Connection, TillrollError> {
    let devices = context
        .devices()
        .map_err(|e| TillrollError::Connection(format!("USB enumeration failed: {e}")))?;

    let device = devices
        .iter()
        .find(|d| {
            d.device_descriptor()
                .is_ok_and(|desc| vendor_ids.contains(&desc.vendor_id()))
        })
        .ok_or_else(|| TillrollError::Connection("no supported printer found".into()))?;

    open_device(&device)
}

fn open_device(device: &Device<Context>) -> Result<Connection, TillrollError> {
    let conn_err = |stage: &str, e: rusb::Error| {
        TillrollError::Connection(format!("{stage}: {}", describe(e)))
    };

    let desc = device
        .device_descriptor()
        .map_err(|e| conn_err("read descriptor", e))?;
    let mut handle = device.open().map_err(|e| conn_err("open", e))?;

    if handle.active_configuration().map_err(|e| conn_err("read configuration", e))? == 0 {
        handle
            .set_active_configuration(1)
            .map_err(|e| conn_err("select configuration", e))?;
    }

    let config = device
        .active_config_descriptor()
        .map_err(|e| conn_err("read configuration", e))?;
    let interface = config
        .interfaces()
        .next()
        .ok_or_else(|| TillrollError::Connection("device has no interfaces".into()))?;
    let number = interface.number();

    // Not supported on every platform; claiming still works without it.
    let _ = handle.set_auto_detach_kernel_driver(true);
    handle
        .claim_interface(number)
        .map_err(|e| conn_err("claim interface", e))?;

    let endpoint = interface.descriptors().next().and_then(|alt| {
        alt.endpoint_descriptors()
            .find(|ep| ep.direction() == Direction::Out && ep.transfer_type() == TransferType::Bulk)
            .map(|ep| ep.address())
    });
    let Some(endpoint) = endpoint else {
        let _ = handle.release_interface(number);
        return Err(TillrollError::Connection(
            "Could not find bulk OUT endpoint".into(),
        ));
    };

    let product = handle.read_product_string_ascii(&desc).ok();
    let manufacturer = handle
        .read_manufacturer_string_ascii(&desc)
        .ok()
        .or_else(|| vendor_name(desc.vendor_id()).map(str::to_string));

    Ok(Connection {
        handle: Arc::new(handle),
        interface: number,
        endpoint,
        product,
        manufacturer,
    })
}
