//! # Tillroll CLI
//!
//! Command-line interface for ESC/POS receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Encode a receipt to a file
//! tillroll render receipt.json --output receipt.bin
//!
//! # Base64 JSON envelope on stdout
//! tillroll render receipt.json --format raw
//!
//! # Print on the first attached USB printer
//! tillroll print receipt.json --settings business.json
//!
//! # Kick the cash drawer
//! tillroll drawer --pin 0 --on-ms 100 --off-ms 500
//!
//! # List attached printers
//! tillroll devices
//!
//! # HTTP API
//! tillroll serve --listen 0.0.0.0:8080
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`.

use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tillroll::{
    TillrollError,
    ir::{Op, Program},
    printer::config::{known_vendor_ids, parse_vendor, vendor_name},
    protocol::commands::{DEFAULT_PULSE_OFF_MS, DEFAULT_PULSE_ON_MS, DrawerPin},
    receipt::{
        BusinessSettings, OutputFormat, RawEnvelope, ReceiptRequest, attachment_filename, compose,
    },
    server::{self, ServerConfig},
    transport::{UsbConfig, UsbPrinter},
};

/// Tillroll - ESC/POS receipt encoder and USB printer driver
#[derive(Parser, Debug)]
#[command(name = "tillroll")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a receipt request (JSON) to ESC/POS
    Render {
        /// Receipt request file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "escpos")]
        format: OutputFormat,

        /// Business settings file used when the request has none
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
    },

    /// Print a receipt request on a USB printer
    Print {
        /// Receipt request file
        input: PathBuf,

        /// Business settings file used when the request has none
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,

        #[command(flatten)]
        usb: UsbArgs,
    },

    /// Pulse the cash drawer kick connector
    Drawer {
        /// 0 = connector pin 2, 1 = connector pin 5
        #[arg(long, default_value_t = 0)]
        pin: u8,

        /// Pulse ON time in milliseconds
        #[arg(long, default_value_t = DEFAULT_PULSE_ON_MS)]
        on_ms: u32,

        /// Pulse OFF time in milliseconds
        #[arg(long, default_value_t = DEFAULT_PULSE_OFF_MS)]
        off_ms: u32,

        #[command(flatten)]
        usb: UsbArgs,
    },

    /// List attached USB printers from known vendors
    Devices {
        #[command(flatten)]
        usb: UsbArgs,
    },

    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Business settings file
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,

        #[command(flatten)]
        usb: UsbArgs,
    },
}

#[derive(Args, Debug)]
struct UsbArgs {
    /// Accepted vendor (name or hex ID); repeatable. Default: all known vendors
    #[arg(long = "vendor", value_name = "VENDOR", value_parser = parse_vendor)]
    vendors: Vec<u16>,

    /// Per-transfer timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,
}

impl UsbArgs {
    fn config(&self) -> UsbConfig {
        UsbConfig {
            vendor_ids: if self.vendors.is_empty() {
                known_vendor_ids()
            } else {
                self.vendors.clone()
            },
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tillroll=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), TillrollError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            format,
            settings,
        } => {
            let settings = load_settings(settings.as_deref())?;
            let doc = ReceiptRequest::load(&input)?.into_document(settings.as_ref())?;
            let bytes = compose(&doc).to_bytes();

            let payload = match format {
                OutputFormat::Escpos => bytes,
                OutputFormat::Raw => {
                    let mut json =
                        serde_json::to_vec_pretty(&RawEnvelope::new(doc.transaction_id.clone(), &bytes))?;
                    json.push(b'\n');
                    json
                }
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, &payload)?;
                    info!(
                        path = %path.display(),
                        bytes = payload.len(),
                        suggested = attachment_filename(&doc.transaction_id),
                        "receipt written"
                    );
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&payload)?;
                    stdout.flush()?;
                }
            }
            Ok(())
        }

        Commands::Print {
            input,
            settings,
            usb,
        } => {
            let settings = load_settings(settings.as_deref())?;
            let doc = ReceiptRequest::load(&input)?.into_document(settings.as_ref())?;

            let mut printer = UsbPrinter::new(usb.config())?;
            let report = printer.print(&compose(&doc)).await?;
            println!(
                "Printed receipt {} on {} ({})",
                doc.transaction_id,
                report.product.as_deref().unwrap_or("unknown device"),
                report.manufacturer.as_deref().unwrap_or("unknown manufacturer"),
            );
            Ok(())
        }

        Commands::Drawer {
            pin,
            on_ms,
            off_ms,
            usb,
        } => {
            let pin = DrawerPin::from_index(pin).ok_or_else(|| {
                TillrollError::InvalidCommand(format!("drawer pin must be 0 or 1, got {pin}"))
            })?;
            let mut program = Program::with_init();
            program.push(Op::DrawerPulse { pin, on_ms, off_ms });

            let mut printer = UsbPrinter::new(usb.config())?;
            printer.print(&program).await?;
            println!("Cash drawer opened");
            Ok(())
        }

        Commands::Devices { usb } => {
            let printer = UsbPrinter::new(usb.config())?;
            let devices = printer.list_printers()?;
            if devices.is_empty() {
                println!("No supported printers found");
            }
            for d in devices {
                println!(
                    "Bus {:03} Device {:03}: {:04x}:{:04x} {}",
                    d.bus,
                    d.address,
                    d.vendor_id,
                    d.product_id,
                    d.manufacturer
                        .or_else(|| vendor_name(d.vendor_id))
                        .unwrap_or("unknown"),
                );
            }
            Ok(())
        }

        Commands::Serve {
            listen,
            settings,
            usb,
        } => {
            let settings = load_settings(settings.as_deref())?.unwrap_or_default();
            server::serve(ServerConfig {
                listen_addr: listen,
                settings,
                usb: usb.config(),
            })
            .await
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<Option<BusinessSettings>, TillrollError> {
    path.map(BusinessSettings::load).transpose()
}
