//! # Tillroll - ESC/POS Receipt Library
//!
//! Tillroll turns a point-of-sale transaction into the byte stream an
//! ESC/POS thermal printer understands, and delivers it either as one blob
//! or command by command over USB. It provides:
//!
//! - **Protocol implementation**: ESC/POS command builders
//! - **Components**: declarative receipt building blocks compiled to IR
//! - **Receipt layout**: the fixed 48-column sales receipt
//! - **Transport**: buffering sink and a streaming USB bulk sink
//!
//! ## Quick Start
//!
//! ```
//! use tillroll::components::*;
//!
//! let receipt = Receipt::new()
//!     .child(Text::new("CHURRA MART").center().bold().size(2, 2))
//!     .child(Divider::double())
//!     .child(Columns::new("Espresso", "4,500"))
//!     .cut();
//!
//! let bytes = receipt.build();
//! assert!(bytes.starts_with(&[0x1B, 0x40]));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`ir`] | Ops, commands and programs |
//! | [`components`] | Declarative components |
//! | [`receipt`] | Receipt input and layout |
//! | [`transport`] | Buffer, stream and USB sinks |
//! | [`server`] | HTTP API |
//! | [`printer`] | Paper geometry and vendor table |
//! | [`error`] | Error types |

pub mod components;
pub mod error;
pub mod ir;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use error::TillrollError;
pub use printer::PrinterConfig;
pub use transport::{BufferSink, StreamingSink, UsbPrinter};
