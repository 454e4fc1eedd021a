//! # Error Types
//!
//! This module defines error types used throughout the tillroll library.
//!
//! Command builders and the receipt composer do not fail once their inputs
//! exist; everything here originates at a boundary (USB, files, HTTP input)
//! or when a barcode or QR payload is too long for its length prefix.

use thiserror::Error;

/// Main error type for tillroll operations
#[derive(Debug, Error)]
pub enum TillrollError {
    /// The runtime cannot do USB at all (no libusb backend, no permission model)
    #[error("USB printing is not supported on this system: {0}")]
    Unsupported(String),

    /// Device enumeration, open, configuration or claim failed
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A transfer was attempted without an open connection
    #[error("Printer not connected. Connect before sending commands")]
    NotConnected,

    /// A command could not be delivered; the receipt is not fully printed
    #[error("Transfer failed at command {index}: {reason}")]
    TransferFailed { index: usize, reason: String },

    /// The sink stopped after an earlier failure
    #[error("Print job aborted after {sent} commands; reconnect and resend the whole receipt")]
    Aborted { sent: usize },

    /// A length-prefixed field does not fit its length bytes
    #[error("{field} is {len} bytes, maximum is {max}")]
    LengthExceeded {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Receipt input that cannot be interpreted
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Invalid command or parameter
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Transport-level errors not tied to a single command
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
