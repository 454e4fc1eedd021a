//! # Printer Module
//!
//! This module provides printer-specific configurations.
//!
//! ## Modules
//!
//! - [`config`]: Paper geometry and the USB vendor table

pub mod config;

pub use config::{KNOWN_VENDORS, PrinterConfig, Vendor, vendor_name};
