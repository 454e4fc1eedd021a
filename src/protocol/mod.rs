//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for ESC/POS thermal receipt printers. Every
//! builder is a pure function returning the exact bytes of one command.
//!
//! ## Module Structure
//!
//! - [`commands`]: Opcode table and printer control (initialize, feed, cut, drawer)
//! - [`text`]: Text styling and layout (alignment, bold, size, rules, columns)
//! - [`barcode`]: 1D barcodes and QR codes
//! - [`graphics`]: Raster image pass-through
//!
//! ## Usage Example
//!
//! ```
//! use tillroll::protocol::{commands, text};
//! use tillroll::protocol::text::Alignment;
//!
//! let mut data = Vec::new();
//! data.extend(commands::initialize());
//! data.extend(text::align(Alignment::Center));
//! data.extend(text::set_bold(true));
//! data.extend(text::text_line("RECEIPT"));
//! data.extend(text::set_bold(false));
//! data.extend(commands::cut(commands::CutMode::Full, 3));
//! ```

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod text;
