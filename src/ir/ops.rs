//! # IR Opcodes
//!
//! This module defines the intermediate representation (IR) for receipt printing.
//! The IR is an ordered list of directives, each of which compiles to exactly
//! one [`Command`].
//!
//! ## Design Philosophy
//!
//! ```text
//! Components → IR (inspectable) → Codegen → Commands → Sink
//! ```
//!
//! One op is one primitive invocation. Ops are never merged, split or
//! reordered between the composer and a sink, so the buffered bytes and the
//! streamed transfers are the same sequence.

use crate::protocol::barcode::BarcodeSpec;
use crate::protocol::barcode::qr::QrSpec;
use crate::protocol::commands::{CutMode, DrawerPin};
use crate::protocol::text::{Alignment, Font, UnderlineMode};

/// IR opcodes - one per command primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Printer Control ==========
    /// Initialize printer (ESC @). Resets to default state.
    Init,

    /// Feed `n` lines (LF × n).
    Feed(u8),

    /// Print and reverse feed `n` lines.
    FeedReverse(u8),

    /// Feed `feed_lines` lines, then cut.
    Cut { mode: CutMode, feed_lines: u8 },

    /// Cash drawer kick pulse. Times in milliseconds.
    DrawerPulse {
        pin: DrawerPin,
        on_ms: u32,
        off_ms: u32,
    },

    // ========== Style Changes ==========
    /// Set text alignment.
    SetAlign(Alignment),

    /// Set font (A, B, or C).
    SetFont(Font),

    /// Enable/disable bold.
    SetBold(bool),

    /// Set underline thickness.
    SetUnderline(UnderlineMode),

    /// Enable/disable white-on-black printing.
    SetReverse(bool),

    /// Character size multipliers, 1-8 each.
    SetTextSize { width: u8, height: u8 },

    /// Line spacing in motion units.
    SetLineSpacing(u8),

    /// Right-side character spacing.
    SetCharSpacing(u8),

    // ========== Content ==========
    /// Raw text (no trailing newline).
    Text(Vec<u8>),

    /// Text followed by a line feed.
    TextLine(Vec<u8>),

    /// Horizontal rule of `length` copies of `ch`.
    Rule { ch: char, length: usize },

    /// Two-column line with overflow fallback.
    Columns {
        left: String,
        right: String,
        width: usize,
    },

    /// Raw bytes (direct protocol access).
    Raw(Vec<u8>),

    // ========== Graphics & Barcodes ==========
    /// Pre-packed raster image.
    Image {
        data: Vec<u8>,
        width: u16,
        height: u16,
    },

    /// 1D barcode.
    Barcode(BarcodeSpec),

    /// QR code.
    QrCode(QrSpec),
}

impl Op {
    /// Text op from anything string-like.
    pub fn text(s: impl AsRef<[u8]>) -> Self {
        Self::Text(s.as_ref().to_vec())
    }

    /// Text-line op from anything string-like.
    pub fn line(s: impl AsRef<[u8]>) -> Self {
        Self::TextLine(s.as_ref().to_vec())
    }
}

/// The bytes of one primitive invocation.
///
/// Commands have no identity beyond their bytes and are immutable once
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command(Vec<u8>);

impl Command {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Command {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Command {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A compiled IR program.
///
/// Contains a sequence of ops in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create a program with an initial Init op.
    pub fn with_init() -> Self {
        Self {
            ops: vec![Op::Init],
        }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Add multiple ops to the program.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
