//! # ESC/POS Protocol Commands
//!
//! This module holds the opcode table shared by every command builder, plus
//! the basic printer control commands (initialize, feed, cut, cash drawer).
//!
//! ## Protocol Overview
//!
//! ESC/POS is the de facto command language of thermal receipt printers
//! (Epson TM series, Star in ESC/POS emulation, Citizen, Bixolon, ...).
//! Commands are byte sequences that start with an escape prefix:
//!
//! - Single byte: `LF`
//! - Prefix + opcode + parameter: `ESC a n`, `GS V m`
//! - Length-prefixed: `GS k m n d1...dn`, `GS ( k pL pH cn fn ...`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, cutter, barcode and 2D symbol commands.
pub const GS: u8 = 0x1D;

/// DLE (Data Link Escape) - Real-time command prefix
pub const DLE: u8 = 0x10;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// OPCODE TABLE
// ============================================================================

/// Fixed opcode prefixes.
///
/// Every command builder in [`crate::protocol`] appends its parameters to one
/// of these prefixes. Nothing else in the crate spells opcode bytes inline.
///
/// | Directive | Bytes |
/// |-----------|-------|
/// | Initialize | `ESC @` |
/// | Align | `ESC a n` |
/// | Bold | `ESC E n` |
/// | Underline | `ESC - n` |
/// | Text size | `GS ! n` |
/// | Font | `ESC M n` |
/// | Line spacing | `ESC 3 n` |
/// | Char spacing | `ESC SP n` |
/// | Reverse feed | `ESC e n` |
/// | Reverse print | `GS B n` |
/// | Cut | `GS V m` |
/// | Barcode height / width / HRI | `GS h n` / `GS w n` / `GS H n` |
/// | Barcode data | `GS k m n data` |
/// | 2D symbol (QR) | `GS ( k pL pH cn fn ...` |
/// | Raster image | `GS v 0 m xL xH yL yH data` |
/// | Drawer pulse | `ESC p m t1 t2` |
pub mod opcode {
    use super::{ESC, GS};

    pub const INITIALIZE: [u8; 2] = [ESC, b'@'];
    pub const ALIGN: [u8; 2] = [ESC, b'a'];
    pub const BOLD: [u8; 2] = [ESC, b'E'];
    pub const UNDERLINE: [u8; 2] = [ESC, b'-'];
    pub const TEXT_SIZE: [u8; 2] = [GS, b'!'];
    pub const FONT: [u8; 2] = [ESC, b'M'];
    pub const LINE_SPACING: [u8; 2] = [ESC, b'3'];
    pub const CHAR_SPACING: [u8; 2] = [ESC, b' '];
    pub const FEED_REVERSE: [u8; 2] = [ESC, b'e'];
    pub const REVERSE: [u8; 2] = [GS, b'B'];
    pub const CUT: [u8; 2] = [GS, b'V'];
    pub const BARCODE_HEIGHT: [u8; 2] = [GS, b'h'];
    pub const BARCODE_WIDTH: [u8; 2] = [GS, b'w'];
    pub const BARCODE_HRI: [u8; 2] = [GS, b'H'];
    pub const BARCODE_DATA: [u8; 2] = [GS, b'k'];
    pub const SYMBOL_2D: [u8; 3] = [GS, b'(', b'k'];
    pub const RASTER_IMAGE: [u8; 3] = [GS, b'v', b'0'];
    pub const DRAWER_PULSE: [u8; 2] = [ESC, b'p'];
}

/// Build a command from an opcode prefix and its parameter bytes.
#[inline]
pub fn with_params(opcode: &[u8], params: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(opcode.len() + params.len());
    out.extend_from_slice(opcode);
    out.extend_from_slice(params);
    out
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets every mode (alignment, emphasis,
/// character size, spacing) to the power-on defaults.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands;
///
/// assert_eq!(commands::initialize(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn initialize() -> Vec<u8> {
    opcode::INITIALIZE.to_vec()
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// # Line Feed (LF × n)
///
/// Emits `n` line-feed bytes. `feed(0)` is an empty command.
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands;
///
/// assert_eq!(commands::feed(3), vec![0x0A, 0x0A, 0x0A]);
/// ```
#[inline]
pub fn feed(lines: u8) -> Vec<u8> {
    vec![LF; lines as usize]
}

/// # Print and Reverse Feed (ESC e n)
///
/// Prints the buffer and feeds the paper backwards by `n` lines. Many
/// printers cap the reverse distance; the cap is applied by the firmware.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC e n |
/// | Hex     | 1B 65 n |
#[inline]
pub fn feed_reverse(lines: u8) -> Vec<u8> {
    with_params(&opcode::FEED_REVERSE, &[lines])
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// Cutter mode byte for `GS V m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutMode {
    /// Full cut, receipt falls off the roll
    #[default]
    Full = 0,
    /// Partial cut, leaves a small hinge
    Partial = 1,
}

/// Lines fed before the cutter fires when the caller does not say otherwise.
pub const DEFAULT_CUT_FEED: u8 = 3;

/// # Feed, Then Cut (LF × n, GS V m)
///
/// Feeds `feed_lines` lines so the last printed line clears the cutter, then
/// cuts the paper.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | LF… GS V m |
/// | Hex     | 0A… 1D 56 m |
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands::{cut, CutMode};
///
/// assert_eq!(cut(CutMode::Full, 2), vec![0x0A, 0x0A, 0x1D, 0x56, 0x00]);
/// ```
pub fn cut(mode: CutMode, feed_lines: u8) -> Vec<u8> {
    let mut out = feed(feed_lines);
    out.extend_from_slice(&opcode::CUT);
    out.push(mode as u8);
    out
}

/// Partial cut after feeding `feed_lines` lines.
#[inline]
pub fn cut_partial(feed_lines: u8) -> Vec<u8> {
    cut(CutMode::Partial, feed_lines)
}

// ============================================================================
// CASH DRAWER
// ============================================================================

/// Drawer kick-out connector pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerPin {
    /// Connector pin 2 (most drawers)
    #[default]
    Pin2 = 0,
    /// Connector pin 5
    Pin5 = 1,
}

impl DrawerPin {
    /// Map the protocol parameter (0 or 1) to a pin.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Pin2),
            1 => Some(Self::Pin5),
            _ => None,
        }
    }
}

/// Default pulse ON time in milliseconds.
pub const DEFAULT_PULSE_ON_MS: u32 = 100;

/// Default pulse OFF time in milliseconds.
pub const DEFAULT_PULSE_OFF_MS: u32 = 500;

/// # Generate Drawer Pulse (ESC p m t1 t2)
///
/// Drives the drawer solenoid through the printer's RJ11/RJ12 kick-out
/// connector. The ON and OFF times are given in milliseconds and converted
/// to the protocol's 2 ms units with `floor(ms / 2)`.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC p m t1 t2 |
/// | Hex     | 1B 70 m t1 t2 |
///
/// ## Parameters
///
/// - `pin`: connector pin
/// - `on_ms`: pulse ON time, saturates at 510 ms (255 units)
/// - `off_ms`: pulse OFF time, saturates at 510 ms (255 units)
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands::{drawer_pulse, DrawerPin};
///
/// assert_eq!(
///     drawer_pulse(DrawerPin::Pin2, 100, 500),
///     vec![0x1B, 0x70, 0, 50, 250]
/// );
/// ```
///
/// ## Hardware Effect
///
/// The pulse physically opens the drawer and cannot be undone or retried
/// mid-sequence.
pub fn drawer_pulse(pin: DrawerPin, on_ms: u32, off_ms: u32) -> Vec<u8> {
    with_params(
        &opcode::DRAWER_PULSE,
        &[pin as u8, ms_to_units(on_ms), ms_to_units(off_ms)],
    )
}

#[inline]
fn ms_to_units(ms: u32) -> u8 {
    (ms / 2).min(u8::MAX as u32) as u8
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use tillroll::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize() {
        assert_eq!(initialize(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_feed() {
        assert_eq!(feed(1), vec![0x0A]);
        assert_eq!(feed(4), vec![0x0A; 4]);
        assert!(feed(0).is_empty());
    }

    #[test]
    fn test_feed_reverse() {
        assert_eq!(feed_reverse(2), vec![0x1B, 0x65, 0x02]);
    }

    #[test]
    fn test_cut_feeds_exactly_n_lines_then_cuts() {
        for n in [0u8, 1, 3, 7] {
            let bytes = cut(CutMode::Full, n);
            let n = n as usize;
            assert_eq!(bytes.len(), n + 3);
            assert!(bytes[..n].iter().all(|&b| b == LF));
            assert_eq!(&bytes[n..], &[0x1D, 0x56, 0x00]);
        }
    }

    #[test]
    fn test_cut_partial() {
        assert_eq!(cut_partial(3), vec![0x0A, 0x0A, 0x0A, 0x1D, 0x56, 0x01]);
        assert_eq!(cut_partial(1), cut(CutMode::Partial, 1));
    }

    #[test]
    fn test_drawer_pulse_defaults() {
        assert_eq!(
            drawer_pulse(DrawerPin::Pin2, DEFAULT_PULSE_ON_MS, DEFAULT_PULSE_OFF_MS),
            vec![0x1B, 0x70, 0x00, 50, 250]
        );
    }

    #[test]
    fn test_drawer_pulse_floors_odd_ms() {
        assert_eq!(drawer_pulse(DrawerPin::Pin5, 201, 3), vec![0x1B, 0x70, 0x01, 100, 1]);
    }

    #[test]
    fn test_drawer_pulse_saturates() {
        assert_eq!(drawer_pulse(DrawerPin::Pin2, 10_000, 511), vec![0x1B, 0x70, 0x00, 255, 255]);
    }

    #[test]
    fn test_drawer_pin_from_index() {
        assert_eq!(DrawerPin::from_index(0), Some(DrawerPin::Pin2));
        assert_eq!(DrawerPin::from_index(1), Some(DrawerPin::Pin5));
        assert_eq!(DrawerPin::from_index(2), None);
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(576), [0x40, 0x02]);
    }
}
