//! # ESC/POS Raster Image Command
//!
//! Pass-through of pre-packed monochrome raster data. There is no
//! rasterizer here: callers supply bytes that are already packed one bit per
//! dot.
//!
//! ## Bit Packing
//!
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::commands::{opcode, u16_le};

/// Raster mode byte `m` (normal density).
const RASTER_NORMAL: u8 = 0;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `width`: horizontal size, little-endian (`xL xH`)
/// - `height`: vertical size in dots, little-endian (`yL yH`)
/// - `data`: raw bitmap bytes, appended unchanged
///
/// ## Example
///
/// ```
/// use tillroll::protocol::graphics::image;
///
/// let cmd = image(&[0xFF, 0x00], 300, 2);
/// assert_eq!(cmd, vec![0x1D, 0x76, 0x30, 0, 0x2C, 0x01, 0x02, 0x00, 0xFF, 0x00]);
/// ```
pub fn image(data: &[u8], width: u16, height: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + data.len());
    out.extend_from_slice(&opcode::RASTER_IMAGE);
    out.push(RASTER_NORMAL);
    out.extend_from_slice(&u16_le(width));
    out.extend_from_slice(&u16_le(height));
    out.extend_from_slice(data);
    out
}

// ============================================================================
// TESTS
// ============================================================================
