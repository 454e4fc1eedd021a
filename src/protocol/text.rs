//! # ESC/POS Text Commands
//!
//! Text output, styling and layout helpers for 80mm receipt printers.
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text (1 or 2 dots) |
//! | Size | GS ! n | 1×–8× width and height |
//! | Reverse | GS B n | White on black |
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```
//!
//! ## Font Selection
//!
//! | Font | Size | Columns (72mm) |
//! |------|------|----------------|
//! | Font A | 12×24 dots | 48 chars |
//! | Font B | 9×17 dots | 64 chars |
//! | Font C | model dependent | - |

use super::commands::{LF, opcode, with_params};

// ============================================================================
// RAW TEXT
// ============================================================================

/// Raw pass-through of text bytes.
///
/// No encoding conversion happens here; the bytes reach the printer as given.
#[inline]
pub fn text(bytes: impl AsRef<[u8]>) -> Vec<u8> {
    bytes.as_ref().to_vec()
}

/// Text followed by one line feed.
///
/// ```
/// use tillroll::protocol::text::text_line;
///
/// assert_eq!(text_line("OK"), vec![b'O', b'K', 0x0A]);
/// ```
#[inline]
pub fn text_line(bytes: impl AsRef<[u8]>) -> Vec<u8> {
    let mut out = text(bytes);
    out.push(LF);
    out
}

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Select Justification (ESC a n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
/// | Decimal | 27 97 n |
///
/// ## Behavior
///
/// Takes effect at the start of a line and persists until changed or until
/// the printer is initialized.
///
/// ## Example
///
/// ```
/// use tillroll::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    with_params(&opcode::ALIGN, &[alignment as u8])
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Font A: 12×24 dots, 48 columns on 72mm print width
    #[default]
    A = 0,
    /// Font B: 9×17 dots, 64 columns on 72mm print width
    B = 1,
    /// Font C: model dependent
    C = 2,
}

/// # Select Character Font (ESC M n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC M n |
/// | Hex     | 1B 4D n |
pub fn set_font(font: Font) -> Vec<u8> {
    with_params(&opcode::FONT, &[font as u8])
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Turn Emphasized Mode On/Off (ESC E n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E n |
/// | Hex     | 1B 45 n |
///
/// `n = 1` turns bold on, `n = 0` turns it off.
pub fn set_bold(enabled: bool) -> Vec<u8> {
    with_params(&opcode::BOLD, &[enabled as u8])
}

/// Underline thickness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlineMode {
    #[default]
    Off = 0,
    /// 1 dot thick
    Single = 1,
    /// 2 dots thick
    Double = 2,
}

/// # Turn Underline Mode On/Off (ESC - n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC - n |
/// | Hex     | 1B 2D n |
pub fn set_underline(mode: UnderlineMode) -> Vec<u8> {
    with_params(&opcode::UNDERLINE, &[mode as u8])
}

/// # Turn White/Black Reverse Printing On/Off (GS B n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS B n |
/// | Hex     | 1D 42 n |
pub fn set_reverse(enabled: bool) -> Vec<u8> {
    with_params(&opcode::REVERSE, &[enabled as u8])
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Pack width and height multipliers into the `GS !` parameter byte.
///
/// Each multiplier is clamped to 1..=8, then combined as
/// `((width - 1) << 4) | (height - 1)`.
///
/// ```
/// use tillroll::protocol::text::size_byte;
///
/// assert_eq!(size_byte(1, 1), 0x00);
/// assert_eq!(size_byte(2, 2), 0x11);
/// assert_eq!(size_byte(0, 9), 0x07);
/// ```
pub const fn size_byte(width: u8, height: u8) -> u8 {
    let w = clamp_multiplier(width) - 1;
    let h = clamp_multiplier(height) - 1;
    (w << 4) | h
}

const fn clamp_multiplier(n: u8) -> u8 {
    if n < 1 {
        1
    } else if n > 8 {
        8
    } else {
        n
    }
}

/// # Select Character Size (GS ! n)
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS ! n |
/// | Hex     | 1D 21 n |
///
/// ## Parameter Byte
///
/// ```text
/// bit  7 6 5 4 | 3 2 1 0
///      width-1 | height-1
/// ```
///
/// ## Example
///
/// ```
/// use tillroll::protocol::text::set_text_size;
///
/// assert_eq!(set_text_size(2, 2), vec![0x1D, 0x21, 0x11]);
/// ```
pub fn set_text_size(width: u8, height: u8) -> Vec<u8> {
    with_params(&opcode::TEXT_SIZE, &[size_byte(width, height)])
}

/// Independent text style flags.
///
/// Double width/height map onto the 2× multipliers of `GS !`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub underline: UnderlineMode,
    pub double_height: bool,
    pub double_width: bool,
}

impl TextStyle {
    /// Width and height multipliers for this style.
    pub fn multipliers(&self) -> (u8, u8) {
        (
            if self.double_width { 2 } else { 1 },
            if self.double_height { 2 } else { 1 },
        )
    }

    /// The `GS !` parameter byte for this style.
    pub fn size_byte(&self) -> u8 {
        let (w, h) = self.multipliers();
        size_byte(w, h)
    }
}

// ============================================================================
// SPACING
// ============================================================================

/// # Set Line Spacing (ESC 3 n)
///
/// Sets the line spacing to `n` motion units.
pub fn set_line_spacing(n: u8) -> Vec<u8> {
    with_params(&opcode::LINE_SPACING, &[n])
}

/// # Set Right-Side Character Spacing (ESC SP n)
pub fn set_char_spacing(n: u8) -> Vec<u8> {
    with_params(&opcode::CHAR_SPACING, &[n])
}

// ============================================================================
// RULES
// ============================================================================

/// Character used by [`double_line`].
pub const DOUBLE_RULE: char = '=';

/// Character used by [`dashed_line`].
pub const DASHED_RULE: char = '-';

/// A horizontal rule: `ch` repeated `length` times, then a line feed.
pub fn line(ch: char, length: usize) -> Vec<u8> {
    text_line(ch.to_string().repeat(length))
}

/// `=` rule.
pub fn double_line(length: usize) -> Vec<u8> {
    line(DOUBLE_RULE, length)
}

/// `-` rule.
pub fn dashed_line(length: usize) -> Vec<u8> {
    line(DASHED_RULE, length)
}

// ============================================================================
// TWO-COLUMN LAYOUT
// ============================================================================

/// Left and right text on one line of `width` characters.
///
/// If both fit (`len(left) + len(right) <= width`) the gap is padded with
/// spaces. Otherwise `left` goes on its own line and `right` is printed
/// right-aligned on the next one, after which alignment returns to left.
///
/// Lengths are counted in characters, not bytes.
///
/// ```
/// use tillroll::protocol::text::columns;
///
/// let bytes = columns("A", "B", 5);
/// assert_eq!(bytes, b"A   B\n".to_vec());
/// ```
pub fn columns(left: &str, right: &str, width: usize) -> Vec<u8> {
    let left_len = left.chars().count();
    let right_len = right.chars().count();

    if left_len + right_len <= width {
        let gap = width - left_len - right_len;
        let mut line = String::with_capacity(left.len() + gap + right.len());
        line.push_str(left);
        line.extend(std::iter::repeat_n(' ', gap));
        line.push_str(right);
        text_line(line)
    } else {
        let mut out = text_line(left);
        out.extend(align(Alignment::Right));
        out.extend(text_line(right));
        out.extend(align(Alignment::Left));
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_passthrough() {
        assert_eq!(text("héllo"), "héllo".as_bytes().to_vec());
        assert_eq!(text(b"\x00\xFF"), vec![0x00, 0xFF]);
        assert!(text("").is_empty());
    }

    #[test]
    fn test_text_line() {
        assert_eq!(text_line(""), vec![0x0A]);
        assert_eq!(text_line("Hi"), vec![b'H', b'i', 0x0A]);
    }

    #[test]
    fn test_align() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(set_bold(true), vec![0x1B, 0x45, 0x01]);
        assert_eq!(set_bold(false), vec![0x1B, 0x45, 0x00]);
    }

    #[test]
    fn test_underline() {
        assert_eq!(set_underline(UnderlineMode::Off), vec![0x1B, 0x2D, 0x00]);
        assert_eq!(set_underline(UnderlineMode::Single), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(set_underline(UnderlineMode::Double), vec![0x1B, 0x2D, 0x02]);
    }

    #[test]
    fn test_font() {
        assert_eq!(set_font(Font::A), vec![0x1B, 0x4D, 0x00]);
        assert_eq!(set_font(Font::B), vec![0x1B, 0x4D, 0x01]);
        assert_eq!(set_font(Font::C), vec![0x1B, 0x4D, 0x02]);
    }

    #[test]
    fn test_reverse() {
        assert_eq!(set_reverse(true), vec![0x1D, 0x42, 0x01]);
        assert_eq!(set_reverse(false), vec![0x1D, 0x42, 0x00]);
    }

    #[test]
    fn test_size_byte_formula_for_all_in_range() {
        for w in 1..=8u8 {
            for h in 1..=8u8 {
                assert_eq!(set_text_size(w, h), vec![0x1D, 0x21, ((w - 1) << 4) | (h - 1)]);
            }
        }
    }

    #[test]
    fn test_size_byte_clamps() {
        assert_eq!(size_byte(0, 0), 0x00);
        assert_eq!(size_byte(9, 200), 0x77);
        assert_eq!(size_byte(255, 1), 0x70);
    }

    #[test]
    fn test_text_style_size() {
        let style = TextStyle {
            double_width: true,
            double_height: true,
            ..Default::default()
        };
        assert_eq!(style.size_byte(), 0x11);
        assert_eq!(TextStyle::default().size_byte(), 0x00);
        let tall = TextStyle {
            double_height: true,
            ..Default::default()
        };
        assert_eq!(tall.size_byte(), 0x01);
    }

    #[test]
    fn test_spacing() {
        assert_eq!(set_line_spacing(30), vec![0x1B, 0x33, 30]);
        assert_eq!(set_char_spacing(0), vec![0x1B, 0x20, 0]);
    }

    #[test]
    fn test_rules() {
        let dashed = dashed_line(48);
        assert_eq!(dashed.len(), 49);
        assert!(dashed[..48].iter().all(|&b| b == b'-'));
        assert_eq!(dashed[48], 0x0A);
        assert_eq!(double_line(3), b"===\n".to_vec());
        assert_eq!(line('*', 2), b"**\n".to_vec());
    }

    #[test]
    fn test_columns_item_header() {
        let bytes = columns("ITEM", "QTY  PRICE   TOTAL", 48);
        let expected = format!("ITEM{}QTY  PRICE   TOTAL\n", " ".repeat(26));
        assert_eq!(bytes, expected.into_bytes());
        assert_eq!(bytes.len(), 49);
    }

    #[test]
    fn test_columns_exact_fit_stays_on_one_line() {
        assert_eq!(columns("AB", "CD", 4), b"ABCD\n".to_vec());
    }

    #[test]
    fn test_columns_overflow_falls_back_to_two_lines() {
        let bytes = columns("LONG LEFT", "RIGHT", 10);
        let mut expected = b"LONG LEFT\n".to_vec();
        expected.extend([0x1B, 0x61, 0x02]);
        expected.extend(b"RIGHT\n");
        expected.extend([0x1B, 0x61, 0x00]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_columns_counts_characters() {
        // 4 chars, 8 bytes on the left
        let bytes = columns("ñññ!", "x", 6);
        assert_eq!(bytes, "ñññ! x\n".as_bytes().to_vec());
    }
}
