//! # Code Generation
//!
//! Converts IR ops to ESC/POS commands.

use super::ops::{Command, Op, Program};
use crate::protocol::{barcode, commands, graphics, text};
use crate::transport::BufferSink;

impl Op {
    /// Encode this op as the command of its primitive.
    pub fn encode(&self) -> Command {
        let bytes = match self {
            // ===== Printer Control =====
            Op::Init => commands::initialize(),
            Op::Feed(lines) => commands::feed(*lines),
            Op::FeedReverse(lines) => commands::feed_reverse(*lines),
            Op::Cut { mode, feed_lines } => commands::cut(*mode, *feed_lines),
            Op::DrawerPulse { pin, on_ms, off_ms } => {
                commands::drawer_pulse(*pin, *on_ms, *off_ms)
            }

            // ===== Style Changes =====
            Op::SetAlign(alignment) => text::align(*alignment),
            Op::SetFont(font) => text::set_font(*font),
            Op::SetBold(enabled) => text::set_bold(*enabled),
            Op::SetUnderline(mode) => text::set_underline(*mode),
            Op::SetReverse(enabled) => text::set_reverse(*enabled),
            Op::SetTextSize { width, height } => text::set_text_size(*width, *height),
            Op::SetLineSpacing(n) => text::set_line_spacing(*n),
            Op::SetCharSpacing(n) => text::set_char_spacing(*n),

            // ===== Content =====
            Op::Text(bytes) => text::text(bytes),
            Op::TextLine(bytes) => text::text_line(bytes),
            Op::Rule { ch, length } => text::line(*ch, *length),
            Op::Columns { left, right, width } => text::columns(left, right, *width),
            Op::Raw(bytes) => bytes.clone(),

            // ===== Graphics & Barcodes =====
            Op::Image {
                data,
                width,
                height,
            } => graphics::image(data, *width, *height),
            Op::Barcode(spec) => barcode::barcode(spec),
            Op::QrCode(spec) => barcode::qr::qr_code(spec),
        };
        Command::from(bytes)
    }
}

impl Program {
    /// Encode every op, in order.
    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.ops.iter().map(Op::encode)
    }

    /// Compile the program to one contiguous byte stream.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut sink = BufferSink::new();
        sink.write_program(self);
        sink.into_bytes()
    }
}
