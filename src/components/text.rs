//! # Text Components
//!
//! Components for displaying text with various styles.

use super::{Component, Emphasis};
use crate::ir::Op;
use crate::protocol::text::Alignment;

/// A text line with optional alignment and emphasis.
///
/// Emits, in order: alignment (if set), bold on, size, the line, normal
/// size, bold off. Alignment is not restored afterwards.
///
/// ## Example
///
/// ```
/// use tillroll::components::*;
///
/// // Simple text
/// let text = Text::new("Hello, World!");
///
/// // Styled text
/// let styled = Text::new("IMPORTANT")
///     .bold()
///     .center()
///     .size(2, 2);
/// ```
pub struct Text {
    content: String,
    newline: bool,
    alignment: Option<Alignment>,
    emphasis: Emphasis,
}

impl Text {
    /// Create a new text component.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            newline: true,
            alignment: None,
            emphasis: Emphasis::default(),
        }
    }

    /// Create inline text (no trailing newline).
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            newline: false,
            ..Self::new(content)
        }
    }

    /// Make text bold.
    pub fn bold(mut self) -> Self {
        self.emphasis.bold = true;
        self
    }

    /// Set width and height multipliers (1-8).
    pub fn size(mut self, width: u8, height: u8) -> Self {
        self.emphasis.size = Some((width, height));
        self
    }

    /// Double width and height.
    pub fn double(self) -> Self {
        self.size(2, 2)
    }

    /// Left-align.
    pub fn left(mut self) -> Self {
        self.alignment = Some(Alignment::Left);
        self
    }

    /// Center.
    pub fn center(mut self) -> Self {
        self.alignment = Some(Alignment::Center);
        self
    }

    /// Right-align.
    pub fn right(mut self) -> Self {
        self.alignment = Some(Alignment::Right);
        self
    }
}

impl Component for Text {
    fn emit(&self, ops: &mut Vec<Op>) {
        if let Some(alignment) = self.alignment {
            ops.push(Op::SetAlign(alignment));
        }
        self.emphasis.open(ops);
        if self.newline {
            ops.push(Op::line(&self.content));
        } else {
            ops.push(Op::text(&self.content));
        }
        self.emphasis.close(ops);
    }
}
