//! # Layout Components
//!
//! Components for controlling layout and spacing.

use super::{Component, Emphasis};
use crate::ir::Op;
use crate::printer::PrinterConfig;
use crate::protocol::text::{Alignment, DASHED_RULE, DOUBLE_RULE};

/// Divider style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DividerStyle {
    /// Dashed line (default): ------------
    #[default]
    Dashed,
    /// Double line: ============
    Double,
}

/// A horizontal divider line.
///
/// ## Example
///
/// ```
/// use tillroll::components::{Divider, DividerStyle};
///
/// let dashed = Divider::dashed();
/// let double = Divider::new(DividerStyle::Double).width(32);
/// ```
pub struct Divider {
    style: DividerStyle,
    width: usize,
}

impl Divider {
    /// Create a divider with a specific style, full paper width.
    pub fn new(style: DividerStyle) -> Self {
        Self {
            style,
            width: PrinterConfig::THERMAL_80MM.columns,
        }
    }

    /// Create a dashed divider.
    pub fn dashed() -> Self {
        Self::new(DividerStyle::Dashed)
    }

    /// Create a double-line divider.
    pub fn double() -> Self {
        Self::new(DividerStyle::Double)
    }

    /// Set the character width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::dashed()
    }
}

impl Component for Divider {
    fn emit(&self, ops: &mut Vec<Op>) {
        let ch = match self.style {
            DividerStyle::Dashed => DASHED_RULE,
            DividerStyle::Double => DOUBLE_RULE,
        };
        ops.push(Op::Rule {
            ch,
            length: self.width,
        });
    }
}

/// A vertical spacer (line feeds).
///
/// ## Example
///
/// ```
/// use tillroll::components::Spacer;
///
/// let one = Spacer::line();
/// let three = Spacer::lines(3);
/// ```
pub struct Spacer {
    lines: u8,
}

impl Spacer {
    /// Feed `n` lines.
    pub fn lines(n: u8) -> Self {
        Self { lines: n }
    }

    /// Feed one line.
    pub fn line() -> Self {
        Self::lines(1)
    }
}

impl Component for Spacer {
    fn emit(&self, ops: &mut Vec<Op>) {
        if self.lines > 0 {
            ops.push(Op::Feed(self.lines));
        }
    }
}

/// A two-column layout (left and right text on the same line).
///
/// When the two texts do not fit the width, the right text moves to its own
/// right-aligned line (see [`crate::protocol::text::columns`]).
///
/// ## Example
///
/// ```
/// use tillroll::components::Columns;
///
/// let row = Columns::new("Label:", "Value");
/// let total = Columns::new("TOTAL", "UGX 15,000").bold().size(2, 2);
/// ```
pub struct Columns {
    left: String,
    right: String,
    width: usize,
    alignment: Option<Alignment>,
    emphasis: Emphasis,
}

impl Columns {
    /// Create a two-column row, full paper width.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            width: PrinterConfig::THERMAL_80MM.columns,
            alignment: None,
            emphasis: Emphasis::default(),
        }
    }

    /// Set the character width.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Center the row. Only visible when the columns wrap onto two lines.
    pub fn center(mut self) -> Self {
        self.alignment = Some(Alignment::Center);
        self
    }

    /// Make the row bold.
    pub fn bold(mut self) -> Self {
        self.emphasis.bold = true;
        self
    }

    /// Set width and height multipliers for the row.
    pub fn size(mut self, width: u8, height: u8) -> Self {
        self.emphasis.size = Some((width, height));
        self
    }
}

impl Component for Columns {
    fn emit(&self, ops: &mut Vec<Op>) {
        if let Some(alignment) = self.alignment {
            ops.push(Op::SetAlign(alignment));
        }
        self.emphasis.open(ops);
        ops.push(Op::Columns {
            left: self.left.clone(),
            right: self.right.clone(),
            width: self.width,
        });
        self.emphasis.close(ops);
    }
}

/// Raw bytes or ops - escape hatch for direct protocol access.
///
/// ## Example
///
/// ```
/// use tillroll::components::Raw;
/// use tillroll::ir::Op;
///
/// // From raw bytes
/// let raw = Raw::bytes(vec![0x1B, 0x40]);
///
/// // From ops
/// let raw = Raw::ops(vec![Op::Init, Op::SetBold(true)]);
/// ```
pub struct Raw {
    ops: Vec<Op>,
}

impl Raw {
    /// Create from raw bytes.
    pub fn bytes(data: Vec<u8>) -> Self {
        Self {
            ops: vec![Op::Raw(data)],
        }
    }

    /// Create from IR ops.
    pub fn ops(ops: Vec<Op>) -> Self {
        Self { ops }
    }

    /// Create a single op.
    pub fn op(op: Op) -> Self {
        Self { ops: vec![op] }
    }
}

impl Component for Raw {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.extend(self.ops.iter().cloned());
    }
}
