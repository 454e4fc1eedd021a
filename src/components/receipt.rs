//! # Receipt Component
//!
//! The root container for building receipts.

use super::Component;
use crate::ir::Op;
use crate::protocol::commands::{CutMode, DEFAULT_CUT_FEED};

/// Receipt is the root container component.
///
/// It holds child components and optionally feeds and cuts at the end.
///
/// ## Example
///
/// ```
/// use tillroll::components::*;
///
/// let receipt = Receipt::new()
///     .child(Text::new("STORE NAME").center().bold())
///     .child(Divider::dashed())
///     .child(Columns::new("Item", "9,990"))
///     .cut();
///
/// let bytes = receipt.build();
/// ```
pub struct Receipt {
    children: Vec<Box<dyn Component>>,
    cut: Option<CutMode>,
}

impl Default for Receipt {
    fn default() -> Self {
        Self::new()
    }
}

impl Receipt {
    /// Create a new empty receipt.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            cut: None,
        }
    }

    /// Add a child component.
    pub fn child<C: Component + 'static>(mut self, component: C) -> Self {
        self.children.push(Box::new(component));
        self
    }

    /// Add multiple child components.
    pub fn children<I, C>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Component + 'static,
    {
        for c in components {
            self.children.push(Box::new(c));
        }
        self
    }

    /// Feed and full-cut at the end.
    pub fn cut(mut self) -> Self {
        self.cut = Some(CutMode::Full);
        self
    }

    /// Feed and partial-cut at the end (leaves a hinge).
    pub fn partial_cut(mut self) -> Self {
        self.cut = Some(CutMode::Partial);
        self
    }
}

impl Component for Receipt {
    fn emit(&self, ops: &mut Vec<Op>) {
        for child in &self.children {
            child.emit(ops);
        }

        if let Some(mode) = self.cut {
            ops.push(Op::Cut {
                mode,
                feed_lines: DEFAULT_CUT_FEED,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentExt, Text};

    #[test]
    fn test_empty_receipt() {
        let receipt = Receipt::new();
        let ir = receipt.compile();
        // Just Init
        assert_eq!(ir.len(), 1);
        assert_eq!(ir.ops[0], Op::Init);
        assert_eq!(receipt.build(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_receipt_with_cut() {
        let ir = Receipt::new().cut().compile();
        assert_eq!(ir.len(), 2);
        assert_eq!(
            ir.ops[1],
            Op::Cut {
                mode: CutMode::Full,
                feed_lines: 3
            }
        );
    }

    #[test]
    fn test_receipt_with_partial_cut() {
        let bytes = Receipt::new().partial_cut().build();
        assert_eq!(bytes, vec![0x1B, 0x40, 0x0A, 0x0A, 0x0A, 0x1D, 0x56, 0x01]);
    }

    #[test]
    fn test_children_keep_order() {
        let receipt = Receipt::new()
            .child(Text::new("Hello"))
            .children([Text::new("World"), Text::new("!")])
            .cut();

        let ir = receipt.compile();
        assert_eq!(ir.ops[1], Op::line("Hello"));
        assert_eq!(ir.ops[2], Op::line("World"));
        assert_eq!(ir.ops[3], Op::line("!"));
        assert!(matches!(ir.ops.last(), Some(Op::Cut { .. })));
    }
}
