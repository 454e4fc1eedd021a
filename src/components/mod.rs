//! # Declarative Components
//!
//! React-like components for building receipts declaratively.
//!
//! ## Design Philosophy
//!
//! Instead of pushing commands by hand, you describe *what* you want:
//!
//! ```
//! use tillroll::components::*;
//!
//! let receipt = Receipt::new()
//!     .child(Text::new("CHURRA MART").center().bold().size(2, 2))
//!     .child(Divider::double())
//!     .child(Columns::new("Espresso", "4,500"))
//!     .child(QrCode::new("https://example.com")?.center())
//!     .cut();
//!
//! // Compile to IR (inspectable)
//! let ir = receipt.compile();
//! println!("{:#?}", ir);
//!
//! // Generate bytes
//! let bytes = receipt.build();
//! # Ok::<(), tillroll::TillrollError>(())
//! ```
//!
//! ## Component Trait
//!
//! All components implement the `Component` trait, which emits IR ops.
//! Components can be nested (containers hold children). A component emits
//! the same ops every time; emission order is print order.

mod barcode;
mod layout;
mod receipt;
mod text;

pub use barcode::*;
pub use layout::*;
pub use receipt::*;
pub use text::*;

use crate::ir::{Op, Program};

/// Trait for declarative components.
///
/// Components emit IR ops when compiled. This is the core abstraction
/// that enables the declarative receipt building pattern.
pub trait Component {
    /// Emit IR ops for this component into the ops vector.
    fn emit(&self, ops: &mut Vec<Op>);
}

/// Extension trait for compiling components.
pub trait ComponentExt: Component {
    /// Compile this component to an IR program.
    ///
    /// The program starts with an Init op, followed by the component's ops.
    fn compile(&self) -> Program {
        let mut ops = vec![Op::Init];
        self.emit(&mut ops);
        Program { ops }
    }

    /// Compile and generate bytes.
    fn build(&self) -> Vec<u8> {
        self.compile().to_bytes()
    }
}

// Blanket implementation for all components
impl<T: Component> ComponentExt for T {}

// Allow boxed components
impl Component for Box<dyn Component> {
    fn emit(&self, ops: &mut Vec<Op>) {
        self.as_ref().emit(ops);
    }
}

// Allow references to components
impl<T: Component + ?Sized> Component for &T {
    fn emit(&self, ops: &mut Vec<Op>) {
        (*self).emit(ops);
    }
}

/// Bold and size settings wrapped around a single line.
///
/// Opens with bold then size, closes with normal size then bold off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Emphasis {
    pub bold: bool,
    pub size: Option<(u8, u8)>,
}

impl Emphasis {
    pub(crate) fn open(&self, ops: &mut Vec<Op>) {
        if self.bold {
            ops.push(Op::SetBold(true));
        }
        if let Some((width, height)) = self.size {
            ops.push(Op::SetTextSize { width, height });
        }
    }

    pub(crate) fn close(&self, ops: &mut Vec<Op>) {
        if self.size.is_some() {
            ops.push(Op::SetTextSize {
                width: 1,
                height: 1,
            });
        }
        if self.bold {
            ops.push(Op::SetBold(false));
        }
    }
}
