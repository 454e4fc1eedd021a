//! # Intermediate Representation (IR)
//!
//! This module provides the IR layer for receipt printing. The IR sits
//! between the declarative components and the raw ESC/POS commands.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌────────────┐     ┌──────────────┐
//! │ Components  │ ──► │     IR      │ ──► │  Codegen   │ ──► │    Sinks     │
//! │(declarative)│     │  (Vec<Op>)  │     │ (Commands) │     │ buffer / USB │
//! └─────────────┘     └─────────────┘     └────────────┘     └──────────────┘
//! ```
//!
//! There is no optimizer: the printer consumes commands exactly in the
//! order they were emitted.
//!
//! ## Example
//!
//! ```
//! use tillroll::ir::{Op, Program};
//! use tillroll::protocol::text::Alignment;
//!
//! let mut program = Program::with_init();
//! program.push(Op::SetAlign(Alignment::Center));
//! program.push(Op::SetBold(true));
//! program.push(Op::line("HELLO"));
//!
//! let bytes = program.to_bytes();
//! assert!(bytes.ends_with(b"HELLO\n"));
//! ```

mod codegen;
mod ops;

pub use ops::*;
