//! # Buffering Sink
//!
//! Append-only byte buffer; cleared only by [`BufferSink::clear`].

use async_trait::async_trait;

use super::CommandSink;
use crate::error::TillrollError;
use crate::ir::{Command, Program};

/// Concatenates command bytes in arrival order.
///
/// ```
/// use tillroll::ir::{Op, Program};
/// use tillroll::transport::BufferSink;
///
/// let mut sink = BufferSink::new();
/// sink.write_program(&Program::with_init());
/// assert_eq!(sink.bytes(), &[0x1B, 0x40]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSink {
    buf: Vec<u8>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, command: &Command) {
        self.buf.extend_from_slice(command.as_bytes());
    }

    /// Append every command of `program`.
    pub fn write_program(&mut self, program: &Program) {
        for command in program.commands() {
            self.write(&command);
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[async_trait]
impl CommandSink for BufferSink {
    async fn send(&mut self, command: Command) -> Result<(), TillrollError> {
        self.write(&command);
        Ok(())
    }
}
