//! # Printer Transport Layer
//!
//! Sinks consume the commands of a [`Program`] in order.
//!
//! ## Available Sinks
//!
//! - [`buffer`]: concatenates every command into one byte blob (files, HTTP)
//! - [`stream`]: one bulk transfer per command, strictly sequential
//! - [`usb`]: the rusb-backed bulk-OUT endpoint behind the streaming sink
//!
//! Both sinks read the same command sequence, so a buffered receipt and a
//! streamed one are byte-for-byte identical.

pub mod buffer;
pub mod stream;
pub mod usb;

pub use buffer::BufferSink;
pub use stream::{BulkOut, StreamingSink};
pub use usb::{DeviceInfo, PrintReport, PrinterStatus, UsbConfig, UsbPrinter};

use async_trait::async_trait;

use crate::error::TillrollError;
use crate::ir::{Command, Program};

/// Something that accepts commands one at a time, in order.
#[async_trait]
pub trait CommandSink: Send {
    /// Accept the next command. Returns only once the command has settled.
    async fn send(&mut self, command: Command) -> Result<(), TillrollError>;
}

#[async_trait]
impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    async fn send(&mut self, command: Command) -> Result<(), TillrollError> {
        (**self).send(command).await
    }
}

/// Send every command of `program` to `sink`, stopping at the first error.
///
/// Returns the number of commands handed over.
pub async fn deliver<S>(program: &Program, sink: &mut S) -> Result<usize, TillrollError>
where
    S: CommandSink + ?Sized,
{
    let mut count = 0;
    for command in program.commands() {
        sink.send(command).await?;
        count += 1;
    }
    Ok(count)
}
