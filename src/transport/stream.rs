//! # Streaming Sink
//!
//! Sends each command as its own bulk transfer and waits for it to settle
//! before the next one. The printer has no framing to recover from a
//! reordered or partial stream, so after the first failure the sink refuses
//! everything else: the caller reconnects and resends the whole receipt.
//!
//! ## Example
//!
//! ```
//! use tillroll::ir::{Op, Program};
//! use tillroll::transport::{deliver, BulkOut, StreamingSink};
//! use tillroll::TillrollError;
//!
//! struct Recorder(Vec<Vec<u8>>);
//!
//! #[async_trait::async_trait]
//! impl BulkOut for Recorder {
//!     async fn transfer_out(&mut self, data: &[u8]) -> Result<usize, TillrollError> {
//!         self.0.push(data.to_vec());
//!         Ok(data.len())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), TillrollError> {
//!     let mut sink = StreamingSink::new(Recorder(Vec::new()));
//!     let mut program = Program::with_init();
//!     program.push(Op::line("Hello"));
//!     deliver(&program, &mut sink).await?;
//!     assert_eq!(sink.into_inner().0, vec![vec![0x1B, 0x40], b"Hello\n".to_vec()]);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use super::CommandSink;
use crate::error::TillrollError;
use crate::ir::{Command, Program};
use crate::protocol::commands;

/// A bulk-OUT endpoint. One call is one transfer.
#[async_trait]
pub trait BulkOut: Send {
    /// Transfer `data` and return how many bytes the device accepted.
    async fn transfer_out(&mut self, data: &[u8]) -> Result<usize, TillrollError>;
}

#[async_trait]
impl<T: BulkOut + ?Sized> BulkOut for &mut T {
    async fn transfer_out(&mut self, data: &[u8]) -> Result<usize, TillrollError> {
        (**self).transfer_out(data).await
    }
}

/// Streams commands over a [`BulkOut`] endpoint, one transfer per command.
pub struct StreamingSink<T> {
    out: T,
    /// Index of the next command, counting skipped empty ones.
    next_index: usize,
    /// Commands actually transferred.
    sent: usize,
    aborted: bool,
}

impl<T: BulkOut> StreamingSink<T> {
    pub fn new(out: T) -> Self {
        Self {
            out,
            next_index: 0,
            sent: 0,
            aborted: false,
        }
    }

    /// Send the reset sequence (`ESC @`).
    pub async fn initialize(&mut self) -> Result<(), TillrollError> {
        self.send(Command::from(commands::initialize())).await
    }

    /// Stream every command of `program`.
    pub async fn send_program(&mut self, program: &Program) -> Result<usize, TillrollError> {
        super::deliver(program, self).await
    }

    /// Number of commands transferred so far.
    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn get_ref(&self) -> &T {
        &self.out
    }

    pub fn into_inner(self) -> T {
        self.out
    }
}

#[async_trait]
impl<T: BulkOut> CommandSink for StreamingSink<T> {
    async fn send(&mut self, command: Command) -> Result<(), TillrollError> {
        if self.aborted {
            return Err(TillrollError::Aborted { sent: self.sent });
        }

        let index = self.next_index;
        self.next_index += 1;
        if command.is_empty() {
            return Ok(());
        }

        let expected = command.len();
        let failure = match self.out.transfer_out(command.as_bytes()).await {
            Ok(written) if written == expected => {
                self.sent += 1;
                return Ok(());
            }
            Ok(written) => format!("short write: {written} of {expected} bytes"),
            Err(e) => e.to_string(),
        };

        self.aborted = true;
        Err(TillrollError::TransferFailed {
            index,
            reason: failure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Op;

    /// Accepts `budget` transfers, then fails.
    struct Flaky {
        budget: usize,
        seen: Vec<Vec<u8>>,
    }

    #[async_trait]
    impl BulkOut for Flaky {
        async fn transfer_out(&mut self, data: &[u8]) -> Result<usize, TillrollError> {
            if self.seen.len() == self.budget {
                return Err(TillrollError::Transport("pipe error".into()));
            }
            self.seen.push(data.to_vec());
            Ok(data.len())
        }
    }

    struct Short;

    #[async_trait]
    impl BulkOut for Short {
        async fn transfer_out(&mut self, data: &[u8]) -> Result<usize, TillrollError> {
            Ok(data.len() - 1)
        }
    }

    #[tokio::test]
    async fn test_initialize_is_first_transfer() {
        let mut sink = StreamingSink::new(Flaky {
            budget: 10,
            seen: vec![],
        });
        sink.initialize().await.unwrap();
        assert_eq!(sink.sent(), 1);
        assert_eq!(sink.get_ref().seen, vec![vec![0x1B, 0x40]]);
    }

    #[tokio::test]
    async fn test_empty_commands_skipped_but_counted() {
        let mut program = Program::new();
        program.push(Op::Feed(0));
        program.push(Op::line("x"));

        let mut sink = StreamingSink::new(Flaky {
            budget: 10,
            seen: vec![],
        });
        let handed = sink.send_program(&program).await.unwrap();
        assert_eq!(handed, 2);
        assert_eq!(sink.sent(), 1);
        assert_eq!(sink.into_inner().seen, vec![b"x\n".to_vec()]);
    }

    #[tokio::test]
    async fn test_failure_aborts_the_rest() {
        let mut program = Program::with_init();
        program.push(Op::line("one"));
        program.push(Op::line("two"));
        program.push(Op::line("three"));

        let mut sink = StreamingSink::new(Flaky {
            budget: 2,
            seen: vec![],
        });
        let err = sink.send_program(&program).await.unwrap_err();
        match err {
            TillrollError::TransferFailed { index, reason } => {
                assert_eq!(index, 2);
                assert!(reason.contains("pipe error"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(sink.is_aborted());

        let again = sink.send(Command::from(b"four\n".to_vec())).await;
        assert!(matches!(again, Err(TillrollError::Aborted { sent: 2 })));
        assert_eq!(sink.into_inner().seen.len(), 2);
    }

    #[tokio::test]
    async fn test_short_write_is_failure() {
        let mut sink = StreamingSink::new(Short);
        let err = sink.initialize().await.unwrap_err();
        assert!(matches!(
            err,
            TillrollError::TransferFailed { index: 0, ref reason } if reason.contains("short write")
        ));
    }
}
