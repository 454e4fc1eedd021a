//! # Streaming Sink Tests
//!
//! The USB endpoint is replaced by an in-memory device that records each
//! transfer, so ordering and abort behaviour can be checked without
//! hardware.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use tillroll::TillrollError;
use tillroll::ir::{Command, Op, Program};
use tillroll::protocol::commands::DrawerPin;
use tillroll::receipt::{LineItem, ReceiptDocument, TransactionRecord, compose};
use tillroll::transport::{BufferSink, BulkOut, CommandSink, StreamingSink, deliver};

/// Records transfers; fails the transfer at `fail_at` if set.
#[derive(Default)]
struct MockDevice {
    transfers: Vec<Vec<u8>>,
    fail_at: Option<usize>,
    in_flight: Arc<AtomicUsize>,
}

#[async_trait]
impl BulkOut for MockDevice {
    async fn transfer_out(&mut self, data: &[u8]) -> Result<usize, TillrollError> {
        let before = self.in_flight.fetch_add(1, Ordering::SeqCst);
        assert_eq!(before, 0, "two transfers in flight");
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_at == Some(self.transfers.len()) {
            return Err(TillrollError::Transport("endpoint stalled".into()));
        }
        self.transfers.push(data.to_vec());
        Ok(data.len())
    }
}

fn receipt_program() -> Program {
    let transaction = TransactionRecord {
        id: 5u64.into(),
        created_at: NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .unwrap(),
        cashier_name: Some("alice".into()),
        section: "restaurant".into(),
        payment_method: "cash".into(),
        customer_name: None,
        total: 15000.0,
    };
    let items = vec![
        LineItem {
            item_name: "Coffee".into(),
            quantity: 2,
            price: 3000.0,
            total: 6000.0,
        },
        LineItem {
            item_name: "Rolex".into(),
            quantity: 3,
            price: 3000.0,
            total: 9000.0,
        },
    ];
    let doc = ReceiptDocument::assemble(transaction, items, None).unwrap();
    compose(&doc)
}

#[tokio::test]
async fn streamed_transfers_equal_buffered_bytes() {
    let program = receipt_program();

    let mut sink = StreamingSink::new(MockDevice::default());
    let handed = deliver(&program, &mut sink).await.unwrap();
    assert_eq!(handed, program.len());

    let device = sink.into_inner();
    let expected: Vec<Vec<u8>> = program
        .commands()
        .filter(|c| !c.is_empty())
        .map(Command::into_bytes)
        .collect();
    assert_eq!(device.transfers, expected);

    let mut buffer = BufferSink::new();
    buffer.write_program(&program);
    assert_eq!(device.transfers.concat(), buffer.into_bytes());
}

#[tokio::test]
async fn one_transfer_per_primitive() {
    let mut program = Program::with_init();
    program.push(Op::SetBold(true));
    program.push(Op::line("TOTAL"));
    program.push(Op::DrawerPulse {
        pin: DrawerPin::Pin2,
        on_ms: 100,
        off_ms: 500,
    });

    let mut sink = StreamingSink::new(MockDevice::default());
    sink.send_program(&program).await.unwrap();

    assert_eq!(
        sink.into_inner().transfers,
        vec![
            vec![0x1B, 0x40],
            vec![0x1B, 0x45, 0x01],
            b"TOTAL\n".to_vec(),
            vec![0x1B, 0x70, 0x00, 50, 250],
        ]
    );
}

#[tokio::test]
async fn failure_stops_the_job_at_the_failing_command() {
    let program = receipt_program();
    let device = MockDevice {
        fail_at: Some(10),
        ..Default::default()
    };

    let mut sink = StreamingSink::new(device);
    let err = deliver(&program, &mut sink).await.unwrap_err();
    assert!(matches!(err, TillrollError::TransferFailed { index: 10, .. }));
    assert_eq!(sink.sent(), 10);

    // Nothing after the failure reaches the device.
    let next = sink.send(Command::from(b"late\n".to_vec())).await;
    assert!(matches!(next, Err(TillrollError::Aborted { sent: 10 })));

    let device = sink.into_inner();
    assert_eq!(device.transfers.len(), 10);
    let prefix: Vec<Vec<u8>> = program
        .commands()
        .take(10)
        .map(Command::into_bytes)
        .collect();
    assert_eq!(device.transfers, prefix);
}

#[tokio::test]
async fn restart_after_abort_needs_a_fresh_sink() {
    let program = receipt_program();

    let mut first = StreamingSink::new(MockDevice {
        fail_at: Some(3),
        ..Default::default()
    });
    assert!(first.initialize().await.is_ok());
    assert!(deliver(&program, &mut first).await.is_err());
    assert!(first.is_aborted());

    let mut second = StreamingSink::new(MockDevice::default());
    second.initialize().await.unwrap();
    deliver(&program, &mut second).await.unwrap();

    let transfers = second.into_inner().transfers;
    assert_eq!(transfers[0], vec![0x1B, 0x40]);
    assert_eq!(transfers[1..].concat(), program.to_bytes());
}

#[tokio::test]
async fn sinks_are_interchangeable_behind_the_trait() {
    let program = receipt_program();

    let mut buffer = BufferSink::new();
    let mut stream = StreamingSink::new(MockDevice::default());
    {
        let sinks: [&mut dyn CommandSink; 2] = [&mut buffer, &mut stream];
        for sink in sinks {
            deliver(&program, sink).await.unwrap();
        }
    }

    assert_eq!(buffer.bytes(), stream.into_inner().transfers.concat());
}
