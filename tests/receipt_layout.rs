//! # Receipt Layout Tests
//!
//! End-to-end checks of the sales receipt: the composed byte stream is
//! compared against the same layout assembled by hand from the command
//! builders.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use tillroll::ir::Op;
use tillroll::protocol::barcode::qr::{self, QrSpec};
use tillroll::protocol::commands::{self, CutMode};
use tillroll::protocol::text::{self, Alignment};
use tillroll::receipt::{
    BusinessSettings, LineItem, ReceiptDocument, ReceiptRequest, TransactionRecord, compose,
};

fn coffee_document(settings: Option<&BusinessSettings>) -> ReceiptDocument {
    let transaction = TransactionRecord {
        id: 5u64.into(),
        created_at: NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .unwrap(),
        cashier_name: Some("alice".into()),
        section: "restaurant".into(),
        payment_method: "cash".into(),
        customer_name: Some("Bob".into()),
        total: 15000.0,
    };
    let items = vec![LineItem {
        item_name: "Coffee".into(),
        quantity: 2,
        price: 3000.0,
        total: 6000.0,
    }];
    ReceiptDocument::assemble(transaction, items, settings).unwrap()
}

/// The coffee receipt, built one command at a time.
fn expected_coffee_bytes() -> Vec<u8> {
    let qr = QrSpec::new(b"RECEIPT:5:15000".to_vec())
        .unwrap()
        .module_size(6);

    let parts: Vec<Vec<u8>> = vec![
        commands::initialize(),
        // Header
        text::align(Alignment::Center),
        text::set_bold(true),
        text::set_text_size(2, 2),
        text::text_line("HGM Properties Ltd"),
        text::set_text_size(1, 1),
        text::set_bold(false),
        text::text_line("+256-XXX-XXXXXX"),
        text::text_line("info@hgmproperties.com"),
        text::text_line("Kampala, Uganda"),
        commands::feed(1),
        text::double_line(48),
        commands::feed(1),
        // Transaction info
        text::align(Alignment::Left),
        text::text_line("Receipt #: 5"),
        text::text_line("Date: 15/01/2024 14:30"),
        text::text_line("Cashier: alice"),
        text::text_line("Section: RESTAURANT"),
        text::text_line("Payment: CASH"),
        commands::feed(1),
        text::dashed_line(48),
        commands::feed(1),
        // Items
        text::columns("ITEM", "QTY  PRICE   TOTAL", 48),
        text::dashed_line(48),
        text::text_line("Coffee"),
        text::align(Alignment::Right),
        text::text_line("  2 x  3,000 =   6,000"),
        text::align(Alignment::Left),
        // Total
        commands::feed(1),
        text::dashed_line(48),
        text::align(Alignment::Center),
        text::set_bold(true),
        text::set_text_size(2, 2),
        text::columns("TOTAL", "UGX 15,000", 48),
        text::set_text_size(1, 1),
        text::set_bold(false),
        commands::feed(1),
        text::double_line(48),
        commands::feed(1),
        // Verification
        text::align(Alignment::Center),
        qr::qr_code(&qr),
        commands::feed(1),
        // Footer
        text::align(Alignment::Center),
        text::text_line("Thank you for your business!"),
        commands::feed(2),
        text::text_line("Powered by HGM POS v2.0"),
        commands::feed(3),
        commands::cut(CutMode::Full, 3),
    ];
    parts.concat()
}

#[test]
fn coffee_receipt_matches_hand_built_stream() {
    let bytes = compose(&coffee_document(None)).to_bytes();
    assert_eq!(bytes, expected_coffee_bytes());
}

#[test]
fn coffee_receipt_key_lines() {
    let bytes = compose(&coffee_document(None)).to_bytes();

    let header = format!("ITEM{}QTY  PRICE   TOTAL\n", " ".repeat(26));
    assert_eq!(header.len(), 49);
    assert!(contains(&bytes, header.as_bytes()));

    let total = format!("TOTAL{}UGX 15,000\n", " ".repeat(48 - 5 - 10));
    assert!(contains(&bytes, total.as_bytes()));

    // QR store: GS ( k pL pH 49 80 48 payload
    let mut store = vec![0x1D, 0x28, 0x6B, 18, 0, 49, 80, 48];
    store.extend_from_slice(b"RECEIPT:5:15000");
    assert!(contains(&bytes, &store));

    // Final feeds: three from the footer, three from the cut
    assert!(bytes.ends_with(&[0x0A, 0x0A, 0x0A, 0x0A, 0x0A, 0x0A, 0x1D, 0x56, 0x00]));
}

#[test]
fn op_order_of_sections() {
    let program = compose(&coffee_document(None));
    let ops = &program.ops;

    let position = |needle: &Op| ops.iter().position(|op| op == needle).unwrap();
    let name = position(&Op::line("HGM Properties Ltd"));
    let receipt_no = position(&Op::line("Receipt #: 5"));
    let item = position(&Op::line("Coffee"));
    let footer = position(&Op::line("Thank you for your business!"));
    let qr = ops
        .iter()
        .position(|op| matches!(op, Op::QrCode(_)))
        .unwrap();

    assert_eq!(ops[0], Op::Init);
    assert!(name < receipt_no);
    assert!(receipt_no < item);
    assert!(item < qr);
    assert!(qr < footer);
}

#[test]
fn custom_settings_replace_defaults_field_by_field() {
    let settings = BusinessSettings {
        business_name: Some("Cafe Java".into()),
        phone: Some("+256-700-000000".into()),
        ..Default::default()
    };
    let program = compose(&coffee_document(Some(&settings)));

    assert!(program.ops.contains(&Op::line("Cafe Java")));
    assert!(program.ops.contains(&Op::line("+256-700-000000")));
    assert!(program.ops.contains(&Op::line("Kampala, Uganda")));
    assert!(!program.ops.contains(&Op::line("HGM Properties Ltd")));
}

#[test]
fn long_item_name_and_overflowing_total() {
    let transaction = TransactionRecord {
        id: "TX-20240115-0001".into(),
        created_at: NaiveDate::from_ymd_opt(2024, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 0))
            .unwrap(),
        cashier_name: None,
        section: "bar".into(),
        payment_method: "mobile_money".into(),
        customer_name: None,
        total: 1_234_567_890_123.0,
    };
    let items = vec![LineItem {
        item_name: "Imported Single Malt Whisky 750ml".into(),
        quantity: 12,
        price: 102_880_657_510.25,
        total: 1_234_567_890_123.0,
    }];
    let doc = ReceiptDocument::assemble(transaction, items, None).unwrap();
    let program = compose(&doc);

    assert!(program.ops.contains(&Op::line("Imported Single Malt")));
    assert!(program.ops.contains(&Op::line("Payment: MOBILE MONEY")));
    assert!(program.ops.contains(&Op::line("Cashier: ")));

    // "TOTAL" + "UGX 1,234,567,890,123" fits 48 columns: one line.
    let bytes = program.to_bytes();
    let total_line = format!("TOTAL{}UGX 1,234,567,890,123\n", " ".repeat(48 - 5 - 21));
    assert!(contains(&bytes, total_line.as_bytes()));
}

#[test]
fn request_json_to_bytes() {
    let request = ReceiptRequest::from_json(
        r#"{
            "transaction": {
                "id": 5,
                "created_at": "2024-01-15T14:30:00",
                "cashier_name": "alice",
                "section": "restaurant",
                "payment_method": "cash",
                "customer_name": "Bob",
                "total": 15000
            },
            "items": [
                { "name": "Coffee", "quantity": 2, "unit_price": 3000, "line_total": 6000 }
            ]
        }"#,
    )
    .unwrap();

    let doc = request.into_document(None).unwrap();
    assert_eq!(doc.to_escpos(), expected_coffee_bytes());
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
