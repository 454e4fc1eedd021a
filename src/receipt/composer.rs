//! # Receipt Composer
//!
//! Lays a [`ReceiptDocument`] out on 48-column paper. Each section is a
//! component borrowing the document; [`compose`] strings them together in
//! print order.
//!
//! ```text
//!             HGM Properties Ltd            (bold, 2x2)
//!               +256-XXX-XXXXXX
//! ================================================
//! Receipt #: 5
//! Date: 15/01/2024 14:30
//! ...
//! ------------------------------------------------
//! ITEM                          QTY  PRICE   TOTAL
//! ------------------------------------------------
//! Coffee
//!                           2 x  3,000 =   6,000
//! ```

use super::document::ReceiptDocument;
use super::format::{
    ITEM_NAME_WIDTH, currency, item_amounts, payment_label, receipt_date, section_label,
    truncate_chars,
};
use crate::components::{
    Columns, Component, ComponentExt, Divider, QrCode, Raw, Receipt, Spacer, Text,
};
use crate::ir::{Op, Program};
use crate::protocol::text::Alignment;

/// Printed under the footer on every receipt.
pub const BRANDING_LINE: &str = "Powered by HGM POS v2.0";

/// Column header for the item table.
pub const ITEM_HEADER: (&str, &str) = ("ITEM", "QTY  PRICE   TOTAL");

/// QR module size for the verification code.
pub const VERIFICATION_QR_SIZE: u8 = 6;

/// Business name, contact lines and the opening double rule.
pub struct BusinessHeader<'a>(pub &'a ReceiptDocument);

impl Component for BusinessHeader<'_> {
    fn emit(&self, ops: &mut Vec<Op>) {
        let doc = self.0;
        Text::new(&doc.business_name)
            .center()
            .bold()
            .double()
            .emit(ops);
        Text::new(&doc.phone).emit(ops);
        Text::new(&doc.email).emit(ops);
        Text::new(&doc.address).emit(ops);
        Spacer::line().emit(ops);
        Divider::double().emit(ops);
        Spacer::line().emit(ops);
    }
}

/// Receipt number, date, cashier, section and payment method.
pub struct TransactionInfo<'a>(pub &'a ReceiptDocument);

impl Component for TransactionInfo<'_> {
    fn emit(&self, ops: &mut Vec<Op>) {
        let doc = self.0;
        Text::new(format!("Receipt #: {}", doc.transaction_id))
            .left()
            .emit(ops);
        Text::new(format!("Date: {}", receipt_date(&doc.created_at))).emit(ops);
        Text::new(format!("Cashier: {}", doc.cashier_name)).emit(ops);
        Text::new(format!("Section: {}", section_label(&doc.section))).emit(ops);
        Text::new(format!("Payment: {}", payment_label(&doc.payment_method))).emit(ops);
        Spacer::line().emit(ops);
        Divider::dashed().emit(ops);
        Spacer::line().emit(ops);
    }
}

/// Column header, then two lines per item: the name, and the right-aligned
/// quantity/price/total.
pub struct ItemTable<'a>(pub &'a ReceiptDocument);

impl Component for ItemTable<'_> {
    fn emit(&self, ops: &mut Vec<Op>) {
        let (left, right) = ITEM_HEADER;
        Columns::new(left, right).emit(ops);
        Divider::dashed().emit(ops);

        for item in &self.0.lines {
            Text::new(truncate_chars(&item.item_name, ITEM_NAME_WIDTH)).emit(ops);
            Text::new(item_amounts(item.quantity, item.price, item.total))
                .right()
                .emit(ops);
            Raw::op(Op::SetAlign(Alignment::Left)).emit(ops);
        }
    }
}

/// Bold double-size grand total between rules.
pub struct TotalBlock<'a>(pub &'a ReceiptDocument);

impl Component for TotalBlock<'_> {
    fn emit(&self, ops: &mut Vec<Op>) {
        Spacer::line().emit(ops);
        Divider::dashed().emit(ops);
        Columns::new("TOTAL", currency(self.0.total))
            .center()
            .bold()
            .size(2, 2)
            .emit(ops);
        Spacer::line().emit(ops);
        Divider::double().emit(ops);
        Spacer::line().emit(ops);
    }
}

/// Centered QR code carrying `RECEIPT:{id}:{total}`.
pub struct VerificationCode<'a>(pub &'a ReceiptDocument);

impl Component for VerificationCode<'_> {
    fn emit(&self, ops: &mut Vec<Op>) {
        QrCode::from_spec(self.0.verification_code.clone())
            .cell_size(VERIFICATION_QR_SIZE)
            .center()
            .emit(ops);
        Spacer::line().emit(ops);
    }
}

/// Footer message and branding, fed clear of the cutter.
pub struct Footer<'a>(pub &'a ReceiptDocument);

impl Component for Footer<'_> {
    fn emit(&self, ops: &mut Vec<Op>) {
        Text::new(&self.0.footer_message).center().emit(ops);
        Spacer::lines(2).emit(ops);
        Text::new(BRANDING_LINE).emit(ops);
        Spacer::lines(3).emit(ops);
    }
}

/// The whole receipt as one component: every section, then a full cut.
pub struct ReceiptLayout<'a>(pub &'a ReceiptDocument);

impl Component for ReceiptLayout<'_> {
    fn emit(&self, ops: &mut Vec<Op>) {
        let doc = self.0;
        BusinessHeader(doc).emit(ops);
        TransactionInfo(doc).emit(ops);
        ItemTable(doc).emit(ops);
        TotalBlock(doc).emit(ops);
        VerificationCode(doc).emit(ops);
        Footer(doc).emit(ops);
        Receipt::new().cut().emit(ops);
    }
}

/// Compose the receipt program, starting with initialize.
pub fn compose(doc: &ReceiptDocument) -> Program {
    ReceiptLayout(doc).compile()
}

impl ReceiptDocument {
    /// Compose and encode the receipt as one byte stream.
    pub fn to_escpos(&self) -> Vec<u8> {
        compose(self).to_bytes()
    }
}
