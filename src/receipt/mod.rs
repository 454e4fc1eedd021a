//! # Receipts
//!
//! The receipt a point-of-sale transaction prints: input records, field
//! formatting and the fixed 48-column layout.
//!
//! ```
//! use tillroll::receipt::{compose, ReceiptRequest};
//!
//! let request = ReceiptRequest::from_json(r#"{
//!     "transaction": {
//!         "id": 5, "created_at": "2024-01-15 14:30:00", "cashier_name": "alice",
//!         "section": "bar", "payment_method": "cash", "total": 15000
//!     },
//!     "items": [{ "item_name": "Coffee", "quantity": 2, "price": 3000, "total": 6000 }]
//! }"#)?;
//!
//! let doc = request.into_document(None)?;
//! let bytes = compose(&doc).to_bytes();
//! assert!(bytes.starts_with(&[0x1B, 0x40]));
//! # Ok::<(), tillroll::TillrollError>(())
//! ```

mod composer;
mod delivery;
mod document;
pub mod format;

pub use composer::*;
pub use delivery::*;
pub use document::*;
