//! Receipt input: the records handed over by the data layer, and the
//! flattened [`ReceiptDocument`] the composer reads.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::format::verification_payload;
use crate::error::TillrollError;
use crate::protocol::barcode::qr::QrSpec;

pub const DEFAULT_BUSINESS_NAME: &str = "HGM Properties Ltd";
pub const DEFAULT_PHONE: &str = "+256-XXX-XXXXXX";
pub const DEFAULT_EMAIL: &str = "info@hgmproperties.com";
pub const DEFAULT_ADDRESS: &str = "Kampala, Uganda";
pub const DEFAULT_FOOTER: &str = "Thank you for your business!";

/// Longest transaction id accepted. Keeps the QR payload well inside its
/// two-byte length field.
pub const MAX_TRANSACTION_ID: usize = 255;

/// Business settings as stored. Every field is optional; missing ones fall
/// back to the defaults one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessSettings {
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub footer_message: Option<String>,
}

impl BusinessSettings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TillrollError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn business_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or(DEFAULT_BUSINESS_NAME)
    }

    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or(DEFAULT_PHONE)
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_EMAIL)
    }

    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or(DEFAULT_ADDRESS)
    }

    pub fn footer_message(&self) -> &str {
        self.footer_message.as_deref().unwrap_or(DEFAULT_FOOTER)
    }
}

/// Transaction identifier. Accepts a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for TransactionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// A transaction as delivered by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub cashier_name: Option<String>,
    pub section: String,
    pub payment_method: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub total: f64,
}

/// One item line of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(alias = "name")]
    pub item_name: String,
    pub quantity: i64,
    #[serde(alias = "unit_price")]
    pub price: f64,
    #[serde(alias = "line_total")]
    pub total: f64,
}

/// Everything needed to print one receipt, as one JSON object.
///
/// ```json
/// {
///   "transaction": { "id": 5, "created_at": "2024-01-15 14:30:00", ... },
///   "items": [{ "item_name": "Coffee", "quantity": 2, "price": 3000, "total": 6000 }],
///   "settings": { "business_name": "Cafe" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRequest {
    pub transaction: TransactionRecord,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub settings: Option<BusinessSettings>,
}

impl ReceiptRequest {
    pub fn from_json(raw: &str) -> Result<Self, TillrollError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TillrollError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Build the document. Settings carried in the request win over
    /// `fallback`; missing fields then take the defaults.
    pub fn into_document(
        self,
        fallback: Option<&BusinessSettings>,
    ) -> Result<ReceiptDocument, TillrollError> {
        let settings = self.settings.as_ref().or(fallback);
        ReceiptDocument::assemble(self.transaction, self.items, settings)
    }
}

/// A receipt with every field resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptDocument {
    pub business_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub footer_message: String,
    pub transaction_id: TransactionId,
    pub created_at: NaiveDateTime,
    pub cashier_name: String,
    pub section: String,
    pub payment_method: String,
    pub customer_name: Option<String>,
    pub lines: Vec<LineItem>,
    pub total: f64,
    /// QR payload `RECEIPT:{id}:{total}`, length-checked at assembly.
    pub verification_code: QrSpec,
}

impl ReceiptDocument {
    /// Merge a transaction, its items and the business settings.
    ///
    /// ## Errors
    ///
    /// [`TillrollError::LengthExceeded`] if the transaction id is longer than
    /// [`MAX_TRANSACTION_ID`].
    pub fn assemble(
        transaction: TransactionRecord,
        lines: Vec<LineItem>,
        settings: Option<&BusinessSettings>,
    ) -> Result<Self, TillrollError> {
        let id_len = transaction.id.0.len();
        if id_len > MAX_TRANSACTION_ID {
            return Err(TillrollError::LengthExceeded {
                field: "transaction id",
                len: id_len,
                max: MAX_TRANSACTION_ID,
            });
        }

        let payload = verification_payload(&transaction.id, transaction.total);
        let verification_code = QrSpec::new(payload.into_bytes())?;

        let defaults = BusinessSettings::default();
        let settings = settings.unwrap_or(&defaults);

        Ok(Self {
            business_name: settings.business_name().to_string(),
            phone: settings.phone().to_string(),
            email: settings.email().to_string(),
            address: settings.address().to_string(),
            footer_message: settings.footer_message().to_string(),
            transaction_id: transaction.id,
            created_at: transaction.created_at,
            cashier_name: transaction.cashier_name.unwrap_or_default(),
            section: transaction.section,
            payment_method: transaction.payment_method,
            customer_name: transaction.customer_name,
            lines,
            total: transaction.total,
            verification_code,
        })
    }
}

/// Parse the timestamp formats the data layer produces.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, TillrollError> {
    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    let raw = raw.trim();
    for format in FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.naive_local())
        .map_err(|_| TillrollError::InvalidDocument(format!("unrecognised timestamp {raw:?}")))
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
