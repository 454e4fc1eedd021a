//! Output formats for an encoded receipt.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use super::document::TransactionId;

/// How encoded receipt bytes leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The ESC/POS bytes as they are.
    #[default]
    Escpos,
    /// A JSON envelope carrying the bytes as base64.
    Raw,
}

/// JSON envelope for [`OutputFormat::Raw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEnvelope {
    pub success: bool,
    pub data: String,
    pub encoding: String,
    pub format: String,
    pub transaction_id: TransactionId,
}

impl RawEnvelope {
    pub fn new(transaction_id: TransactionId, bytes: &[u8]) -> Self {
        Self {
            success: true,
            data: STANDARD.encode(bytes),
            encoding: "base64".into(),
            format: "escpos".into(),
            transaction_id,
        }
    }

    /// The ESC/POS bytes back out of `data`.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// `receipt_{id}.bin`, keeping only `[A-Za-z0-9_-]` of the id so the name
/// can sit inside a quoted `Content-Disposition` parameter.
pub fn attachment_filename(id: &TransactionId) -> String {
    let safe: String = id
        .0
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect();
    format!("receipt_{safe}.bin")
}
