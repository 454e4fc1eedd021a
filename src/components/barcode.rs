//! # Barcode Components
//!
//! Components for rendering QR codes and 1D barcodes. Payload length is
//! checked when the component is built, so a component that exists always
//! encodes.

use super::Component;
use crate::error::TillrollError;
use crate::ir::Op;
use crate::protocol::barcode::qr::{QrErrorLevel, QrSpec};
use crate::protocol::barcode::{BarcodeSpec, HriPosition, Symbology};
use crate::protocol::text::Alignment;

/// A QR code component.
///
/// ## Example
///
/// ```
/// use tillroll::components::QrCode;
/// use tillroll::protocol::barcode::qr::QrErrorLevel;
///
/// // Simple QR code
/// let qr = QrCode::new("https://example.com")?;
///
/// // With options
/// let qr = QrCode::new("RECEIPT:TXN-1:15000")?
///     .cell_size(8)
///     .error_level(QrErrorLevel::H);
/// # Ok::<(), tillroll::TillrollError>(())
/// ```
pub struct QrCode {
    spec: QrSpec,
    alignment: Option<Alignment>,
}

impl QrCode {
    /// Create a QR code with module size 6 and error correction L.
    pub fn new(data: impl Into<String>) -> Result<Self, TillrollError> {
        let data: String = data.into();
        Ok(Self {
            spec: QrSpec::new(data.into_bytes())?,
            alignment: None,
        })
    }

    /// Wrap a spec that has already been length-checked.
    pub fn from_spec(spec: QrSpec) -> Self {
        Self {
            spec,
            alignment: None,
        }
    }

    /// Set the cell (module) size in dots (1-16).
    pub fn cell_size(mut self, size: u8) -> Self {
        self.spec = self.spec.module_size(size);
        self
    }

    /// Set the error correction level.
    pub fn error_level(mut self, level: QrErrorLevel) -> Self {
        self.spec = self.spec.error_correction(level);
        self
    }

    /// Center the QR code.
    pub fn center(mut self) -> Self {
        self.alignment = Some(Alignment::Center);
        self
    }

    /// Left-align the QR code.
    pub fn left(mut self) -> Self {
        self.alignment = Some(Alignment::Left);
        self
    }
}

impl Component for QrCode {
    fn emit(&self, ops: &mut Vec<Op>) {
        if let Some(alignment) = self.alignment {
            ops.push(Op::SetAlign(alignment));
        }
        ops.push(Op::QrCode(self.spec.clone()));
    }
}

/// A 1D barcode component.
///
/// ## Example
///
/// ```
/// use tillroll::components::Barcode;
///
/// // Code39 barcode
/// let barcode = Barcode::code39("HELLO-123")?;
///
/// // Code128 with custom height
/// let barcode = Barcode::code128("TXN-20240115-001")?.height(100);
/// # Ok::<(), tillroll::TillrollError>(())
/// ```
pub struct Barcode {
    spec: BarcodeSpec,
    alignment: Option<Alignment>,
}

impl Barcode {
    /// Create a barcode of the given symbology.
    pub fn new(data: impl Into<String>, symbology: Symbology) -> Result<Self, TillrollError> {
        let data: String = data.into();
        Ok(Self {
            spec: BarcodeSpec::new(data.into_bytes())?.symbology(symbology),
            alignment: None,
        })
    }

    /// Create a Code39 barcode.
    ///
    /// Code39 supports: A-Z, 0-9, space, - . $ / % +
    pub fn code39(data: impl Into<String>) -> Result<Self, TillrollError> {
        Self::new(data, Symbology::CODE39)
    }

    /// Create a Code128 barcode.
    pub fn code128(data: impl Into<String>) -> Result<Self, TillrollError> {
        Self::new(data, Symbology::CODE128)
    }

    /// Create an EAN-13 barcode.
    pub fn ean13(data: impl Into<String>) -> Result<Self, TillrollError> {
        Self::new(data, Symbology::EAN13)
    }

    /// Set the barcode height in dots (1-255).
    pub fn height(mut self, height: u8) -> Self {
        self.spec = self.spec.height(height);
        self
    }

    /// Set the bar module width in dots (2-6).
    pub fn module_width(mut self, width: u8) -> Self {
        self.spec = self.spec.module_width(width);
        self
    }

    /// Set where the human-readable text goes.
    pub fn hri(mut self, position: HriPosition) -> Self {
        self.spec = self.spec.hri(position);
        self
    }

    /// Center the barcode.
    pub fn center(mut self) -> Self {
        self.alignment = Some(Alignment::Center);
        self
    }
}

impl Component for Barcode {
    fn emit(&self, ops: &mut Vec<Op>) {
        if let Some(alignment) = self.alignment {
            ops.push(Op::SetAlign(alignment));
        }
        ops.push(Op::Barcode(self.spec.clone()));
    }
}
