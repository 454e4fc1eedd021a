//! # ESC/POS Barcode Commands
//!
//! Linear barcodes (`GS k`) and QR codes (`GS ( k`).
//!
//! Both commands carry length-prefixed payloads, so their specs are validated
//! when they are built: a spec that exists always encodes to a well-formed
//! command.
//!
//! ## 1D Barcode Usage
//!
//! ```
//! use tillroll::protocol::barcode::{barcode, BarcodeSpec, Symbology};
//!
//! let spec = BarcodeSpec::new(b"HELLO123".to_vec())?.symbology(Symbology::CODE128);
//! let bytes = barcode(&spec);
//! # Ok::<(), tillroll::TillrollError>(())
//! ```
//!
//! ## QR Code Usage
//!
//! ```
//! use tillroll::protocol::barcode::qr::{qr_code, QrSpec};
//!
//! let spec = QrSpec::new(b"RECEIPT:5:15000".to_vec())?.module_size(6);
//! let bytes = qr_code(&spec);
//! # Ok::<(), tillroll::TillrollError>(())
//! ```

use super::commands::{feed, opcode, with_params};
use crate::error::TillrollError;

// ============================================================================
// 1D BARCODE (GS k)
// ============================================================================

/// Maximum payload of a `GS k` barcode (single length byte).
pub const MAX_BARCODE_DATA: usize = u8::MAX as usize;

/// Barcode system byte `m` of `GS k m n d1...dn`.
///
/// Any value the printer accepts can be used; the constants name the
/// length-prefixed "function B" systems from the Epson table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbology(pub u8);

impl Symbology {
    pub const UPC_A: Self = Self(65);
    pub const UPC_E: Self = Self(66);
    pub const EAN13: Self = Self(67);
    pub const EAN8: Self = Self(68);
    pub const CODE39: Self = Self(69);
    pub const ITF: Self = Self(70);
    pub const CODABAR: Self = Self(71);
    pub const CODE93: Self = Self(72);
    pub const CODE128: Self = Self(73);
}

impl Default for Symbology {
    fn default() -> Self {
        Self(73)
    }
}

/// HRI (Human Readable Interpretation) position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HriPosition {
    /// No HRI text printed
    None = 0,
    /// HRI above barcode
    Above = 1,
    /// HRI below barcode (default)
    #[default]
    Below = 2,
    /// HRI above and below
    Both = 3,
}

/// A validated 1D barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeSpec {
    data: Vec<u8>,
    symbology: Symbology,
    height_dots: u8,
    module_width: u8,
    hri: HriPosition,
}

impl BarcodeSpec {
    /// Default bar height in dots.
    pub const DEFAULT_HEIGHT: u8 = 80;
    /// Default module width in dots.
    pub const DEFAULT_MODULE_WIDTH: u8 = 3;

    /// Create a barcode spec with default settings.
    ///
    /// ## Errors
    ///
    /// [`TillrollError::LengthExceeded`] if `data` is longer than 255 bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self, TillrollError> {
        let data = data.into();
        if data.len() > MAX_BARCODE_DATA {
            return Err(TillrollError::LengthExceeded {
                field: "barcode data",
                len: data.len(),
                max: MAX_BARCODE_DATA,
            });
        }
        Ok(Self {
            data,
            symbology: Symbology::default(),
            height_dots: Self::DEFAULT_HEIGHT,
            module_width: Self::DEFAULT_MODULE_WIDTH,
            hri: HriPosition::default(),
        })
    }

    /// Set the barcode system.
    pub fn symbology(mut self, symbology: Symbology) -> Self {
        self.symbology = symbology;
        self
    }

    /// Set the bar height in dots (1-255).
    pub fn height(mut self, dots: u8) -> Self {
        self.height_dots = dots.max(1);
        self
    }

    /// Set the module width in dots (2-6).
    pub fn module_width(mut self, dots: u8) -> Self {
        self.module_width = dots.clamp(2, 6);
        self
    }

    /// Set where the human-readable text is printed.
    pub fn hri(mut self, position: HriPosition) -> Self {
        self.hri = position;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn height_dots(&self) -> u8 {
        self.height_dots
    }

    pub fn width_dots(&self) -> u8 {
        self.module_width
    }

    pub fn hri_position(&self) -> HriPosition {
        self.hri
    }

    pub fn system(&self) -> Symbology {
        self.symbology
    }
}

/// # Print Barcode (GS h, GS w, GS H, GS k)
///
/// ## Sequence
///
/// | Step | Bytes | Purpose |
/// |------|-------|---------|
/// | 1 | `GS h n` | bar height in dots |
/// | 2 | `GS w n` | module width |
/// | 3 | `GS H n` | HRI position |
/// | 4 | `GS k m n d1...dn` | system, length, data |
/// | 5 | `LF` | print and advance |
///
/// ## Example
///
/// ```
/// use tillroll::protocol::barcode::{barcode, BarcodeSpec};
///
/// let spec = BarcodeSpec::new(b"42".to_vec())?;
/// assert_eq!(
///     barcode(&spec),
///     vec![0x1D, 0x68, 80, 0x1D, 0x77, 3, 0x1D, 0x48, 2, 0x1D, 0x6B, 73, 2, b'4', b'2', 0x0A]
/// );
/// # Ok::<(), tillroll::TillrollError>(())
/// ```
pub fn barcode(spec: &BarcodeSpec) -> Vec<u8> {
    let mut out = Vec::with_capacity(14 + spec.data.len());
    out.extend(with_params(&opcode::BARCODE_HEIGHT, &[spec.height_dots]));
    out.extend(with_params(&opcode::BARCODE_WIDTH, &[spec.module_width]));
    out.extend(with_params(&opcode::BARCODE_HRI, &[spec.hri as u8]));
    out.extend_from_slice(&opcode::BARCODE_DATA);
    // Length fits: checked in BarcodeSpec::new
    out.push(spec.symbology.0);
    out.push(spec.data.len() as u8);
    out.extend_from_slice(&spec.data);
    out.extend(feed(1));
    out
}

// ============================================================================
// QR CODE (GS ( k)
// ============================================================================

/// QR code command builders
///
/// A QR code is five `GS ( k` functions sent in order:
///
/// 1. Select model (fn 65)
/// 2. Set module size (fn 67)
/// 3. Set error correction level (fn 69)
/// 4. Store data in the symbol area (fn 80)
/// 5. Print the stored symbol (fn 81)
pub mod qr {
    use super::{feed, opcode};
    use crate::error::TillrollError;

    /// `cn` byte selecting the QR symbol for `GS ( k`.
    const CN_QR: u8 = 49;

    const FN_SELECT_MODEL: u8 = 65;
    const FN_MODULE_SIZE: u8 = 67;
    const FN_ERROR_CORRECTION: u8 = 69;
    const FN_STORE: u8 = 80;
    const FN_PRINT: u8 = 81;

    /// Model 2, the enhanced QR model.
    const MODEL_2: u8 = 50;

    /// Largest stored-length field (`pL + pH * 256`).
    pub const MAX_STORE_LENGTH: usize = u16::MAX as usize;

    /// Bytes counted by the store length in addition to the payload
    /// (`cn`, `fn`, `m`).
    pub const STORE_OVERHEAD: usize = 3;

    /// QR Code error correction level
    ///
    /// | Level | Recovery |
    /// |-------|----------|
    /// | L | ~7% |
    /// | M | ~15% |
    /// | Q | ~25% |
    /// | H | ~30% |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrErrorLevel {
        #[default]
        L = 48,
        M = 49,
        Q = 50,
        H = 51,
    }

    /// A validated QR code.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct QrSpec {
        data: Vec<u8>,
        module_size: u8,
        error_level: QrErrorLevel,
    }

    impl QrSpec {
        /// Default module size in dots.
        pub const DEFAULT_MODULE_SIZE: u8 = 6;

        /// Create a QR spec with default size and error correction.
        ///
        /// ## Errors
        ///
        /// [`TillrollError::LengthExceeded`] if `data.len() + 3` does not fit
        /// the two-byte length field.
        pub fn new(data: impl Into<Vec<u8>>) -> Result<Self, TillrollError> {
            let data = data.into();
            let stored = data.len() + STORE_OVERHEAD;
            if stored > MAX_STORE_LENGTH {
                return Err(TillrollError::LengthExceeded {
                    field: "QR data",
                    len: data.len(),
                    max: MAX_STORE_LENGTH - STORE_OVERHEAD,
                });
            }
            Ok(Self {
                data,
                module_size: Self::DEFAULT_MODULE_SIZE,
                error_level: QrErrorLevel::default(),
            })
        }

        /// Set the module (cell) size in dots, clamped to 1-16.
        pub fn module_size(mut self, dots: u8) -> Self {
            self.module_size = dots.clamp(1, 16);
            self
        }

        /// Set the error correction level.
        pub fn error_correction(mut self, level: QrErrorLevel) -> Self {
            self.error_level = level;
            self
        }

        pub fn data(&self) -> &[u8] {
            &self.data
        }

        pub fn size(&self) -> u8 {
            self.module_size
        }

        pub fn error_level(&self) -> QrErrorLevel {
            self.error_level
        }

        /// The stored-length field value: payload length + 3.
        pub fn store_length(&self) -> u16 {
            (self.data.len() + STORE_OVERHEAD) as u16
        }
    }

    fn function(params_len: u16, body: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(5 + body.len());
        out.extend_from_slice(&opcode::SYMBOL_2D);
        out.push((params_len % 256) as u8);
        out.push((params_len / 256) as u8);
        out.extend_from_slice(body);
        out
    }

    /// `GS ( k 04 00 31 41 32 00`: select model 2.
    pub fn select_model() -> Vec<u8> {
        function(4, &[CN_QR, FN_SELECT_MODEL, MODEL_2, 0])
    }

    /// `GS ( k 03 00 31 43 n`: module size.
    pub fn set_module_size(dots: u8) -> Vec<u8> {
        function(3, &[CN_QR, FN_MODULE_SIZE, dots])
    }

    /// `GS ( k 03 00 31 45 n`: error correction level.
    pub fn set_error_correction(level: QrErrorLevel) -> Vec<u8> {
        function(3, &[CN_QR, FN_ERROR_CORRECTION, level as u8])
    }

    /// `GS ( k pL pH 31 50 30 d1...dk`: store data.
    ///
    /// `pL + pH * 256 = k + 3`.
    pub fn store_data(spec: &QrSpec) -> Vec<u8> {
        let mut out = function(spec.store_length(), &[CN_QR, FN_STORE, b'0']);
        out.extend_from_slice(&spec.data);
        out
    }

    /// `GS ( k 03 00 31 51 30`: print the stored symbol.
    pub fn print() -> Vec<u8> {
        function(3, &[CN_QR, FN_PRINT, b'0'])
    }

    /// # Print QR Code
    ///
    /// The five functions in order, followed by one line feed.
    pub fn qr_code(spec: &QrSpec) -> Vec<u8> {
        let mut out = Vec::with_capacity(40 + spec.data.len());
        out.extend(select_model());
        out.extend(set_module_size(spec.module_size));
        out.extend(set_error_correction(spec.error_level));
        out.extend(store_data(spec));
        out.extend(print());
        out.extend(feed(1));
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================
