//! # Printer Configuration
//!
//! Paper geometry for ESC/POS receipt printers, and the vendor IDs accepted
//! when looking for one on the USB bus.
//!
//! ## Supported Paper
//!
//! | Paper | Columns (Font A) | Width (dots) | Resolution |
//! |-------|------------------|--------------|------------|
//! | 80 mm | 48 | 576 | 203 DPI |
//!
//! ## Usage
//!
//! ```
//! use tillroll::printer::PrinterConfig;
//!
//! let config = PrinterConfig::THERMAL_80MM;
//! assert_eq!(config.columns, 48);
//! ```

/// Paper geometry as the layout sees it: characters per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Characters per line in Font A at normal size
    pub columns: usize,
}

impl PrinterConfig {
    /// # 80 mm Thermal Roll
    ///
    /// ```text
    /// ├── 4mm ──┼────── 72mm printable ──────┼── 4mm ──┤
    /// │ margin  │    576 dots / 48 columns   │ margin  │
    /// ```
    ///
    /// Font A is 12 dots wide, so 576 dots hold 48 columns.
    pub const THERMAL_80MM: Self = Self { columns: 48 };
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::THERMAL_80MM
    }
}

// ============================================================================
// USB VENDORS
// ============================================================================

/// A receipt-printer manufacturer known by its USB vendor ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vendor {
    pub id: u16,
    pub name: &'static str,
}

/// Vendor IDs accepted during device discovery.
pub const KNOWN_VENDORS: &[Vendor] = &[
    Vendor { id: 0x04B8, name: "Epson" },
    Vendor { id: 0x0519, name: "Star Micronics" },
    Vendor { id: 0x1D90, name: "Citizen" },
    Vendor { id: 0x1504, name: "Bixolon" },
    Vendor { id: 0x0DD4, name: "Custom" },
    Vendor { id: 0x0A5F, name: "Zebra" },
];

/// Manufacturer for a vendor ID, if it is on the list.
pub fn vendor_name(id: u16) -> Option<&'static str> {
    KNOWN_VENDORS.iter().find(|v| v.id == id).map(|v| v.name)
}

/// All known vendor IDs.
pub fn known_vendor_ids() -> Vec<u16> {
    KNOWN_VENDORS.iter().map(|v| v.id).collect()
}

/// Parse a vendor given as a name (`epson`) or hex ID (`0x04b8`, `04B8`).
pub fn parse_vendor(s: &str) -> Result<u16, String> {
    let trimmed = s.trim();
    let by_name = KNOWN_VENDORS.iter().find(|v| {
        v.name.eq_ignore_ascii_case(trimmed)
            || v.name
                .split(' ')
                .next()
                .is_some_and(|first| first.eq_ignore_ascii_case(trimmed))
    });
    if let Some(vendor) = by_name {
        return Ok(vendor.id);
    }

    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u16::from_str_radix(hex, 16)
        .map_err(|_| format!("Unknown vendor '{}'. Use a name or hex ID", s))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_80mm() {
        assert_eq!(PrinterConfig::default(), PrinterConfig::THERMAL_80MM);
        assert_eq!(PrinterConfig::default().columns, 48);
    }

    #[test]
    fn test_vendor_table() {
        assert_eq!(vendor_name(0x04B8), Some("Epson"));
        assert_eq!(vendor_name(0x0A5F), Some("Zebra"));
        assert_eq!(vendor_name(0x1234), None);
        assert_eq!(known_vendor_ids().len(), 6);
    }

    #[test]
    fn test_parse_vendor() {
        assert_eq!(parse_vendor("epson"), Ok(0x04B8));
        assert_eq!(parse_vendor("Star"), Ok(0x0519));
        assert_eq!(parse_vendor("0x1d90"), Ok(0x1D90));
        assert_eq!(parse_vendor("1504"), Ok(0x1504));
        assert!(parse_vendor("nope").is_err());
    }
}
