//! Field formatting for the 48-column layout.

use chrono::NaiveDateTime;

use super::document::TransactionId;

/// Item names are cut to this many characters.
pub const ITEM_NAME_WIDTH: usize = 20;

/// Round to a whole number (half away from zero) and group thousands with
/// commas: `15000.0` → `"15,000"`, `-1234.5` → `"-1,235"`.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `day/month/year hour:minute`.
pub fn receipt_date(ts: &NaiveDateTime) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

pub fn section_label(section: &str) -> String {
    section.to_uppercase()
}

/// `mobile_money` → `MOBILE MONEY`.
pub fn payment_label(method: &str) -> String {
    method.to_uppercase().replace('_', " ")
}

/// First `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// The right-aligned amounts line under an item name:
/// `"%3d x %6s = %7s"`.
pub fn item_amounts(quantity: i64, price: f64, total: f64) -> String {
    format!(
        "{:>3} x {:>6} = {:>7}",
        quantity,
        group_thousands(price),
        group_thousands(total)
    )
}

pub fn currency(total: f64) -> String {
    format!("UGX {}", group_thousands(total))
}

/// Verification payload: `RECEIPT:{id}:{total}`, the total printed as a
/// plain number (`15000`, `15000.5`).
pub fn verification_payload(id: &TransactionId, total: f64) -> String {
    format!("RECEIPT:{id}:{total}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(3000.0), "3,000");
        assert_eq!(group_thousands(15000.0), "15,000");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(2.5), "3");
        assert_eq!(group_thousands(-1234.5), "-1,235");
        assert_eq!(group_thousands(-0.2), "0");
    }

    #[test]
    fn test_receipt_date() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(9, 7, 59))
            .unwrap();
        assert_eq!(receipt_date(&ts), "05/01/2024 09:07");
    }

    #[test]
    fn test_labels() {
        assert_eq!(section_label("restaurant"), "RESTAURANT");
        assert_eq!(payment_label("mobile_money"), "MOBILE MONEY");
        assert_eq!(payment_label("cash"), "CASH");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Coffee", 20), "Coffee");
        assert_eq!(
            truncate_chars("Grilled Tilapia with Matoke", 20),
            "Grilled Tilapia with"
        );
        assert_eq!(truncate_chars("ÉÉÉ", 2), "ÉÉ");
    }

    #[test]
    fn test_item_amounts() {
        assert_eq!(item_amounts(2, 3000.0, 6000.0), "  2 x  3,000 =   6,000");
        assert_eq!(item_amounts(1, 500.0, 500.0), "  1 x    500 =     500");
        assert_eq!(
            item_amounts(1000, 250000.0, 250000000.0),
            "1000 x 250,000 = 250,000,000"
        );
    }

    #[test]
    fn test_verification_payload() {
        assert_eq!(
            verification_payload(&TransactionId::from(5u64), 15000.0),
            "RECEIPT:5:15000"
        );
        assert_eq!(
            verification_payload(&TransactionId::from("TX-9"), 12.5),
            "RECEIPT:TX-9:12.5"
        );
    }
}
