//! Money formatting for integer-cent amounts.
//!
//! All wallet balances, budgets and invoice amounts are stored as integer
//! cents. Formatting is locale-independent: always a `.` decimal separator
//! and exactly two fraction digits.

/// Formats an amount in cents as a decimal string, e.g. `15000` -> `"150.00"`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_cents(15000), "150.00");
    }

    #[test]
    fn test_format_fractional_amount() {
        assert_eq!(format_cents(12345), "123.45");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(0), "0.00");
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(format_cents(-250), "-2.50");
    }
}
