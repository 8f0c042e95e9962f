//! Display formatting for the order table.
//!
//! Money and counts use en-IN digit grouping, purchase dates a compact
//! day-month-year form. Unparseable values render as-is; the table never
//! fails over a formatting problem.

use chrono::NaiveDateTime;

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Wire-format purchase timestamp as shown in the table, e.g.
/// `15 Jun 2025 10:30`. Empty values render as a dash.
pub fn format_date(dt: &str) -> String {
    if dt.is_empty() {
        return "—".to_string();
    }
    match NaiveDateTime::parse_from_str(dt, WIRE_FORMAT) {
        Ok(parsed) => parsed.format("%d %b %Y %H:%M").to_string(),
        Err(_) => dt.to_string(),
    }
}

/// Monetary amount with two decimals, e.g. `₹12,34,567.89`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}₹{}.{}", group_indian(int_part), frac)
}

/// Whole number with digit grouping, e.g. `12,34,567`.
pub fn format_count(n: usize) -> String {
    group_indian(&n.to_string())
}

// en-IN grouping: the last three digits together, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_compactly() {
        assert_eq!(format_date("2025-06-15T10:30:00"), "15 Jun 2025 10:30");
        assert_eq!(format_date("1999-12-31T23:59:59"), "31 Dec 1999 23:59");
    }

    #[test]
    fn odd_dates_pass_through() {
        assert_eq!(format_date(""), "—");
        assert_eq!(format_date("not a date"), "not a date");
        assert_eq!(format_date("2025-06-15T10:30"), "2025-06-15T10:30");
    }

    #[test]
    fn currency_groups_indian_style() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(150.0), "₹150.00");
        assert_eq!(format_currency(1234.5), "₹1,234.50");
        assert_eq!(format_currency(1234567.891), "₹12,34,567.89");
    }

    #[test]
    fn counts_group_without_decimals() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(123456), "1,23,456");
        assert_eq!(format_count(1234567), "12,34,567");
    }
}
