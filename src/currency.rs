//! Rupee amount formatting and parsing

/// Format a whole-rupee amount with Indian digit grouping, e.g. `₹1,00,000`.
#[must_use]
pub fn format_inr(amount: u128) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("₹{},{tail}", groups.join(","))
}

/// Format a rupee amount, keeping paise when present, e.g. `₹12,345.67`.
///
/// Rounds to the nearest paisa; whole amounts render like [`format_inr`].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_inr_amount(amount: f64) -> String {
    let paise = (amount.max(0.0) * 100.0).round() as u128;
    match paise % 100 {
        0 => format_inr(paise / 100),
        fraction => format!("{}.{fraction:02}", format_inr(paise / 100)),
    }
}

/// Parse a user-entered amount such as `"10000"`, `"₹10,000"` or `"Rs. 2,500"`.
///
/// Returns `None` when nothing numeric remains after stripping the currency
/// marker, grouping commas and whitespace.
#[must_use]
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix('₹')
        .or_else(|| trimmed.strip_prefix("Rs."))
        .or_else(|| trimmed.strip_prefix("Rs"))
        .unwrap_or(trimmed);

    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "₹0")]
    #[case(975, "₹975")]
    #[case(1500, "₹1,500")]
    #[case(10000, "₹10,000")]
    #[case(100000, "₹1,00,000")]
    #[case(6499, "₹6,499")]
    #[case(12345678, "₹1,23,45,678")]
    fn test_format_inr(#[case] amount: u128, #[case] expected: &str) {
        assert_eq!(format_inr(amount), expected);
    }

    #[rstest]
    #[case(10000.0, "₹10,000")]
    #[case(12345.67, "₹12,345.67")]
    #[case(1500.5, "₹1,500.50")]
    #[case(99.999, "₹100")]
    #[case(0.05, "₹0.05")]
    fn test_format_inr_amount(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(format_inr_amount(amount), expected);
    }

    #[rstest]
    #[case("10000", Some(10000.0))]
    #[case(" ₹10,000 ", Some(10000.0))]
    #[case("Rs. 2,500", Some(2500.0))]
    #[case("1500.50", Some(1500.5))]
    #[case("ten thousand", None)]
    #[case("₹", None)]
    #[case("", None)]
    #[case("inf", None)]
    fn test_parse_amount(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_amount(input), expected);
    }
}
