//! Common display utilities and helpers

/// Placeholder for a missing value
pub const MISSING: &str = "--";

/// Insert thousands separators into the digits of `n`
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole number with thousands separators (e.g., "12,345")
pub fn format_count(n: u32) -> String {
    group_digits(u64::from(n))
}

/// Whole dollars with thousands separators (e.g., "$1,234,567")
pub fn format_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_digits(rounded.abs() as u64))
}

/// One-decimal percentage (e.g., "45.2%")
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Signed change, e.g. "+2.5" or "-1.0"
pub fn format_change(value: f64, decimals: usize) -> String {
    format!("{:+.*}", decimals, value)
}

/// Apply `f` to a present value, or show the placeholder
pub fn or_missing<T>(value: Option<T>, f: impl FnOnce(T) -> String) -> String {
    value.map(f).unwrap_or_else(|| MISSING.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(4_120_385), "4,120,385");
    }

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(18_250.4), "$18,250");
        assert_eq!(format_dollars(18_250.5), "$18,251");
        assert_eq!(format_dollars(-1500.0), "-$1,500");
        assert_eq!(format_dollars(0.0), "$0");
    }

    #[test]
    fn test_format_change_signed() {
        assert_eq!(format_change(2.5, 1), "+2.5");
        assert_eq!(format_change(-1.0, 1), "-1.0");
        assert_eq!(format_change(-42.0, 0), "-42");
    }

    #[test]
    fn test_or_missing() {
        assert_eq!(or_missing(Some(3.0), format_percent), "3.0%");
        assert_eq!(or_missing(None::<f64>, format_percent), "--");
    }
}
