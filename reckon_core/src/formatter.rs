//! # Result Formatting
//!
//! Pure string shaping for display and export: fixed-decimal numbers,
//! currency with thousands separators, percentages, and the "N/A"
//! convention for absent values (a non-convergent IRR, a never-recovered
//! payback period). No I/O happens here.

/// Format a number with a fixed number of decimal places.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "N/A".to_string();
    }
    format!("{:.*}", decimals, value)
}

/// Format a currency amount: thousands separators, two decimals.
///
/// Negative amounts keep a leading minus: `-$1,234.56`.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "N/A".to_string();
    }
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Format a percentage with a fixed number of decimals.
pub fn format_percent(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "N/A".to_string();
    }
    format!("{:.*}%", decimals, value)
}

/// Display an optional value, mapping None (and NaN) to "N/A".
pub fn display_or_na(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format_number(v, decimals),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.14159, 2), "3.14");
        assert_eq!(format_number(2.0, 0), "2");
        assert_eq!(format_number(f64::NAN, 2), "N/A");
    }

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(0.5), "$0.50");
        assert_eq!(format_currency(-1234.5), "-$1,234.50");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(6.5, 2), "6.50%");
        assert_eq!(format_percent(f64::NAN, 1), "N/A");
    }

    #[test]
    fn test_display_or_na() {
        assert_eq!(display_or_na(Some(10.0), 2), "10.00");
        assert_eq!(display_or_na(None, 2), "N/A");
        assert_eq!(display_or_na(Some(f64::NAN), 2), "N/A");
    }
}
