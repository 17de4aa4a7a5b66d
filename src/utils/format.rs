/// Shared 2-decimal formatter for rates and monetary amounts.
///
/// `None` and non-finite values produce an empty display string; everything
/// else is rounded half away from zero to exactly two fractional digits.
/// Used by the chart's y-axis tick labels and by every monetary display.
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let mut rounded = (v * 100.0).round() / 100.0;
            if rounded == 0.0 {
                // Normalize -0.0 so tiny negatives print as "0.00"
                rounded = 0.0;
            }
            format!("{:.2}", rounded)
        }
        _ => String::new(),
    }
}

/// Parse a user-supplied amount.
///
/// Malformed input is rejected with a visible error rather than coerced to
/// zero.
pub fn parse_amount(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("❌ Amount cannot be empty".to_string());
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("❌ Invalid amount: '{}'", trimmed))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("❌ Amount must be a non-negative number, got '{}'", trimmed));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(format_amount(Some(12.0)), "12.00");
        assert_eq!(format_amount(Some(12.345)), "12.35");
        assert_eq!(format_amount(Some(12.344)), "12.34");
        // Exact halves round away from zero
        assert_eq!(format_amount(Some(0.125)), "0.13");
        assert_eq!(format_amount(Some(-0.125)), "-0.13");
    }

    #[test]
    fn test_format_empty_for_missing_or_nonfinite() {
        assert_eq!(format_amount(None), "");
        assert_eq!(format_amount(Some(f64::NAN)), "");
        assert_eq!(format_amount(Some(f64::INFINITY)), "");
        assert_eq!(format_amount("".parse().ok()), "");
    }

    #[test]
    fn test_format_normalizes_negative_zero() {
        assert_eq!(format_amount(Some(-0.0)), "0.00");
        assert_eq!(format_amount(Some(-0.001)), "0.00");
    }

    #[test]
    fn test_parse_amount_accepts_numbers() {
        assert_eq!(parse_amount("100").unwrap(), 100.0);
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_amount_rejects_malformed_input() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }
}
