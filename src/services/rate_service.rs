use crate::api::currency::{ConvertResponse, CurrencyClient, HistoryRecord, LatestResponse};
use crate::models::sample::{narrow_history, Sample};

/// Validate a currency code: 3–5 ASCII letters, normalized to uppercase
pub fn parse_code(input: &str) -> Result<String, String> {
    let code = input.trim().to_uppercase();

    if code.is_empty() {
        return Err("❌ Currency code cannot be empty".to_string());
    }
    if code.len() < 3 || code.len() > 5 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("❌ Invalid currency code: '{}'", input.trim()));
    }

    Ok(code)
}

/// Fetch the latest rates for a base currency
pub async fn fetch_latest(
    client: &CurrencyClient,
    base: &str,
) -> Result<LatestResponse, String> {
    client.latest(base).await.map_err(|e| e.to_string())
}

/// Run a conversion for the given pair and amount
pub async fn run_conversion(
    client: &CurrencyClient,
    base: &str,
    target: &str,
    amount: f64,
) -> Result<ConvertResponse, String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err("❌ Amount must be a non-negative number".to_string());
    }

    client
        .convert(base, target, amount)
        .await
        .map_err(|e| e.to_string())
}

/// Fetch the pair's history and narrow it to a plottable series.
///
/// Returns both the raw records (for table display) and the filtered,
/// sorted series.
pub async fn load_history(
    client: &CurrencyClient,
    base: &str,
    target: &str,
) -> Result<(Vec<HistoryRecord>, Vec<Sample>), String> {
    if base == target {
        return Err("❌ Base and target currencies must be different".to_string());
    }

    let records = client.history(base, target).await.map_err(|e| e.to_string())?;
    if records.is_empty() {
        return Err("❌ No rate history found for this pair.".to_string());
    }

    let series = narrow_history(&records);
    Ok((records, series))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_normalizes_to_uppercase() {
        assert_eq!(parse_code("usd").unwrap(), "USD");
        assert_eq!(parse_code(" try ").unwrap(), "TRY");
    }

    #[test]
    fn test_parse_code_rejects_garbage() {
        assert!(parse_code("").is_err());
        assert!(parse_code("us").is_err());
        assert!(parse_code("DOLLARS").is_err());
        assert!(parse_code("US1").is_err());
    }
}
