use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Response from GET /api/currency/latest
///
/// Rates are keyed by target currency code. A sorted map keeps table output
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestResponse {
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
}

/// Response from GET /api/currency/convert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    #[serde(default)]
    pub base_code: String,
    #[serde(default)]
    pub target_code: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub converted: Option<f64>,
}

/// One record from GET /api/currency/history
///
/// The endpoint gives no ordering guarantee and individual records may carry
/// junk numeric fields; consumers narrow and filter before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(default)]
    pub base_code: String,
    #[serde(default)]
    pub target_code: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub converted: Option<f64>,
    #[serde(default)]
    pub created_at: String,
}

/// Accept a JSON number or a numeric string; anything else becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_record_accepts_string_and_null_numbers() {
        let raw = r#"{
            "baseCode": "USD",
            "targetCode": "TRY",
            "rate": "41.2",
            "amount": null,
            "converted": 4120.0,
            "createdAt": "2024-01-02T10:00:00Z"
        }"#;

        let record: HistoryRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.base_code, "USD");
        assert_eq!(record.rate, Some(41.2));
        assert_eq!(record.amount, None);
        assert_eq!(record.converted, Some(4120.0));
        assert_eq!(record.created_at, "2024-01-02T10:00:00Z");
    }

    #[test]
    fn test_history_record_tolerates_missing_fields() {
        let record: HistoryRecord = serde_json::from_str(r#"{"baseCode": "USD"}"#).unwrap();
        assert_eq!(record.rate, None);
        assert_eq!(record.created_at, "");
    }

    #[test]
    fn test_latest_response_orders_rates_by_code() {
        let raw = r#"{"base": "USD", "rates": {"TRY": 41.2, "EUR": 0.92, "GBP": 0.79}}"#;
        let latest: LatestResponse = serde_json::from_str(raw).unwrap();
        let codes: Vec<&String> = latest.rates.keys().collect();
        assert_eq!(codes, vec!["EUR", "GBP", "TRY"]);
    }
}
