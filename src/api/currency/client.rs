use reqwest::Client as HttpClient;
use tracing::warn;

use super::models::{ApiError, ConvertResponse, HistoryRecord, LatestResponse};

/// HTTP client for the remote currency-data API
pub struct CurrencyClient {
    http_client: HttpClient,
    base_url: String,
}

impl CurrencyClient {
    /// Create a new client against the given base URL
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET /api/currency/latest?base={base}
    ///
    /// Retrieves the most recent exchange rates for a base currency.
    pub async fn latest(&self, base: &str) -> Result<LatestResponse, ApiError> {
        let url = format!("{}/api/currency/latest", self.base_url);
        self.get_json(&url, &[("base", base)]).await
    }

    /// GET /api/currency/convert?base={base}&target={target}&amount={amount}
    ///
    /// Converts an amount from the base to the target currency at the
    /// current rate.
    pub async fn convert(
        &self,
        base: &str,
        target: &str,
        amount: f64,
    ) -> Result<ConvertResponse, ApiError> {
        let url = format!("{}/api/currency/convert", self.base_url);
        let amount = amount.to_string();
        self.get_json(&url, &[("base", base), ("target", target), ("amount", &amount)])
            .await
    }

    /// GET /api/currency/history?base={base}&target={target}
    ///
    /// Retrieves past conversion records for a currency pair, in no
    /// particular order.
    pub async fn history(
        &self,
        base: &str,
        target: &str,
    ) -> Result<Vec<HistoryRecord>, ApiError> {
        let url = format!("{}/api/currency/history", self.base_url);
        self.get_json(&url, &[("base", base), ("target", target)]).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => {
                // Try to parse JSON error
                if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                    let message = err_json
                        .get("message")
                        .and_then(|v| v.as_str())
                        .unwrap_or(&body_text);
                    ApiError::BadRequest(message.to_string())
                } else {
                    ApiError::BadRequest(body_text)
                }
            }
            404 => ApiError::NotFound(body_text),
            429 => {
                warn!("Rate limited by the currency API");
                ApiError::RateLimited(body_text)
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }
}
