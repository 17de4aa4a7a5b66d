pub mod client;
pub mod models;

pub use client::CurrencyClient;
pub use models::{ApiError, ConvertResponse, HistoryRecord, LatestResponse};
