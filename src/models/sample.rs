//! Rate history series models

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::api::currency::HistoryRecord;

/// A single historical observation of a base→target rate
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub rate: f64,
}

/// Sort a series ascending by timestamp.
///
/// The history endpoint gives no ordering guarantee. The sort is stable:
/// samples with equal timestamps keep their input order.
pub fn sort_series(samples: &mut [Sample]) {
    samples.sort_by_key(|s| s.timestamp);
}

/// Narrow raw history records to chart samples.
///
/// Records with an unparsable timestamp or a missing, non-finite or negative
/// rate are dropped; the survivors come back sorted ascending by timestamp.
pub fn narrow_history(records: &[HistoryRecord]) -> Vec<Sample> {
    let mut samples: Vec<Sample> = records
        .iter()
        .filter_map(|record| {
            let timestamp = DateTime::parse_from_rfc3339(&record.created_at)
                .ok()?
                .with_timezone(&Utc);
            let rate = record.rate?;
            if !rate.is_finite() || rate < 0.0 {
                return None;
            }
            Some(Sample { timestamp, rate })
        })
        .collect();

    let dropped = records.len() - samples.len();
    if dropped > 0 {
        warn!("Dropped {} malformed history record(s)", dropped);
    }

    sort_series(&mut samples);
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: &str, rate: f64) -> Sample {
        Sample {
            timestamp: timestamp.parse().unwrap(),
            rate,
        }
    }

    fn record(created_at: &str, rate: Option<f64>) -> HistoryRecord {
        HistoryRecord {
            base_code: "USD".to_string(),
            target_code: "TRY".to_string(),
            rate,
            amount: Some(100.0),
            converted: rate.map(|r| r * 100.0),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_sort_is_idempotent_and_stable() {
        let mut series = vec![
            sample("2024-01-01T00:00:00Z", 1.0),
            sample("2024-01-01T00:00:00Z", 2.0),
            sample("2024-01-02T00:00:00Z", 3.0),
        ];
        let expected = series.clone();

        sort_series(&mut series);
        assert_eq!(series, expected);
        sort_series(&mut series);
        assert_eq!(series, expected);
    }

    #[test]
    fn test_narrow_drops_malformed_records() {
        let records = vec![
            record("2024-01-02T00:00:00Z", Some(31.0)),
            record("not a timestamp", Some(30.5)),
            record("2024-01-01T00:00:00Z", Some(30.0)),
            record("2024-01-03T00:00:00Z", None),
            record("2024-01-04T00:00:00Z", Some(-1.0)),
            record("2024-01-05T00:00:00Z", Some(f64::NAN)),
        ];

        let series = narrow_history(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].rate, 30.0);
        assert_eq!(series[1].rate, 31.0);
    }

    #[test]
    fn test_narrow_sorts_ascending() {
        let records = vec![
            record("2024-01-03T00:00:00Z", Some(32.0)),
            record("2024-01-01T00:00:00Z", Some(30.0)),
            record("2024-01-02T00:00:00Z", Some(31.0)),
        ];

        let series = narrow_history(&records);
        let rates: Vec<f64> = series.iter().map(|s| s.rate).collect();
        assert_eq!(rates, vec![30.0, 31.0, 32.0]);
    }
}
