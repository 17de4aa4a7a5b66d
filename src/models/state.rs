//! UI state snapshot and transition events
//!
//! Commands never mutate state in place. They emit events and the reducer
//! produces the next snapshot, so every transition is explicit and testable.

use crate::api::currency::{ConvertResponse, LatestResponse};
use crate::models::sample::Sample;

/// Immutable snapshot of the client state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub base: String,
    pub target: String,
    pub amount: f64,
    pub latest: Option<LatestResponse>,
    pub conversion: Option<ConvertResponse>,
    pub history: Vec<Sample>,
    pub last_error: Option<String>,
    convert_seq: u64,
    history_seq: u64,
    issued_seq: u64,
}

impl AppState {
    /// Starting snapshot: USD→TRY with an amount of 100
    pub fn new() -> Self {
        AppState {
            base: "USD".to_string(),
            target: "TRY".to_string(),
            amount: 100.0,
            ..Default::default()
        }
    }

    /// Sequence number the next issued request should carry
    pub fn next_seq(&self) -> u64 {
        self.issued_seq + 1
    }
}

/// Discrete state transitions
#[derive(Debug, Clone)]
pub enum AppEvent {
    SetBase(String),
    SetTarget(String),
    SetAmount(f64),
    LatestLoaded(LatestResponse),
    ConvertRequested { seq: u64 },
    ConvertCompleted { seq: u64, response: ConvertResponse },
    HistoryRequested { seq: u64 },
    HistoryLoaded { seq: u64, series: Vec<Sample> },
    ErrorOccurred(String),
}

/// Pure transition function from one snapshot to the next.
///
/// Completions carry the sequence number of the request that produced them.
/// A completion whose sequence is not the most recently issued one for its
/// kind lost the race against a newer request and is dropped: last write
/// wins.
pub fn reduce(state: &AppState, event: AppEvent) -> AppState {
    let mut next = state.clone();
    match event {
        AppEvent::SetBase(code) => {
            next.base = code;
            // Derived data belongs to the old pair
            next.latest = None;
            next.conversion = None;
            next.history.clear();
        }
        AppEvent::SetTarget(code) => {
            next.target = code;
            next.conversion = None;
            next.history.clear();
        }
        AppEvent::SetAmount(value) => {
            next.amount = value;
        }
        AppEvent::LatestLoaded(latest) => {
            next.latest = Some(latest);
            next.last_error = None;
        }
        AppEvent::ConvertRequested { seq } => {
            next.convert_seq = seq;
            next.issued_seq = next.issued_seq.max(seq);
        }
        AppEvent::ConvertCompleted { seq, response } => {
            if seq == next.convert_seq {
                next.conversion = Some(response);
                next.last_error = None;
            }
        }
        AppEvent::HistoryRequested { seq } => {
            next.history_seq = seq;
            next.issued_seq = next.issued_seq.max(seq);
        }
        AppEvent::HistoryLoaded { seq, series } => {
            if seq == next.history_seq {
                next.history = series;
                next.last_error = None;
            }
        }
        AppEvent::ErrorOccurred(message) => {
            next.last_error = Some(message);
        }
    }
    next
}
