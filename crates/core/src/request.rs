use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;

/// JSON body posted to the webhook.
///
/// A fresh value is built for every call; `timestamp` is the call time in
/// epoch milliseconds and carries no idempotency meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<HistoryEntry>,
    pub timestamp: i64,
}

impl ChatRequest {
    /// Create a request stamped with the current time.
    pub fn new(message: impl Into<String>, history: Vec<HistoryEntry>) -> Self {
        Self {
            message: message.into(),
            history,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
