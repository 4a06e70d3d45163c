use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Format used for entry timestamps, e.g. `10/17/2026, 3:04:05 PM`.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A single completed calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
    pub timestamp: String,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current local time.
    pub fn new(expression: &str, result: &str) -> Self {
        Self::at(expression, result, Local::now())
    }

    /// Creates an entry stamped with the given time.
    pub fn at(expression: &str, result: &str, time: DateTime<Local>) -> Self {
        Self {
            expression: expression.to_string(),
            result: result.to_string(),
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// One-line rendering used by history lists: `2+3 = 5`.
    pub fn summary(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }
}
