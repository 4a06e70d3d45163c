use serde::{Deserialize, Serialize};

/// Snapshot of what the display surface currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub expression: String,
    pub result: String,
}
