use serde::{Deserialize, Serialize};

/// Top-level calculator settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CalculatorSettings {
    pub history: HistorySettings,
    pub storage: StorageSettings,
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
}

/// History retention settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySettings {
    pub capacity: usize,
    pub storage_key: String,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: 50,
            storage_key: "calcHistory".to_string(),
        }
    }
}

/// Which key-value backend holds the history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    File,
    Memory,
}

/// Storage backend settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
        }
    }
}

/// Result formatting settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplaySettings {
    /// Decimal places results are rounded to before trailing zeros are dropped.
    pub precision: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { precision: 10 }
    }
}

/// Logging settings. `RUST_LOG` takes priority when set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
