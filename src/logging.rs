//! Tracing setup shared by both binaries.

use tracing_subscriber::EnvFilter;

use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Installs a stderr `fmt` subscriber. `RUST_LOG` wins over `default_level`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Reads `logging.level` from the settings file, falling back to `"info"`.
///
/// Runs before the subscriber exists, so failures are silent.
pub fn configured_level(config_path: Option<String>) -> String {
    let mut engine = SettingsEngine::new(config_path);
    engine
        .load()
        .map(|s| s.logging.level)
        .unwrap_or_else(|_| "info".to_string())
}
