//! Settings engine for Calcdesk.
//!
//! `CalculatorSettings` live in one pretty-printed JSON file, by default
//! `settings.json` under the platform config directory.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::platform;
use crate::services::evaluator::MAX_PRECISION;
use crate::types::errors::SettingsError;
use crate::types::settings::CalculatorSettings;

pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<CalculatorSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &CalculatorSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

pub struct SettingsEngine {
    config_path: String,
    settings: CalculatorSettings,
}

impl SettingsEngine {
    /// Holds defaults until `load` is called. `None` selects the platform path.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .into_owned()
        });

        Self {
            config_path,
            settings: CalculatorSettings::default(),
        }
    }
}

/// Range checks serde cannot express.
fn validate(settings: &CalculatorSettings) -> Result<(), SettingsError> {
    if settings.display.precision > MAX_PRECISION {
        return Err(SettingsError::InvalidValue(format!(
            "display.precision must be at most {}, got {}",
            MAX_PRECISION, settings.display.precision
        )));
    }
    Ok(())
}

/// Walks `path` through nested objects and replaces the existing leaf.
/// Unknown keys are refused rather than added.
fn replace_leaf(root: &mut Value, path: &str, value: Value) -> Result<(), SettingsError> {
    let unknown = || SettingsError::InvalidKey(path.to_string());

    let mut parts: Vec<&str> = path.split('.').collect();
    let leaf = parts.pop().filter(|p| !p.is_empty()).ok_or_else(unknown)?;

    let mut node = root;
    for part in parts {
        node = node.get_mut(part).ok_or_else(unknown)?;
    }

    match node.get_mut(leaf) {
        // Whole sections cannot be replaced, only scalar settings.
        Some(slot) if !slot.is_object() => {
            *slot = value;
            Ok(())
        }
        _ => Err(unknown()),
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// A missing file yields defaults. Malformed or out-of-range contents are errors.
    fn load(&mut self) -> Result<CalculatorSettings, SettingsError> {
        let path = Path::new(&self.config_path);
        if !path.exists() {
            debug!(path = %self.config_path, "no settings file, using defaults");
            self.settings = CalculatorSettings::default();
            return Ok(self.settings.clone());
        }

        let content =
            fs::read_to_string(path).map_err(|e| SettingsError::IoError(e.to_string()))?;
        let settings: CalculatorSettings = serde_json::from_str(&content)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        validate(&settings)?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        fs::write(path, json).map_err(|e| SettingsError::IoError(e.to_string()))
    }

    fn get_settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Replaces one setting addressed by a dot path such as `history.capacity`,
    /// then saves. A value of the wrong type or out of range leaves the current
    /// settings untouched.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut tree = serde_json::to_value(&self.settings)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        replace_leaf(&mut tree, key, value)?;

        let updated: CalculatorSettings = serde_json::from_value(tree)
            .map_err(|e| SettingsError::InvalidValue(format!("{}: {}", key, e)))?;
        validate(&updated)?;

        self.settings = updated;
        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = CalculatorSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
