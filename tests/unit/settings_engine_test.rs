//! Unit tests for the settings engine: defaults, persistence, validation.

use std::fs;
use std::path::PathBuf;

use calcdesk::services::evaluator::MAX_PRECISION;
use calcdesk::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use calcdesk::types::errors::SettingsError;
use calcdesk::types::settings::{CalculatorSettings, StorageBackend};
use rstest::rstest;
use serde_json::{json, Value};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("settings.json");
        Self { _dir: dir, path }
    }

    fn engine(&self) -> SettingsEngine {
        let mut engine = SettingsEngine::new(Some(self.path.to_string_lossy().into_owned()));
        engine.load().unwrap();
        engine
    }
}

#[test]
fn test_missing_file_gives_defaults() {
    let fx = Fixture::new();
    let engine = fx.engine();

    let s = engine.get_settings();
    assert_eq!(*s, CalculatorSettings::default());
    assert_eq!(s.history.capacity, 50);
    assert_eq!(s.history.storage_key, "calcHistory");
    assert_eq!(s.storage.backend, StorageBackend::Sqlite);
    assert_eq!(s.display.precision, 10);
    assert_eq!(s.logging.level, "info");
    assert!(!fx.path.exists(), "loading must not create the file");
}

#[rstest]
#[case("history.capacity", json!(5))]
#[case("history.storage_key", json!("otherKey"))]
#[case("storage.backend", json!("File"))]
#[case("display.precision", json!(MAX_PRECISION))]
#[case("logging.level", json!("debug"))]
fn test_set_value_survives_reload(#[case] key: &str, #[case] value: Value) {
    let fx = Fixture::new();
    fx.engine().set_value(key, value.clone()).unwrap();

    let reloaded = serde_json::to_value(fx.engine().get_settings()).unwrap();
    let (section, field) = key.split_once('.').unwrap();
    assert_eq!(reloaded[section][field], value);
}

#[rstest]
#[case("")]
#[case("history")]
#[case("history.nope")]
#[case("nope.capacity")]
#[case("history.capacity.inner")]
fn test_unknown_keys_are_rejected(#[case] key: &str) {
    let fx = Fixture::new();
    let mut engine = fx.engine();
    assert!(matches!(
        engine.set_value(key, json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[rstest]
#[case("history.capacity", json!("lots"))]
#[case("storage.backend", json!("Floppy"))]
#[case("display.precision", json!(-1))]
#[case("display.precision", json!(MAX_PRECISION + 1))]
#[case("display.precision", json!(200_000_000u32))]
fn test_bad_values_leave_settings_untouched(#[case] key: &str, #[case] value: Value) {
    let fx = Fixture::new();
    let mut engine = fx.engine();

    assert!(matches!(
        engine.set_value(key, value),
        Err(SettingsError::InvalidValue(_))
    ));
    assert_eq!(*engine.get_settings(), CalculatorSettings::default());
    assert!(!fx.path.exists());
}

#[test]
fn test_reset_overwrites_saved_changes() {
    let fx = Fixture::new();
    let mut engine = fx.engine();
    engine.set_value("storage.backend", json!("Memory")).unwrap();
    engine.set_value("logging.level", json!("trace")).unwrap();

    engine.reset().unwrap();
    assert_eq!(*engine.get_settings(), CalculatorSettings::default());
    assert_eq!(*fx.engine().get_settings(), CalculatorSettings::default());
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.path.parent().unwrap()).unwrap();
    fs::write(&fx.path, "{ invalid json }").unwrap();

    let mut engine = SettingsEngine::new(Some(fx.path.to_string_lossy().into_owned()));
    assert!(matches!(
        engine.load(),
        Err(SettingsError::SerializationError(_))
    ));
}

#[test]
fn test_out_of_range_precision_in_file_is_rejected() {
    let fx = Fixture::new();
    let mut settings = CalculatorSettings::default();
    settings.display.precision = 70_000;
    fs::create_dir_all(fx.path.parent().unwrap()).unwrap();
    fs::write(&fx.path, serde_json::to_string(&settings).unwrap()).unwrap();

    let mut engine = SettingsEngine::new(Some(fx.path.to_string_lossy().into_owned()));
    assert!(matches!(engine.load(), Err(SettingsError::InvalidValue(_))));
}
