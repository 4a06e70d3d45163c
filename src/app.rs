//! App Core for Calcdesk.
//!
//! Central struct holding the calculator, its storage backend, the key map
//! and the settings engine. Both binaries build one `App` at startup.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::calculator::Calculator;
use crate::database::connection::Database;
use crate::managers::expression_builder::ExpressionBuilder;
use crate::managers::history_manager::HistoryManager;
use crate::managers::key_map::KeyMap;
use crate::platform;
use crate::services::key_value_store::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::settings::{CalculatorSettings, StorageBackend};
use crate::ui::display::{DisplaySurface, NullDisplay};

/// Startup options, usually filled from the command line.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Settings file; defaults to the platform config path.
    pub config_path: Option<String>,
    /// Overrides `storage.backend` from the settings file.
    pub backend: Option<StorageBackend>,
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
}

/// Central application struct.
pub struct App {
    pub db: Option<Arc<Database>>,
    pub calculator: Calculator,
    pub key_map: KeyMap,
    pub settings_engine: SettingsEngine,
}

impl App {
    /// Creates an App that discards display updates; callers read
    /// `calculator.display_state()` instead.
    pub fn new(options: AppOptions) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_display(options, Box::new(NullDisplay))
    }

    /// Creates an App that paints onto `display`.
    ///
    /// A malformed settings file falls back to defaults rather than failing startup.
    pub fn with_display(
        options: AppOptions,
        display: Box<dyn DisplaySurface>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(options.config_path.clone());
        let settings = match settings_engine.load() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "using default settings");
                CalculatorSettings::default()
            }
        };

        let backend = options.backend.unwrap_or(settings.storage.backend);
        let data_dir = options.data_dir.clone().unwrap_or_else(platform::get_data_dir);

        let mut db = None;
        let store: Box<dyn KeyValueStore> = match backend {
            StorageBackend::Sqlite => {
                let opened = Arc::new(Database::open(data_dir.join(platform::DATABASE_FILE))?);
                db = Some(opened.clone());
                Box::new(SqliteStore::new(opened))
            }
            StorageBackend::File => Box::new(FileStore::new(data_dir.join(platform::STORE_FILE))),
            StorageBackend::Memory => Box::new(MemoryStore::new()),
        };
        info!(?backend, data_dir = %data_dir.display(), "storage ready");

        let history = HistoryManager::with_options(
            store,
            &settings.history.storage_key,
            settings.history.capacity,
        );
        let builder = ExpressionBuilder::new(settings.display.precision);
        let calculator = Calculator::new(builder, history, display);

        Ok(Self {
            db,
            calculator,
            key_map: KeyMap::new(),
            settings_engine,
        })
    }

    /// An App with in-memory history and a throwaway settings path. For tests.
    pub fn in_memory(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Self::new(AppOptions {
            config_path: Some(config_path.to_string()),
            backend: Some(StorageBackend::Memory),
            data_dir: None,
        })
    }

    pub fn settings(&self) -> &CalculatorSettings {
        self.settings_engine.get_settings()
    }
}
