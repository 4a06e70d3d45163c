// Calcdesk services
// Self-contained helpers: expression evaluation, storage backends, settings.

pub mod evaluator;
pub mod key_value_store;
pub mod settings_engine;
