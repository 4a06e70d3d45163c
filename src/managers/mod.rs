// Calcdesk state managers
// Managers hold mutable calculator state: the expression being typed, the history list, key bindings.

pub mod expression_builder;
pub mod history_manager;
pub mod key_map;
