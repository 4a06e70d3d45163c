// Calcdesk shared type definitions
// Each submodule defines types used across the application.

pub mod display;
pub mod errors;
pub mod history;
pub mod input;
pub mod settings;
