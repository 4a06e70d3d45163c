//! Calcdesk — a keyboard-driven arithmetic calculator with persistent history.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod calculator;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
pub mod ui;
