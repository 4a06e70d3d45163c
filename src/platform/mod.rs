// Calcdesk platform paths
// Config: settings.json
// Data:   calcdesk.db (SQLite backend) or history.json (file backend)
//
// Linux follows XDG, macOS uses Application Support, Windows uses %APPDATA%.

use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the data directory on every platform.
pub const DATA_DIR_ENV: &str = "CALCDESK_DATA_DIR";

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE: &str = "calcdesk.db";

/// File name of the JSON store inside the data directory.
pub const STORE_FILE: &str = "history.json";

fn home_dir() -> PathBuf {
    let var = if cfg!(target_os = "windows") { "USERPROFILE" } else { "HOME" };
    PathBuf::from(env::var(var).unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns `$var/<leaf>` when `var` is set and non-empty, otherwise `fallback`.
fn env_dir_or(var: &str, leaf: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join(leaf),
        _ => fallback,
    }
}

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/calcdesk` or `~/.config/calcdesk`
/// - **macOS**: `~/Library/Application Support/Calcdesk`
/// - **Windows**: `%APPDATA%/Calcdesk`
pub fn get_config_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        home_dir().join("Library").join("Application Support").join("Calcdesk")
    } else if cfg!(target_os = "windows") {
        env_dir_or("APPDATA", "Calcdesk", home_dir().join("AppData").join("Roaming").join("Calcdesk"))
    } else {
        env_dir_or("XDG_CONFIG_HOME", "calcdesk", home_dir().join(".config").join("calcdesk"))
    }
}

/// Returns the platform-specific data directory, honoring `CALCDESK_DATA_DIR`.
///
/// - **Linux**: `$XDG_DATA_HOME/calcdesk` or `~/.local/share/calcdesk`
/// - **macOS**: `~/Library/Application Support/Calcdesk`
/// - **Windows**: `%APPDATA%/Calcdesk`
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if cfg!(target_os = "linux") {
        env_dir_or(
            "XDG_DATA_HOME",
            "calcdesk",
            home_dir().join(".local").join("share").join("calcdesk"),
        )
    } else {
        get_config_dir()
    }
}
