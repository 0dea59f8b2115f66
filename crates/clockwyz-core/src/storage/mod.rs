mod config;

pub use config::{AssistantConfig, Config, GridConfig, PopupConfig, PreferencesConfig, Theme, TimeFormat, WeekStart};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "CLOCKWYZ_HOME";

/// Returns `$CLOCKWYZ_HOME` when set, else `~/.config/clockwyz/`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("clockwyz"),
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
