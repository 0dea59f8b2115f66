//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Grid scale and snapping
//! - Quick-create popup geometry
//! - Calendar preferences (week start, working hours, time format)
//! - Assistant behaviour
//!
//! Configuration is stored at `~/.config/clockwyz/config.toml`, or under
//! `$CLOCKWYZ_HOME` when that is set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::grid::TimeGrid;
use crate::interaction::{BoardSettings, PopupGeometry};
use crate::store::assistant::{NotificationLevel, Personality, Preferences};

/// Grid scale and drag configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_pixels_per_hour")]
    pub pixels_per_hour: f64,
    #[serde(default = "default_snap_minutes")]
    pub snap_minutes: u32,
    #[serde(default = "default_min_event_height")]
    pub min_event_height: f64,
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold_px: f64,
}

/// Quick-create popup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupConfig {
    #[serde(default = "default_popup_size")]
    pub width: f64,
    #[serde(default = "default_popup_size")]
    pub height: f64,
    #[serde(default = "default_popup_margin")]
    pub margin: f64,
    #[serde(default = "default_popup_offset")]
    pub offset_above: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Calendar preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Minutes given to a new event from the quick-create popup.
    #[serde(default = "default_event_duration")]
    pub default_event_duration: i64,
    #[serde(default)]
    pub week_starts_on: WeekStart,
    #[serde(default = "default_work_start")]
    pub working_hours_start: u32,
    #[serde(default = "default_work_end")]
    pub working_hours_end: u32,
    #[serde(default)]
    pub time_format: TimeFormat,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub compact_mode: bool,
}

/// Assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub notification_level: NotificationLevel,
    #[serde(default = "default_true")]
    pub auto_suggestions: bool,
    #[serde(default)]
    pub voice_enabled: bool,
    /// Artificial delay of the canned responder.
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/clockwyz/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub popup: PopupConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

// Default functions
fn default_pixels_per_hour() -> f64 {
    64.0
}
fn default_snap_minutes() -> u32 {
    15
}
fn default_min_event_height() -> f64 {
    16.0
}
fn default_drag_threshold() -> f64 {
    5.0
}
fn default_popup_size() -> f64 {
    300.0
}
fn default_popup_margin() -> f64 {
    20.0
}
fn default_popup_offset() -> f64 {
    100.0
}
fn default_event_duration() -> i64 {
    15
}
fn default_work_start() -> u32 {
    9
}
fn default_work_end() -> u32 {
    17
}
fn default_true() -> bool {
    true
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            pixels_per_hour: default_pixels_per_hour(),
            snap_minutes: default_snap_minutes(),
            min_event_height: default_min_event_height(),
            drag_threshold_px: default_drag_threshold(),
        }
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            width: default_popup_size(),
            height: default_popup_size(),
            margin: default_popup_margin(),
            offset_above: default_popup_offset(),
        }
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            default_event_duration: default_event_duration(),
            week_starts_on: WeekStart::default(),
            working_hours_start: default_work_start(),
            working_hours_end: default_work_end(),
            time_format: TimeFormat::default(),
            theme: Theme::default(),
            compact_mode: false,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            personality: Personality::default(),
            notification_level: NotificationLevel::default(),
            auto_suggestions: true,
            voice_enabled: false,
            simulated_latency_ms: 0,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default config when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// `UnknownKey` for a key that does not exist, `InvalidValue` when the
    /// value does not parse as the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Every leaf as `(dotted.key, value)`, sorted by key.
    pub fn list(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }

    pub fn time_grid(&self) -> TimeGrid {
        TimeGrid {
            pixels_per_hour: self.grid.pixels_per_hour,
            snap_minutes: self.grid.snap_minutes.max(1),
            min_event_height: self.grid.min_event_height,
        }
    }

    pub fn popup_geometry(&self) -> PopupGeometry {
        PopupGeometry {
            width: self.popup.width,
            height: self.popup.height,
            margin: self.popup.margin,
            offset_above: self.popup.offset_above,
        }
    }

    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            grid: self.time_grid(),
            drag_threshold: self.grid.drag_threshold_px,
            popup: self.popup_geometry(),
            default_duration: self.preferences.default_event_duration,
            ..BoardSettings::default()
        }
    }

    /// Assistant preferences seeded from this config.
    pub fn assistant_preferences(&self) -> Preferences {
        Preferences {
            enabled: self.assistant.enabled,
            personality: self.assistant.personality,
            notification_level: self.assistant.notification_level,
            auto_suggestions: self.assistant.auto_suggestions,
            voice_enabled: self.assistant.voice_enabled,
            ..Preferences::default()
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
