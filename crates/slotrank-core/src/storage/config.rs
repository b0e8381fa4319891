//! TOML-based application configuration.
//!
//! Stores the defaults applied to requests that leave fields out:
//! - Result count, day start and time zone
//! - Scoring weights and hard-block policy
//! - Slot grid used by the availability transformer
//!
//! Configuration is stored at `~/.config/slotrank/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::model::{ClockTime, ScheduleSettings, Weights, DEFAULT_TIMEZONE, MINUTES_PER_DAY};
use crate::request::{EngineDefaults, DEFAULT_TOP_K};
use crate::transform::{TransformSettings, DEFAULT_GRID_SLOT_MINUTES, WEEKDAY_LABELS};

/// Request-level defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_day_start")]
    pub day_start: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Slot grid used when transforming time-range payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    #[serde(default)]
    pub day_start_minute: u32,
    #[serde(default = "default_day_end_minute")]
    pub day_end_minute: u32,
    #[serde(default = "default_day_labels")]
    pub day_labels: Vec<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/slotrank/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub transform: TransformConfig,
}

// Default functions
fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
fn default_day_start() -> String {
    ClockTime::MIDNIGHT.to_string()
}
fn default_timezone() -> String {
    DEFAULT_TIMEZONE.into()
}
fn default_slot_minutes() -> u32 {
    DEFAULT_GRID_SLOT_MINUTES
}
fn default_day_end_minute() -> u32 {
    MINUTES_PER_DAY
}
fn default_day_labels() -> Vec<String> {
    WEEKDAY_LABELS.iter().map(|d| d.to_string()).collect()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            day_start: default_day_start(),
            timezone: default_timezone(),
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            slot_minutes: default_slot_minutes(),
            day_start_minute: 0,
            day_end_minute: default_day_end_minute(),
            day_labels: default_day_labels(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
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

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        toml::from_str(&content).map_err(|e| load_failed(e.to_string()))
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
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

    /// Set a config value by key. Does not persist; call [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.engine_defaults()?;
        *self = updated;
        Ok(())
    }

    /// Defaults record handed to request validation.
    pub fn engine_defaults(&self) -> Result<EngineDefaults, ConfigError> {
        let day_start = ClockTime::parse("defaults.day_start", &self.defaults.day_start).map_err(|e| {
            ConfigError::InvalidValue {
                key: "defaults.day_start".into(),
                message: e.to_string(),
            }
        })?;
        if self.defaults.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                key: "defaults.top_k".into(),
                message: "must be > 0".into(),
            });
        }
        Ok(EngineDefaults {
            top_k: self.defaults.top_k,
            schedule: ScheduleSettings {
                day_start,
                timezone: self.defaults.timezone.clone(),
            },
            weights: self.weights,
        })
    }

    /// Grid settings for the availability transformer.
    pub fn transform_settings(&self) -> TransformSettings {
        TransformSettings {
            slot_minutes: self.transform.slot_minutes,
            day_start_minute: self.transform.day_start_minute,
            day_end_minute: self.transform.day_end_minute,
            day_labels: self.transform.day_labels.clone(),
        }
    }
}
