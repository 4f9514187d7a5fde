//! TOML-based layout configuration.
//!
//! Hosts that keep layout settings on disk can load them with
//! [`LayoutConfig::load`]; everyone else uses [`LayoutConfig::default`].
//!
//! ```toml
//! max_columns = 4
//! unbounded = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::layout::{ColumnCap, DEFAULT_COLUMN_CAP};

/// Settings for the day layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Maximum side-by-side columns per cluster
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,
    /// Ignore `max_columns` and open as many columns as needed
    #[serde(default)]
    pub unbounded: bool,
}

fn default_max_columns() -> usize {
    DEFAULT_COLUMN_CAP
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_columns: default_max_columns(),
            unbounded: false,
        }
    }
}

impl LayoutConfig {
    /// Config with no column cap
    pub fn unbounded() -> Self {
        Self {
            unbounded: true,
            ..Self::default()
        }
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    /// The column cap these settings describe
    pub fn column_cap(&self) -> ColumnCap {
        if self.unbounded {
            ColumnCap::Unbounded
        } else {
            ColumnCap::Bounded(self.max_columns)
        }
    }

    /// # Errors
    ///
    /// Returns an error if `max_columns` is zero while a cap is in effect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.unbounded && self.max_columns == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_columns".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Parse and validate settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema or the
    /// values fail validation.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: LayoutConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?cfg, "loaded layout config");
        Ok(cfg)
    }

    /// Persist settings as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not parse as the
    /// key's type, or the result fails validation. On error `self` is left
    /// unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(format!("cannot parse '{value}' as bool: {e}")))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|e| invalid(format!("cannot parse '{value}' as number: {e}")))?
                    .into(),
            ),
            _ => serde_json::Value::String(value.to_string()),
        };
        obj.insert(key.to_string(), new_value);

        let updated: LayoutConfig =
            serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
