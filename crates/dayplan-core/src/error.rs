//! Core error types for dayplan-core.
//!
//! Per-event problems (missing times, all-day flags, inverted ranges) are not
//! errors: they are reported as [`Exclusion`](crate::interval::Exclusion)
//! diagnostics next to the layout. The types here cover misuse of the engine
//! and configuration failures.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayplan-core.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Two events in one day's input share an identifier
    #[error("Duplicate event id '{id}' in day input")]
    DuplicateEventId { id: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for LayoutError
pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
