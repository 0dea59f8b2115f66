//! Core error types for clockwyz-core.
//!
//! Form guards surface [`ValidationError`]; configuration I/O surfaces
//! [`ConfigError`]; the pluggable assistant and syllabus readers surface
//! [`ServiceError`]. Everything folds into [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for clockwyz-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors from form submissions
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// External service errors (assistant, syllabus reader)
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title was empty or whitespace only
    #[error("Title must not be empty")]
    EmptyTitle,

    /// A recurring plan needs at least one weekday
    #[error("At least one day must be selected")]
    NoDaysSelected,

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },

    /// Required field left blank
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised by the pluggable external services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Service is turned off by preferences
    #[error("{service} is disabled")]
    Disabled { service: String },

    /// The service could not produce a result
    #[error("{service} failed: {message}")]
    Failed { service: String, message: String },

    /// The input was not something the service understands
    #[error("{service} rejected input: {message}")]
    InvalidInput { service: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
