//! Core error types for slotrank-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures always name the offending field path so callers can map them to
//! client-fault responses without inspecting internals.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for slotrank-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Request shape errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Availability transformer errors
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Preset store errors
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CoreError {
    /// True when the failure was caused by the caller's input rather than
    /// the environment.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::Transform(_))
    }
}

/// Request validation errors.
///
/// Raised before any scoring begins; a request that fails validation
/// produces no partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// An attendee's matrix does not have one row per day
    #[error("{field} must have one row per day ({expected}), found {found}")]
    RowCountMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    /// Attendees disagree on the slot count for a day
    #[error("All attendees must have the same number of slots on day index {day}: {field} has {found}, expected {expected}")]
    RowLengthMismatch {
        field: String,
        day: usize,
        expected: usize,
        found: usize,
    },

    /// Two attendees share a name (case-insensitive)
    #[error("Duplicate attendee names detected: {0}")]
    DuplicateName(String),

    /// A clock time is not `HH:MM`
    #[error("Invalid clock time for '{field}': '{value}' (expected HH:MM)")]
    InvalidClockTime { field: String, value: String },

    /// An avail_scores key is not one of the slot states
    #[error("Invalid avail_scores key '{0}': keys must be 0, 1 or 2")]
    InvalidAvailScoreKey(String),
}

impl ValidationError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Availability transformer errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// No users supplied
    #[error("availability must contain at least one user")]
    NoUsers,

    /// Blank user name
    #[error("availability[{index}].name must not be empty")]
    BlankName { index: usize },

    /// Duplicate user names (lowercased)
    #[error("Duplicate user names detected: {}", .0.join(", "))]
    DuplicateNames(Vec<String>),

    /// Day index outside the configured weekday range
    #[error("{field}: day {day} is outside 0..={max}")]
    DayOutOfRange { field: String, day: usize, max: usize },

    /// Minute outside the configured day bounds
    #[error("{field}: minute {minute} is outside [{min}, {max}]")]
    MinuteOutOfRange {
        field: String,
        minute: u32,
        min: u32,
        max: u32,
    },

    /// Empty or inverted range
    #[error("{field}: start_minute must be less than end_minute")]
    EmptyRange { field: String },

    /// Bound not aligned to the slot grid
    #[error("{field}: times must follow increments of {slot_minutes} minutes")]
    Misaligned { field: String, slot_minutes: u32 },

    /// Invalid scalar field
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Preset store errors.
#[derive(Error, Debug)]
pub enum PresetError {
    /// Key is empty, too long, or uses unsupported characters
    #[error("Invalid preset key '{0}': use 1-64 characters from [A-Za-z0-9_-]")]
    InvalidKey(String),

    /// Store file exists but cannot be parsed
    #[error("Preset store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing the store failed
    #[error("Preset store IO failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
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

    /// Data directory could not be prepared
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
