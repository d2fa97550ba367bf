//! Error types for the SkinGlow client core

use thiserror::Error;

/// Errors raised by the device-local key-value store and the typed
/// repositories on top of it.
///
/// These never cross the public store API: `load` collapses them to the
/// default value and writes log them and carry on.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt payload for key '{key}': {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Profile field validation failure with a user-facing label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{display_label}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

/// Reminder schedule errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Hour must be between 0 and 23, got {0}")]
    InvalidHour(u32),

    #[error("Minute must be between 0 and 59, got {0}")]
    InvalidMinute(u32),
}
