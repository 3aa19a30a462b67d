//! Core error types for wellness-core.
//!
//! Configuration problems are the only errors allowed to surface
//! synchronously to callers; presentation and storage failures are degraded
//! modes handled at the boundary that raised them.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for wellness-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
///
/// A failing store never aborts the session; callers fall back to in-memory
/// defaults and the unlock/fired state simply does not persist.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to load the key-value file
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to persist the key-value file
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// No usable storage location
    #[error("Settings storage unavailable: {0}")]
    Unavailable(String),
}

/// Track configuration errors, rejected at construction.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Interval outside the accepted range
    #[error(
        "Invalid reminder interval {interval_ms} ms: must be between {min_ms} and {max_ms} ms"
    )]
    IntervalOutOfRange {
        interval_ms: u64,
        min_ms: u64,
        max_ms: u64,
    },

    /// Malformed clock-aligned target time
    #[error("Invalid target time {hour:02}:{minute:02}")]
    InvalidTargetTime { hour: u8, minute: u8 },
}

/// Notification delivery errors.
///
/// These never propagate past the presenter; they are logged and swallowed
/// so a failing channel cannot stop a reminder track.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// No native notification capability on this platform
    #[error("Native notification channel unavailable")]
    ChannelUnavailable,

    /// The platform refused notification permission
    #[error("Notification permission denied")]
    PermissionDenied,

    /// Native delivery failed
    #[error("Failed to deliver native notification: {0}")]
    Delivery(String),

    /// Tone playback failed
    #[error("Failed to play tone: {0}")]
    Audio(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
