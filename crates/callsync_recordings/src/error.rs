//! Error types for recordings.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for recording operations.
pub type RecordingResult<T> = Result<T, RecordingError>;

/// Errors that can occur while working with recordings.
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("Recording not found: {0}")]
    NotFound(String),

    #[error("Invalid meeting URL: {0}")]
    InvalidMeetingUrl(String),

    #[error("Title too short: {0:?}")]
    TitleTooShort(String),

    #[error("Corrupt recording store at {path}: {message}")]
    CorruptStore { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
