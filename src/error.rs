//! Error types for the Sentigeo library.
//!
//! All fallible operations return [`Result`], whose error side is
//! [`SentigeoError`]. The pipeline additionally classifies errors into a
//! [`FailureKind`] so that callers can react to a failed post without
//! matching on message text.
//!
//! # Examples
//!
//! ```
//! use sentigeo::error::{FailureKind, SentigeoError, Result};
//!
//! fn lookup(code: &str) -> Result<()> {
//!     Err(SentigeoError::unsupported_language(code))
//! }
//!
//! let err = lookup("fr").unwrap_err();
//! assert_eq!(err.kind(), FailureKind::UnsupportedLanguage);
//! assert_eq!(err.to_string(), "Unsupported language: fr");
//! ```

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for Sentigeo operations.
#[derive(Error, Debug)]
pub enum SentigeoError {
    /// I/O errors (files, pipes)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The language classifier could not decide on a language.
    #[error("Language detection failed: {0}")]
    DetectionFailure(String),

    /// No backend is registered for the resolved language code.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A language backend failed while producing a document.
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// The post timestamp could not be interpreted.
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// The post coordinates are out of range or not finite.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SentigeoError.
pub type Result<T> = std::result::Result<T, SentigeoError>;

impl SentigeoError {
    /// Create a new detection failure.
    pub fn detection<S: Into<String>>(msg: S) -> Self {
        SentigeoError::DetectionFailure(msg.into())
    }

    /// Create a new unsupported language error naming the offending code.
    pub fn unsupported_language<S: Into<String>>(code: S) -> Self {
        SentigeoError::UnsupportedLanguage(code.into())
    }

    /// Create a new tokenization error.
    pub fn tokenization<S: Into<String>>(msg: S) -> Self {
        SentigeoError::Tokenization(msg.into())
    }

    /// Create a new malformed timestamp error.
    pub fn malformed_timestamp<S: Into<String>>(msg: S) -> Self {
        SentigeoError::MalformedTimestamp(msg.into())
    }

    /// Create a new invalid location error.
    pub fn invalid_location<S: Into<String>>(msg: S) -> Self {
        SentigeoError::InvalidLocation(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SentigeoError::Config(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SentigeoError::Storage(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SentigeoError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SentigeoError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Classify this error for per-record failure reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            SentigeoError::DetectionFailure(_) => FailureKind::Detection,
            SentigeoError::UnsupportedLanguage(_) => FailureKind::UnsupportedLanguage,
            SentigeoError::Tokenization(_) => FailureKind::Tokenization,
            SentigeoError::MalformedTimestamp(_) => FailureKind::MalformedTimestamp,
            SentigeoError::InvalidLocation(_) => FailureKind::InvalidLocation,
            _ => FailureKind::Other,
        }
    }
}

/// Classification of a failed post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Detection,
    UnsupportedLanguage,
    Tokenization,
    MalformedTimestamp,
    InvalidLocation,
    Other,
}

impl FailureKind {
    /// Stable identifier used in logs and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Detection => "detection",
            FailureKind::UnsupportedLanguage => "unsupported_language",
            FailureKind::Tokenization => "tokenization",
            FailureKind::MalformedTimestamp => "malformed_timestamp",
            FailureKind::InvalidLocation => "invalid_location",
            FailureKind::Other => "other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
