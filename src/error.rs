//! Error types for Roster.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (3=not_found, 4=validation, 6=interchange, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / `--json` consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Roster operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Not Found (exit 3)
    StudentNotFound,

    // Validation (exit 4)
    InvalidArgument,

    // Interchange (exit 6)
    CsvError,

    // Config (exit 7)
    ConfigError,

    // I/O and data (exit 8)
    IoError,
    JsonError,
    CorruptData,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::CsvError => "CSV_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::CorruptData => "CORRUPT_DATA",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::StudentNotFound => 3,
            Self::InvalidArgument => 4,
            Self::CsvError => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError | Self::CorruptData => 8,
        }
    }

    /// Whether retrying with corrected input can succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::InvalidArgument | Self::StudentNotFound)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Roster operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Student not found: {id}")]
    StudentNotFound { id: u64 },

    #[error("Data file {} is not valid JSON: {source}", path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::StudentNotFound { .. } => ErrorCode::StudentNotFound,
            Self::CorruptData { .. } => ErrorCode::CorruptData,
            Self::Csv(_) => ErrorCode::CsvError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::StudentNotFound { id } => Some(format!(
                "No student with ID {id}. Use `roster list` to see available students."
            )),

            Self::CorruptData { path, .. } => Some(format!(
                "Fix or remove {} and try again. A missing file is recreated empty.",
                path.display()
            )),

            Self::InvalidArgument(msg) => {
                if msg.contains("mode") {
                    Some("Valid import modes: merge (default), replace".to_string())
                } else if msg.contains("bool") {
                    Some("Use yes/no, true/false, y/n, or 1/0".to_string())
                } else {
                    None
                }
            }

            Self::Config(_) => Some(
                "Pass --data <PATH> or set ROSTER_DATA to choose the data file".to_string(),
            ),

            Self::Csv(_) | Self::Io(_) | Self::Json(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
