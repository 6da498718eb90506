//! # Error Types
//!
//! Structured error types for tank_core. These errors are designed to be
//! informative for both humans and automated consumers, providing enough
//! context to understand and fix issues programmatically.
//!
//! The design calculator itself never fails; errors arise at the boundaries
//! (session files, report rendering, drawing viewports).
//!
//! ## Example
//!
//! ```rust
//! use tank_core::errors::{CalcError, CalcResult};
//!
//! fn validate_viewport(width: f64) -> CalcResult<()> {
//!     if width <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "width".to_string(),
//!             value: width.to_string(),
//!             reason: "Viewport width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for tank_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for session and output operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by shells and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The session has no current design to act on
    #[error("No current design in session: {operation} needs a computed design")]
    MissingDesign { operation: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Report rendering error
    #[error("Report error: {stage} - {reason}")]
    ReportError { stage: String, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingDesign error
    pub fn missing_design(operation: impl Into<String>) -> Self {
        CalcError::MissingDesign {
            operation: operation.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a ReportError
    pub fn report_error(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ReportError {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingDesign { .. } => "MISSING_DESIGN",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::ReportError { .. } => "REPORT_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
