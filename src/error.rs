//! Custom error types for blobstore-render
//!
//! This module defines the crate-level error hierarchy using thiserror.
//! Bucket validation failures live in [`crate::validation::ValidationError`]
//! and are carried through unchanged so the operator sees the exact message.

use thiserror::Error;

use crate::validation::ValidationError;

/// The main error type for blobstore-render operations
#[derive(Error, Debug)]
pub enum RenderError {
    /// The bucket declarations were rejected; the message is surfaced verbatim
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The manifest could not be read or has the wrong shape
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Configuration-related errors (settings, paths, backend names)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(String),
}

impl RenderError {
    /// Check if this error came from bucket validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The validation failure behind this error, if any
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for blobstore-render operations
pub type RenderResult<T> = Result<T, RenderError>;
