//! Error types and handling for Tempodash
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting.

use thiserror::Error;

/// Result type alias for Tempodash operations
pub type Result<T> = std::result::Result<T, TempoError>;

/// Main error type for Tempodash
#[derive(Debug, Error)]
pub enum TempoError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream tariff API errors (network failure, non-success status,
    /// or unparseable body)
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// HTTP/Web server errors
    #[error("Web server error: {message}")]
    Web { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },
}

impl TempoError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        TempoError::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        TempoError::Upstream {
            message: message.into(),
        }
    }

    /// Create a new web error
    pub fn web<S: Into<String>>(message: S) -> Self {
        TempoError::Web {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        TempoError::Io {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        TempoError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error means "upstream data unavailable" rather than a
    /// local defect. Callers render a placeholder for these instead of
    /// failing the whole view.
    pub fn is_upstream(&self) -> bool {
        matches!(self, TempoError::Upstream { .. })
    }
}

impl From<std::io::Error> for TempoError {
    fn from(err: std::io::Error) -> Self {
        TempoError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for TempoError {
    fn from(err: serde_yaml::Error) -> Self {
        TempoError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TempoError {
    fn from(err: serde_json::Error) -> Self {
        TempoError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for TempoError {
    fn from(err: reqwest::Error) -> Self {
        TempoError::upstream(err.to_string())
    }
}

impl From<chrono::ParseError> for TempoError {
    fn from(err: chrono::ParseError) -> Self {
        TempoError::validation("date", &err.to_string())
    }
}
