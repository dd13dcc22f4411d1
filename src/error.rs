//! Error types for IntelliSQL.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for IntelliSQL operations.
#[derive(Error, Debug)]
pub enum IntelliError {
    /// Translation backend errors (network failures, auth, rate limits, etc.)
    #[error("Translation error: {0}")]
    Translation(String),

    /// Extraction errors (no unambiguous SQL payload in the model response)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Statement execution errors (syntax errors, unknown tables, store unavailable, etc.)
    #[error("Execution error: {0}")]
    Execution(String),

    /// Configuration errors (invalid config file, unknown provider, missing API key, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (terminal I/O failures, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntelliError {
    /// Creates a translation error with the given message.
    pub fn translation(msg: impl Into<String>) -> Self {
        Self::Translation(msg.into())
    }

    /// Creates an extraction error with the given message.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Translation(_) => "Translation Error",
            Self::Extraction(_) => "Extraction Error",
            Self::Execution(_) => "Execution Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using IntelliError.
pub type Result<T> = std::result::Result<T, IntelliError>;
