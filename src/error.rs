//! Error types for Promptkeep
//!
//! This module defines the error taxonomy shared by the prompt store, the
//! HTTP layer, and the CLI, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Promptkeep operations
///
/// Store operations distinguish three caller-visible kinds of failure
/// (validation, not found, I/O). The remaining variants cover configuration
/// loading and serialization.
#[derive(Error, Debug)]
pub enum PromptKeepError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required input is missing or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// A prompt, history folder, or snapshot does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying filesystem operation failed
    #[error("IO error: {context}: {source}")]
    Io {
        /// What the store was doing when the failure occurred
        context: String,
        /// The originating I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Coarse classification of a [`PromptKeepError`]
///
/// Callers at the interface boundary use this to pick a status code or
/// exit message without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input missing or malformed
    Validation,
    /// Referenced entry does not exist
    NotFound,
    /// Filesystem or encoding failure
    Io,
    /// Configuration or serialization failure
    Config,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Io => "IO_FAILURE",
            ErrorKind::Config => "INTERNAL_ERROR",
        }
    }
}

impl PromptKeepError {
    /// Wrap an I/O error with a short description of the failed step
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromptKeepError::Validation(_) => ErrorKind::Validation,
            PromptKeepError::NotFound(_) => ErrorKind::NotFound,
            PromptKeepError::Io { .. } => ErrorKind::Io,
            PromptKeepError::Config(_)
            | PromptKeepError::Serialization(_)
            | PromptKeepError::Yaml(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for application-level operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

/// Result type alias for prompt store operations
///
/// Store callers need to tell the error kinds apart, so the store keeps the
/// concrete error type instead of erasing it into `anyhow::Error`.
pub type StoreResult<T> = std::result::Result<T, PromptKeepError>;
