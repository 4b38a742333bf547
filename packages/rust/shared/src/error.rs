//! Error types for DocDraft.
//!
//! Library crates use [`DocDraftError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all DocDraft operations.
#[derive(Debug, thiserror::Error)]
pub enum DocDraftError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to the remote agent.
    #[error("network error: {0}")]
    Network(String),

    /// The bytes of an upload could not be decoded for its inferred format.
    #[error("failed to extract content from {file_name}: {message}")]
    Extraction { file_name: String, message: String },

    /// Remote agent rejected a task or returned an unusable response.
    #[error("agent error: {0}")]
    Agent(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad endpoint URL, malformed payload, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocDraftError>;

impl DocDraftError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an extraction error for the named file.
    pub fn extraction(file_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Extraction {
            file_name: file_name.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocDraftError::config("missing agent id");
        assert_eq!(err.to_string(), "config error: missing agent id");

        let err = DocDraftError::extraction("plan.pdf", "no trailer found");
        assert_eq!(
            err.to_string(),
            "failed to extract content from plan.pdf: no trailer found"
        );
    }
}
