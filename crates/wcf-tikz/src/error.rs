//! Errors from embedding and rendering.

use std::path::PathBuf;

use thiserror::Error;
use wcf_format::FormatError;

/// Convenience alias for results within the tikz crate.
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Errors that can occur while computing an embedding.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("planar embedding tools missing from {}: {}", dir.display(), missing.join(", "))]
    ExternalToolUnavailable {
        dir: PathBuf,
        missing: Vec<String>,
    },

    #[error("planar embedding failed: {message}")]
    ExternalToolFailure { message: String },

    #[error("encoding error: {0}")]
    Format(#[from] FormatError),
}

impl EmbedError {
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        EmbedError::ExternalToolFailure {
            message: message.into(),
        }
    }
}
