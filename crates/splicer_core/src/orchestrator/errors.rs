//! Error types for the extraction orchestrator.
//!
//! Only batch-level failures live here. A rejected token or a single
//! failed extraction is recorded in the report and never aborts a batch.

use std::path::PathBuf;

use thiserror::Error;

use crate::media::MediaError;

/// Fatal error that stops a batch before any extraction runs.
#[derive(Error, Debug)]
pub enum BatchError {
    /// No source file or no instruction string supplied.
    #[error("Missing input: {what}")]
    MissingInput { what: String },

    /// The source path does not exist.
    #[error("Source video not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Output or log directory could not be prepared.
    #[error("Batch setup failed: {message}")]
    SetupFailed { message: String },

    /// Duration probe failed; nothing can be validated without it.
    #[error("Processing failed: could not determine video duration: {source}")]
    ProbeFailed {
        #[source]
        source: MediaError,
    },
}

impl BatchError {
    /// Create a missing input error.
    pub fn missing_input(what: impl Into<String>) -> Self {
        Self::MissingInput { what: what.into() }
    }

    /// Create a setup failed error.
    pub fn setup_failed(message: impl Into<String>) -> Self {
        Self::SetupFailed {
            message: message.into(),
        }
    }

    /// Create a probe failed error.
    pub fn probe_failed(source: MediaError) -> Self {
        Self::ProbeFailed { source }
    }

    /// Check if the error came from the caller's input rather than processing.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingInput { .. } | Self::SourceNotFound(_))
    }
}

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
