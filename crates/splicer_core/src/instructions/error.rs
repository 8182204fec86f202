//! Reasons an instruction token is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a token could not become an extraction request.
///
/// Rejections are local: the token is skipped and the batch continues.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InstructionError {
    /// Token was empty after trimming.
    #[error("Empty instruction")]
    Empty,

    /// A time component is not `SS`, `MM:SS` or `HH:MM:SS`.
    #[error("'{text}' is not a valid time (expected SS, MM:SS or HH:MM:SS)")]
    InvalidTime { text: String },

    /// A bound lies past the end of the source.
    #[error("{seconds}s is past the end of the video ({duration}s)")]
    ExceedsDuration { seconds: f64, duration: f64 },

    /// Explicit range with start at or after end.
    #[error("Start {start}s is not before end {end}s")]
    StartNotBeforeEnd { start: f64, end: f64 },

    /// Open range that collapses to zero length.
    #[error("Range at {at}s has zero length")]
    EmptyRange { at: f64 },

    /// More than one internal `-`.
    #[error("'{token}' is not a valid range (use START-END, -END or START-)")]
    MalformedRange { token: String },
}

impl InstructionError {
    /// Create an invalid time error.
    pub fn invalid_time(text: impl Into<String>) -> Self {
        Self::InvalidTime { text: text.into() }
    }

    /// Create a malformed range error.
    pub fn malformed_range(token: impl Into<String>) -> Self {
        Self::MalformedRange {
            token: token.into(),
        }
    }

    /// Check if the rejection came from syntax rather than bounds.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::Empty | Self::InvalidTime { .. } | Self::MalformedRange { .. }
        )
    }
}

/// Result type for instruction parsing.
pub type InstructionResult<T> = Result<T, InstructionError>;
