//! Error types for media tool operations.

use std::path::PathBuf;

use thiserror::Error;

/// Error from the external media tool.
#[derive(Error, Debug)]
pub enum MediaError {
    /// Source or input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The tool binary could not be started.
    #[error("{tool} execution failed: {message}")]
    ToolExecutionFailed { tool: String, message: String },

    /// The tool ran and exited non-zero.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// Duration could not be determined from probe output.
    #[error("Failed to probe duration: {0}")]
    ProbeFailed(String),

    /// Tool exited cleanly but the expected output is missing or empty.
    #[error("Output file missing or empty: {}", .0.display())]
    OutputMissing(PathBuf),
}

impl MediaError {
    /// Create a tool execution error.
    pub fn tool_execution_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecutionFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a probe failed error.
    pub fn probe_failed(message: impl Into<String>) -> Self {
        Self::ProbeFailed(message.into())
    }
}

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;
