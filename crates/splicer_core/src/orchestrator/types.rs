//! Core types for the orchestrator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::errors::{BatchError, BatchResult};
use crate::logging::BatchLogger;

/// Fallback base name when neither the display name nor the path has a stem.
const DEFAULT_BASE_NAME: &str = "video";

/// Raw input from the boundary layer.
///
/// Every field is optional here so that "missing input" is reported by
/// [`BatchInput::validate`] rather than by each caller.
#[derive(Debug, Clone, Default)]
pub struct BatchInput {
    /// Source video on disk (e.g. the stored upload).
    pub source: Option<PathBuf>,
    /// Original file name as supplied by the user, if it differs from the
    /// stored file. Output names derive from this when present.
    pub file_name: Option<String>,
    /// Comma-separated instruction string.
    pub instructions: Option<String>,
}

impl BatchInput {
    pub fn new(source: impl Into<PathBuf>, instructions: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            file_name: None,
            instructions: Some(instructions.into()),
        }
    }

    /// Set the original (uploaded) file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Check that both the source and the instruction string are present.
    ///
    /// An empty instruction string is present; it just plans nothing.
    pub fn validate(self) -> BatchResult<ValidatedInput> {
        let source = self.source.ok_or_else(|| BatchError::missing_input("video file"))?;
        let instructions = self
            .instructions
            .ok_or_else(|| BatchError::missing_input("instructions"))?;

        let base_name = self
            .file_name
            .as_deref()
            .and_then(file_stem)
            .or_else(|| source.to_str().and_then(file_stem))
            .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string());

        Ok(ValidatedInput {
            source,
            base_name,
            instructions,
        })
    }
}

/// Input that passed presence checks.
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub source: PathBuf,
    /// Base for output names: original file name without extension.
    pub base_name: String,
    pub instructions: String,
}

/// File name without directory or extension.
fn file_stem(name: &str) -> Option<String> {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read-only context for one batch run.
pub struct BatchContext {
    /// Source video path.
    pub source: PathBuf,
    /// Base name for output files.
    pub base_name: String,
    /// Directory artifacts are written to.
    pub output_dir: PathBuf,
    /// Per-batch logger.
    pub logger: Arc<BatchLogger>,
}

impl BatchContext {
    pub fn new(
        source: impl Into<PathBuf>,
        base_name: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        logger: Arc<BatchLogger>,
    ) -> Self {
        Self {
            source: source.into(),
            base_name: base_name.into(),
            output_dir: output_dir.into(),
            logger,
        }
    }

    /// Full output path for a file name.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
