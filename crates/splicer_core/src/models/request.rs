//! Validated extraction requests.

use serde::{Deserialize, Serialize};

use super::enums::ExtractionKind;

/// A validated, bounded description of one frame capture or clip.
///
/// Only the instruction parser builds these, so every value satisfies
/// `0 <= start <= end <= duration` for the duration it was parsed against.
/// Frames have `start == end`; clips have `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Frame or clip.
    pub kind: ExtractionKind,
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds (equal to `start` for frames).
    pub end: f64,
}

impl ExtractionRequest {
    /// Create a frame capture at `at` seconds.
    pub fn frame(at: f64) -> Self {
        Self {
            kind: ExtractionKind::Frame,
            start: at,
            end: at,
        }
    }

    /// Create a clip covering `[start, end]`.
    pub fn clip(start: f64, end: f64) -> Self {
        Self {
            kind: ExtractionKind::Clip,
            start,
            end,
        }
    }

    /// Length of the covered range in seconds (zero for frames).
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_frame(&self) -> bool {
        self.kind == ExtractionKind::Frame
    }
}

impl std::fmt::Display for ExtractionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ExtractionKind::Frame => write!(f, "frame @ {}s", self.start),
            ExtractionKind::Clip => write!(f, "clip {}s-{}s", self.start, self.end),
        }
    }
}

/// A request bound to its 1-based ordinal and the token it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRequest {
    /// Ordinal used in the output file name.
    pub ordinal: u32,
    /// Trimmed instruction token.
    pub token: String,
    /// The parsed request.
    pub request: ExtractionRequest,
}

impl PlannedRequest {
    /// Output file name: `{base}_{frame|clip}_{ordinal}.{extension}`.
    pub fn output_file_name(&self, base: &str, extension: &str) -> String {
        format!(
            "{}_{}_{}.{}",
            base,
            self.request.kind.label(),
            self.ordinal,
            extension
        )
    }
}
