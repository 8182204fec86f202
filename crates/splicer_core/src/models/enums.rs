//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// Kind of output an instruction produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionKind {
    /// A single still image at one timestamp.
    Frame,
    /// A sub-clip covering a time range.
    Clip,
}

impl ExtractionKind {
    /// Label used in output file names (`{base}_{label}_{ordinal}`).
    pub fn label(&self) -> &'static str {
        match self {
            ExtractionKind::Frame => "frame",
            ExtractionKind::Clip => "clip",
        }
    }
}

impl std::fmt::Display for ExtractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle of one planned request inside the orchestrator.
///
/// `Pending -> Invoking -> {Succeeded, Failed}`. Terminal states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestState {
    #[default]
    Pending,
    Invoking,
    Succeeded,
    Failed,
}

impl RequestState {
    /// Check if the request reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Succeeded | RequestState::Failed)
    }

    /// Advance to the next state.
    ///
    /// Returns `None` for transitions the lifecycle does not allow
    /// (skipping `Invoking`, or leaving a terminal state).
    pub fn advance(self, succeeded: bool) -> Option<RequestState> {
        match self {
            RequestState::Pending => Some(RequestState::Invoking),
            RequestState::Invoking if succeeded => Some(RequestState::Succeeded),
            RequestState::Invoking => Some(RequestState::Failed),
            RequestState::Succeeded | RequestState::Failed => None,
        }
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestState::Pending => write!(f, "Pending"),
            RequestState::Invoking => write!(f, "Invoking"),
            RequestState::Succeeded => write!(f, "Succeeded"),
            RequestState::Failed => write!(f, "Failed"),
        }
    }
}
