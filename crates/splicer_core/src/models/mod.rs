//! Data models for Video Splicer.
//!
//! This module contains the core data structures shared by the parser,
//! the media adapter and the orchestrator:
//! - Extraction kinds and validated requests
//! - Artifacts written by a successful extraction
//! - Per-instruction outcomes collected into a batch report

mod artifact;
mod enums;
mod request;
mod results;

// Re-export all public types
pub use artifact::Artifact;
pub use enums::{ExtractionKind, RequestState};
pub use request::{ExtractionRequest, PlannedRequest};
pub use results::{BatchReport, InstructionOutcome, OutcomeStatus};
