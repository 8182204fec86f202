//! Extraction orchestrator.
//!
//! Takes a source video and an instruction string, probes the duration,
//! derives the plan and dispatches each request to the media tool in
//! order. Per-request failures land in the [`BatchReport`](crate::models::BatchReport);
//! only missing input, setup and probe failures are [`BatchError`]s.

mod errors;
mod runner;
mod types;

pub use errors::{BatchError, BatchResult};
pub use runner::Orchestrator;
pub use types::{BatchContext, BatchInput, ValidatedInput};
