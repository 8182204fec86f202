//! Instruction parsing and plan derivation.
//!
//! An instruction string is a comma-separated list of tokens. Each token
//! describes one extraction, using `-` as the only range delimiter:
//!
//! ```text
//! 13:00        frame at 13m00s
//! -5:00        clip from the start of the video to 5m00s
//! 20:00-       clip from 20m00s to the end of the video
//! 5:00-6:30    clip from 5m00s to 6m30s
//! ```
//!
//! Times are `SS`, `MM:SS` or `HH:MM:SS` with integer components.
//!
//! # Example
//!
//! ```
//! use splicer_core::instructions::{parse_instruction, InstructionPlan};
//! use splicer_core::models::ExtractionRequest;
//!
//! assert_eq!(
//!     parse_instruction("30-90", 120.0),
//!     Ok(ExtractionRequest::clip(30.0, 90.0))
//! );
//!
//! let plan = InstructionPlan::build("13:00, bogus, 5:00-6:00", 3600.0);
//! let ordinals: Vec<u32> = plan.requests().map(|r| r.ordinal).collect();
//! assert_eq!(ordinals, vec![1, 2]);
//! ```

mod error;
mod parser;
mod plan;
mod timecode;

pub use error::{InstructionError, InstructionResult};
pub use parser::{parse_clip_instruction, parse_instruction};
pub use plan::{split_instructions, InstructionPlan, PlanEntry};
pub use timecode::{format_timecode, time_to_seconds};
