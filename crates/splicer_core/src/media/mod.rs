//! External media tool adapter.
//!
//! The splicer never decodes video itself. Everything that touches media
//! goes through the [`MediaTool`] trait:
//!
//! - **Duration probe**: total playable length of the source
//! - **Frame capture**: one still image at a timestamp
//! - **Range extraction**: one clip from a start offset and length
//!
//! [`FfmpegTool`] implements the trait with `ffprobe`/`ffmpeg` subprocesses.
//! Tool paths come from [`ToolSettings`](crate::config::ToolSettings),
//! injected at construction.
//!
//! # Usage
//!
//! ```ignore
//! use splicer_core::config::ToolSettings;
//! use splicer_core::media::{FfmpegTool, MediaTool};
//!
//! let tool = FfmpegTool::new(ToolSettings::default());
//! let duration = tool.probe_duration(Path::new("talk.mp4"))?;
//! tool.extract_range(Path::new("talk.mp4"), 30.0, 60.0, Path::new("out/talk_clip_1.mp4"))?;
//! ```

mod ffmpeg;
mod probe;
mod tool;
mod types;

pub use ffmpeg::{format_seconds, FfmpegTool};
pub use probe::parse_duration_json;
pub use tool::MediaTool;
pub use types::{MediaError, MediaResult};
