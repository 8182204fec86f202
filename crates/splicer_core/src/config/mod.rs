//! Configuration management for Video Splicer.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Defaults for any missing key
//!
//! # Example
//!
//! ```no_run
//! use splicer_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/splicer.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Output folder: {}", config.settings().paths.output_folder);
//!
//! // Point at a specific ffmpeg build and save only that section
//! config.settings_mut().tools.ffmpeg_path = "/opt/homebrew/bin/ffmpeg".to_string();
//! config.update_section(ConfigSection::Tools).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, ExtractionSettings, LoggingSettings, PathSettings, Settings, ToolSettings,
};
