//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Output and log locations.
    #[serde(default)]
    pub paths: PathSettings,

    /// External tool configuration.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Output naming.
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for output and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder extracted frames and clips are written to.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folder for per-batch log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Prefix for artifact references (e.g. `/output_clips`).
    ///
    /// Empty means references are filesystem paths.
    #[serde(default)]
    pub url_prefix: String,
}

fn default_output_folder() -> String {
    "output_clips".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            logs_folder: default_logs_folder(),
            url_prefix: String::new(),
        }
    }
}

impl PathSettings {
    /// URL prefix, if one is configured.
    pub fn url_prefix(&self) -> Option<&str> {
        let prefix = self.url_prefix.trim();
        if prefix.is_empty() {
            None
        } else {
            Some(prefix)
        }
    }
}

/// External media tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Path or name of the ffmpeg binary.
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg_path: String,

    /// Path or name of the ffprobe binary.
    #[serde(default = "default_ffprobe")]
    pub ffprobe_path: String,

    /// Copy streams instead of re-encoding clips.
    #[serde(default = "default_true")]
    pub stream_copy: bool,

    /// JPEG quality for frame captures (2 = best, 31 = worst).
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

fn default_true() -> bool {
    true
}

fn default_jpeg_quality() -> u8 {
    2
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg(),
            ffprobe_path: default_ffprobe(),
            stream_copy: true,
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

/// Output naming configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Extension for frame captures.
    #[serde(default = "default_frame_extension")]
    pub frame_extension: String,

    /// Extension for clips.
    #[serde(default = "default_clip_extension")]
    pub clip_extension: String,
}

fn default_frame_extension() -> String {
    "jpg".to_string()
}

fn default_clip_extension() -> String {
    "mp4".to_string()
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            frame_extension: default_frame_extension(),
            clip_extension: default_clip_extension(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for the per-batch log.
    #[serde(default)]
    pub level: LogLevel,

    /// Keep tool output out of the log unless something fails.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of tool output lines to show on error.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Prefix log lines with a timestamp.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Tools,
    Extraction,
    Logging,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Paths,
        ConfigSection::Tools,
        ConfigSection::Extraction,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Tools => "tools",
            ConfigSection::Extraction => "extraction",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section in a generated file.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "# Output and log directories",
            ConfigSection::Tools => "# External ffmpeg/ffprobe binaries",
            ConfigSection::Extraction => "# Output file naming",
            ConfigSection::Logging => "# Logging configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[tools]"));
        assert!(toml.contains("output_folder"));
        assert!(toml.contains("ffmpeg_path"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[paths]\noutput_folder = \"custom_output\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert_eq!(parsed.paths.output_folder, "custom_output");
        // Defaults applied for missing
        assert_eq!(parsed.paths.logs_folder, ".logs");
        assert!(parsed.tools.stream_copy);
        assert_eq!(parsed.extraction.clip_extension, "mp4");
    }

    #[test]
    fn empty_url_prefix_is_none() {
        let mut paths = PathSettings::default();
        assert_eq!(paths.url_prefix(), None);
        paths.url_prefix = "/output_clips".to_string();
        assert_eq!(paths.url_prefix(), Some("/output_clips"));
    }

    #[test]
    fn log_level_reads_lowercase() {
        let parsed: Settings = toml::from_str("[logging]\nlevel = \"debug\"").unwrap();
        assert_eq!(parsed.logging.level, LogLevel::Debug);
    }
}
