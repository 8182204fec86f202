//! FFmpeg/ffprobe subprocess implementation of [`MediaTool`].

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use super::probe::parse_duration_json;
use super::tool::MediaTool;
use super::types::{MediaError, MediaResult};
use crate::config::ToolSettings;

/// Number of stderr lines kept in a command failure message.
const STDERR_TAIL_LINES: usize = 12;

/// Media tool backed by the `ffmpeg` and `ffprobe` binaries.
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    settings: ToolSettings,
}

impl FfmpegTool {
    /// Create a tool using the configured binaries and options.
    pub fn new(settings: ToolSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Check that both binaries start and answer `-version`.
    pub fn check_available(&self) -> MediaResult<()> {
        for (tool, program) in [
            ("ffmpeg", &self.settings.ffmpeg_path),
            ("ffprobe", &self.settings.ffprobe_path),
        ] {
            let output = Command::new(program)
                .arg("-version")
                .output()
                .map_err(|e| MediaError::tool_execution_failed(tool, format!("{}: {}", program, e)))?;
            if !output.status.success() {
                return Err(MediaError::command_failed(
                    tool,
                    output.status.code().unwrap_or(-1),
                    stderr_tail(&output.stderr),
                ));
            }
        }
        Ok(())
    }

    /// Arguments for a single-frame capture.
    fn frame_args(&self, source: &Path, at: f64, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-ss".into(),
            format_seconds(at).into(),
            "-i".into(),
            source.as_os_str().to_owned(),
            "-frames:v".into(),
            "1".into(),
            "-q:v".into(),
            self.settings.jpeg_quality.to_string().into(),
            output.as_os_str().to_owned(),
        ]
    }

    /// Arguments for a range extraction.
    ///
    /// Input seeking (`-ss` before `-i`) keeps extraction fast; with stream
    /// copy the cut lands on the nearest keyframe.
    fn clip_args(&self, source: &Path, start: f64, length: f64, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-ss".into(),
            format_seconds(start).into(),
            "-i".into(),
            source.as_os_str().to_owned(),
            "-t".into(),
            format_seconds(length).into(),
        ];
        if self.settings.stream_copy {
            args.push("-c".into());
            args.push("copy".into());
        }
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Run one of the configured binaries and check its exit status.
    fn run(&self, tool: &str, program: &str, args: &[OsString]) -> MediaResult<Output> {
        tracing::debug!(
            "Running: {} {}",
            program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| MediaError::tool_execution_failed(tool, format!("Failed to run {}: {}", program, e)))?;

        if !output.status.success() {
            return Err(MediaError::command_failed(
                tool,
                output.status.code().unwrap_or(-1),
                stderr_tail(&output.stderr),
            ));
        }

        Ok(output)
    }
}

impl MediaTool for FfmpegTool {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn probe_duration(&self, source: &Path) -> MediaResult<f64> {
        ensure_exists(source)?;

        let args: Vec<OsString> = vec![
            "-v".into(),
            "error".into(),
            "-show_entries".into(),
            "format=duration".into(),
            "-of".into(),
            "json".into(),
            source.as_os_str().to_owned(),
        ];
        let output = self.run("ffprobe", &self.settings.ffprobe_path, &args)?;
        let duration = parse_duration_json(&output.stdout)?;

        tracing::debug!("Probed {}: {:.3}s", source.display(), duration);
        Ok(duration)
    }

    fn capture_frame(&self, source: &Path, at: f64, output: &Path) -> MediaResult<()> {
        ensure_exists(source)?;
        let args = self.frame_args(source, at, output);
        self.run("ffmpeg", &self.settings.ffmpeg_path, &args)?;
        ensure_written(output)
    }

    fn extract_range(
        &self,
        source: &Path,
        start: f64,
        length: f64,
        output: &Path,
    ) -> MediaResult<()> {
        ensure_exists(source)?;
        let args = self.clip_args(source, start, length, output);
        self.run("ffmpeg", &self.settings.ffmpeg_path, &args)?;
        ensure_written(output)
    }
}

/// Render seconds for a tool argument: whole values without a fraction,
/// others with millisecond precision.
pub fn format_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as i64)
    } else {
        format!("{:.3}", seconds)
    }
}

fn ensure_exists(path: &Path) -> MediaResult<()> {
    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

fn ensure_written(path: &Path) -> MediaResult<()> {
    let meta = fs::metadata(path).map_err(|_| MediaError::OutputMissing(path.to_path_buf()))?;
    if meta.len() == 0 {
        return Err(MediaError::OutputMissing(path.to_path_buf()));
    }
    Ok(())
}

/// Last few non-empty stderr lines, joined for an error message.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
