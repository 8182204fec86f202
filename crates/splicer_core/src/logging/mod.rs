//! Logging infrastructure for Video Splicer.
//!
//! This module provides:
//! - Application-wide `tracing` subscriber setup (stderr, optional file)
//! - Per-batch loggers with file + callback dual output
//! - Tail buffer of tool output for failure diagnosis
//!
//! # Example
//!
//! ```no_run
//! use splicer_core::logging::{BatchLogger, LogConfig};
//!
//! let logger = BatchLogger::new("lecture", ".logs", LogConfig::default(), None).unwrap();
//!
//! logger.phase("Extract");
//! logger.command("ffmpeg -y -ss 30 -i lecture.mp4 -t 60 -c copy lecture_clip_1.mp4");
//! logger.success("lecture_clip_1.mp4 written");
//! ```

mod batch_logger;
mod types;

pub use batch_logger::{BatchLogger, BatchLoggerBuilder};
pub use types::{LogCallback, LogConfig, LogLevel, MessagePrefix};

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Base name of the application-wide rolling log file.
const APP_LOG_FILE: &str = "video-splicer.log";

/// Initialize global tracing subscriber for application-wide logging.
///
/// - Respects the RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Initialize tracing with stderr output plus a daily-rolling file in `logs_dir`.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the lifetime of the application. If the log directory cannot be used,
/// logging falls back to stderr only and `None` is returned.
pub fn init_tracing_with_file(default_level: LogLevel, logs_dir: &Path) -> Option<WorkerGuard> {
    let file_appender = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(APP_LOG_FILE)
        .build(logs_dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            init_tracing(default_level);
            tracing::warn!(
                "Cannot write logs to {}: {}. Logging to stderr only.",
                logs_dir.display(),
                e
            );
            return None;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(filter)
        .try_init();

    Some(guard)
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_logs_dir_falls_back_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("plain-file");
        std::fs::write(&not_a_dir, b"x").unwrap();

        let guard = init_tracing_with_file(LogLevel::Info, &not_a_dir.join("logs"));
        assert!(guard.is_none());
    }

    #[test]
    fn writable_logs_dir_returns_guard() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        let guard = init_tracing_with_file(LogLevel::Info, &logs);
        assert!(guard.is_some());
        assert!(logs.is_dir());
    }

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
    }
}
