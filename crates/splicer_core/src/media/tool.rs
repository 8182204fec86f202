//! Media tool trait definition.

use std::path::Path;

use super::types::MediaResult;

/// Capabilities the splicer needs from an external media engine.
///
/// Every call blocks until the engine reports success or failure. The
/// orchestrator invokes at most one operation at a time.
pub trait MediaTool: Send + Sync {
    /// Tool name (for logging).
    fn name(&self) -> &str;

    /// Total duration of `source` in seconds.
    ///
    /// Fails if the file is unreadable or the duration is unknown.
    fn probe_duration(&self, source: &Path) -> MediaResult<f64>;

    /// Write one still image of `source` at `at` seconds to `output`.
    fn capture_frame(&self, source: &Path, at: f64, output: &Path) -> MediaResult<()>;

    /// Write `length` seconds of `source`, starting at `start`, to `output`.
    fn extract_range(&self, source: &Path, start: f64, length: f64, output: &Path)
        -> MediaResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaError;

    struct NullTool;

    impl MediaTool for NullTool {
        fn name(&self) -> &str {
            "null"
        }

        fn probe_duration(&self, source: &Path) -> MediaResult<f64> {
            Err(MediaError::FileNotFound(source.to_path_buf()))
        }

        fn capture_frame(&self, _source: &Path, _at: f64, _output: &Path) -> MediaResult<()> {
            Ok(())
        }

        fn extract_range(
            &self,
            _source: &Path,
            _start: f64,
            _length: f64,
            _output: &Path,
        ) -> MediaResult<()> {
            Ok(())
        }
    }

    #[test]
    fn tool_trait_object_works() {
        let tool: Box<dyn MediaTool> = Box::new(NullTool);
        assert_eq!(tool.name(), "null");
        assert!(tool.probe_duration(Path::new("x.mp4")).is_err());
        assert!(tool
            .capture_frame(Path::new("x.mp4"), 1.0, Path::new("x.jpg"))
            .is_ok());
    }
}
