//! Artifacts produced by successful extractions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::enums::ExtractionKind;

/// A file written to the output directory by one extraction.
///
/// Ownership passes to the caller once the batch returns; the splicer
/// never touches the file again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Frame or clip.
    pub kind: ExtractionKind,
    /// Ordinal the file name was built from.
    pub ordinal: u32,
    /// Full path of the written file.
    pub path: PathBuf,
}

impl Artifact {
    pub fn new(kind: ExtractionKind, ordinal: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            ordinal,
            path: path.into(),
        }
    }

    /// File name component of the artifact path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Caller-facing reference to this artifact.
    ///
    /// With a URL prefix (e.g. `/output_clips`) this is `"{prefix}/{file_name}"`,
    /// otherwise the filesystem path.
    pub fn reference(&self, url_prefix: Option<&str>) -> String {
        match url_prefix.map(|p| p.trim_end_matches('/')) {
            Some(prefix) => format!("{}/{}", prefix, self.file_name()),
            None => self.path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_with_prefix() {
        let artifact = Artifact::new(ExtractionKind::Clip, 2, "/srv/public/output_clips/a_clip_2.mp4");
        assert_eq!(
            artifact.reference(Some("/output_clips/")),
            "/output_clips/a_clip_2.mp4"
        );
    }

    #[test]
    fn reference_without_prefix_is_path() {
        let artifact = Artifact::new(ExtractionKind::Frame, 1, "out/a_frame_1.jpg");
        assert_eq!(artifact.file_name(), "a_frame_1.jpg");
        assert_eq!(
            artifact.reference(None),
            Path::new("out/a_frame_1.jpg").display().to_string()
        );
    }
}
