//! Per-instruction outcomes and the batch report.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::artifact::Artifact;
use crate::instructions::InstructionError;

/// What happened to one instruction token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The external tool wrote an artifact.
    Extracted(Artifact),
    /// The token did not parse against the source duration.
    Rejected(InstructionError),
    /// The token parsed but the external tool failed.
    Failed(String),
}

/// Structured result for one instruction, in original token order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionOutcome {
    /// Trimmed instruction token.
    pub token: String,
    /// Ordinal assigned to the token (`None` when it was rejected).
    pub ordinal: Option<u32>,
    pub status: OutcomeStatus,
}

impl InstructionOutcome {
    pub fn extracted(token: impl Into<String>, ordinal: u32, artifact: Artifact) -> Self {
        Self {
            token: token.into(),
            ordinal: Some(ordinal),
            status: OutcomeStatus::Extracted(artifact),
        }
    }

    pub fn rejected(token: impl Into<String>, reason: InstructionError) -> Self {
        Self {
            token: token.into(),
            ordinal: None,
            status: OutcomeStatus::Rejected(reason),
        }
    }

    pub fn failed(token: impl Into<String>, ordinal: u32, reason: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ordinal: Some(ordinal),
            status: OutcomeStatus::Failed(reason.into()),
        }
    }

    /// The artifact, if this instruction produced one.
    pub fn artifact(&self) -> Option<&Artifact> {
        match &self.status {
            OutcomeStatus::Extracted(artifact) => Some(artifact),
            _ => None,
        }
    }

    /// Short human-readable description of the outcome.
    pub fn describe(&self) -> String {
        match &self.status {
            OutcomeStatus::Extracted(artifact) => format!("extracted {}", artifact.file_name()),
            OutcomeStatus::Rejected(reason) => format!("skipped: {}", reason),
            OutcomeStatus::Failed(reason) => format!("failed: {}", reason),
        }
    }
}

/// Result of a whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Source video path.
    pub source: PathBuf,
    /// Base name used for output files.
    pub base_name: String,
    /// Probed source duration in seconds.
    pub duration: f64,
    /// One entry per non-empty instruction token, in token order.
    pub outcomes: Vec<InstructionOutcome>,
    /// Per-batch log file, if one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

impl BatchReport {
    pub fn new(source: impl Into<PathBuf>, base_name: impl Into<String>, duration: f64) -> Self {
        Self {
            source: source.into(),
            base_name: base_name.into(),
            duration,
            outcomes: Vec::new(),
            log_path: None,
        }
    }

    /// Successful artifacts in processing order.
    pub fn artifacts(&self) -> Vec<&Artifact> {
        self.outcomes.iter().filter_map(|o| o.artifact()).collect()
    }

    /// Caller-facing references for all artifacts, in processing order.
    pub fn references(&self, url_prefix: Option<&str>) -> Vec<String> {
        self.artifacts()
            .into_iter()
            .map(|a| a.reference(url_prefix))
            .collect()
    }

    pub fn extracted_count(&self) -> usize {
        self.artifacts().len()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, OutcomeStatus::Rejected(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, OutcomeStatus::Failed(_)))
            .count()
    }

    /// Check if every instruction produced an artifact.
    pub fn is_complete(&self) -> bool {
        self.rejected_count() == 0 && self.failed_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractionKind;

    fn sample_report() -> BatchReport {
        let mut report = BatchReport::new("in.mp4", "in", 120.0);
        report.outcomes.push(InstructionOutcome::extracted(
            "10",
            1,
            Artifact::new(ExtractionKind::Frame, 1, "out/in_frame_1.jpg"),
        ));
        report.outcomes.push(InstructionOutcome::rejected(
            "bogus",
            InstructionError::InvalidTime {
                text: "bogus".to_string(),
            },
        ));
        report
            .outcomes
            .push(InstructionOutcome::failed("20-30", 2, "ffmpeg exited with 1"));
        report
    }

    #[test]
    fn counts_each_status() {
        let report = sample_report();
        assert_eq!(report.extracted_count(), 1);
        assert_eq!(report.rejected_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.is_complete());
    }

    #[test]
    fn references_only_include_artifacts() {
        let report = sample_report();
        assert_eq!(
            report.references(Some("/output_clips")),
            vec!["/output_clips/in_frame_1.jpg".to_string()]
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        assert!(json.contains("\"extracted\""));
        assert!(json.contains("\"rejected\""));
        assert!(json.contains("\"failed\""));
        assert!(!json.contains("log_path"));
    }
}
