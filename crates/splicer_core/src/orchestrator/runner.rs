//! Batch runner that dispatches planned requests in sequence.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::errors::{BatchError, BatchResult};
use super::types::{BatchContext, BatchInput};
use crate::config::{ExtractionSettings, Settings};
use crate::instructions::{InstructionPlan, PlanEntry};
use crate::logging::{BatchLogger, LogConfig};
use crate::media::{FfmpegTool, MediaResult, MediaTool};
use crate::models::{
    Artifact, BatchReport, ExtractionKind, InstructionOutcome, PlannedRequest, RequestState,
};

/// Default directory for artifacts when none is configured.
const DEFAULT_OUTPUT_DIR: &str = "output_clips";

/// Runs extraction batches against a [`MediaTool`].
///
/// Requests are dispatched one at a time, in plan order. A failed
/// extraction is recorded and the batch moves on; only input, setup and
/// probe failures abort a batch.
pub struct Orchestrator {
    tool: Box<dyn MediaTool>,
    extraction: ExtractionSettings,
    output_dir: PathBuf,
    /// Per-batch log files go here; `None` keeps batch logs in tracing only.
    logs_dir: Option<PathBuf>,
    log_config: LogConfig,
}

impl Orchestrator {
    /// Create an orchestrator using the given tool and naming settings.
    pub fn new(tool: Box<dyn MediaTool>, extraction: ExtractionSettings) -> Self {
        Self {
            tool,
            extraction,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            logs_dir: None,
            log_config: LogConfig::default(),
        }
    }

    /// Create an ffmpeg-backed orchestrator from application settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let tool = FfmpegTool::new(settings.tools.clone());
        Self::new(Box::new(tool), settings.extraction.clone())
            .with_output_dir(&settings.paths.output_folder)
            .with_logs_dir(&settings.paths.logs_folder)
            .with_log_config(LogConfig::from(&settings.logging))
    }

    /// Set the artifact directory (builder pattern).
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Write per-batch log files into `dir` (builder pattern).
    pub fn with_logs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = Some(dir.into());
        self
    }

    pub fn with_log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Probe the duration of `source`.
    pub fn probe(&self, source: &Path) -> BatchResult<f64> {
        if !source.exists() {
            return Err(BatchError::SourceNotFound(source.to_path_buf()));
        }
        self.tool
            .probe_duration(source)
            .map_err(BatchError::probe_failed)
    }

    /// Probe `source` and derive the plan without extracting anything.
    pub fn plan(&self, source: &Path, instructions: &str) -> BatchResult<InstructionPlan> {
        let duration = self.probe(source)?;
        Ok(InstructionPlan::build(instructions, duration))
    }

    /// Run a full batch: validate, prepare, probe, plan and extract.
    pub fn splice(&self, input: BatchInput) -> BatchResult<BatchReport> {
        let input = input.validate()?;

        if !input.source.exists() {
            return Err(BatchError::SourceNotFound(input.source));
        }

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            BatchError::setup_failed(format!(
                "cannot create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let logger = Arc::new(self.create_logger(&input.base_name)?);
        let ctx = BatchContext::new(
            &input.source,
            &input.base_name,
            &self.output_dir,
            Arc::clone(&logger),
        );

        logger.phase("Probe");
        logger.info(&format!("Source: {}", ctx.source.display()));
        let duration = self.tool.probe_duration(&ctx.source).map_err(|e| {
            logger.error(&format!("Could not determine duration: {}", e));
            BatchError::probe_failed(e)
        })?;
        logger.info(&format!("Duration: {:.3}s", duration));

        let plan = InstructionPlan::build(&input.instructions, duration);

        let mut report = self.run_plan(&ctx, &plan);
        report.log_path = logger.log_path().map(Path::to_path_buf);
        logger.flush();

        Ok(report)
    }

    /// Dispatch every planned request of `plan`, strictly in order.
    ///
    /// The report lists one outcome per token, rejected tokens included.
    pub fn run_plan(&self, ctx: &BatchContext, plan: &InstructionPlan) -> BatchReport {
        let mut report = BatchReport::new(&ctx.source, &ctx.base_name, plan.duration);
        let logger = &ctx.logger;

        logger.phase("Plan");
        for (token, reason) in plan.rejected() {
            logger.skip(&format!("'{}': {}", token, reason));
        }
        logger.info(&format!(
            "{} request(s) planned, {} token(s) skipped",
            plan.request_count(),
            plan.rejected().count()
        ));

        if plan.is_empty() {
            logger.info("Nothing to extract");
        } else {
            logger.phase("Extract");
        }

        for entry in &plan.entries {
            let outcome = match entry {
                PlanEntry::Rejected { token, reason } => {
                    InstructionOutcome::rejected(token.as_str(), reason.clone())
                }
                PlanEntry::Planned(planned) => self.dispatch(ctx, planned),
            };
            report.outcomes.push(outcome);
        }

        logger.success(&format!(
            "{} extracted, {} failed, {} skipped",
            report.extracted_count(),
            report.failed_count(),
            report.rejected_count()
        ));

        report
    }

    /// Run one request through its lifecycle.
    fn dispatch(&self, ctx: &BatchContext, planned: &PlannedRequest) -> InstructionOutcome {
        let logger = &ctx.logger;
        let mut state = RequestState::Pending;

        logger.debug(&format!(
            "#{} '{}' {}: {}",
            planned.ordinal, planned.token, state, planned.request
        ));
        state = state.advance(true).unwrap_or(state);

        let result = self.execute(ctx, planned);
        state = state.advance(result.is_ok()).unwrap_or(state);
        debug_assert!(state.is_terminal());

        match result {
            Ok(artifact) => {
                logger.success(&format!("#{} {}: {}", planned.ordinal, state, artifact.file_name()));
                InstructionOutcome::extracted(planned.token.as_str(), planned.ordinal, artifact)
            }
            Err(e) => {
                for line in e.to_string().lines() {
                    logger.output_line(line);
                }
                logger.error(&format!(
                    "#{} '{}' {}: {} failed",
                    planned.ordinal,
                    planned.token,
                    state,
                    planned.request.kind
                ));
                logger.show_tail(self.tool.name());
                InstructionOutcome::failed(planned.token.as_str(), planned.ordinal, e.to_string())
            }
        }
    }

    /// Invoke the media tool for one request.
    fn execute(&self, ctx: &BatchContext, planned: &PlannedRequest) -> MediaResult<Artifact> {
        let request = &planned.request;
        let extension = match request.kind {
            ExtractionKind::Frame => &self.extraction.frame_extension,
            ExtractionKind::Clip => &self.extraction.clip_extension,
        };
        let output = ctx.output_path(&planned.output_file_name(&ctx.base_name, extension));

        match request.kind {
            ExtractionKind::Frame => {
                ctx.logger.command(&format!(
                    "{} frame {:.3}s -> {}",
                    self.tool.name(),
                    request.start,
                    output.display()
                ));
                self.tool.capture_frame(&ctx.source, request.start, &output)?;
            }
            ExtractionKind::Clip => {
                ctx.logger.command(&format!(
                    "{} clip {:.3}s +{:.3}s -> {}",
                    self.tool.name(),
                    request.start,
                    request.duration(),
                    output.display()
                ));
                self.tool
                    .extract_range(&ctx.source, request.start, request.duration(), &output)?;
            }
        }

        Ok(Artifact::new(request.kind, planned.ordinal, output))
    }

    fn create_logger(&self, base_name: &str) -> BatchResult<BatchLogger> {
        match &self.logs_dir {
            Some(dir) => BatchLogger::new(base_name, dir, self.log_config.clone(), None)
                .map_err(|e| {
                    BatchError::setup_failed(format!(
                        "cannot create batch log in {}: {}",
                        dir.display(),
                        e
                    ))
                }),
            None => Ok(BatchLogger::detached(base_name, self.log_config.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_tracing;
    use crate::media::MediaError;
    use crate::models::OutcomeStatus;
    use parking_lot::Mutex;
    use tempfile::{tempdir, TempDir};

    /// Records every call and fails the outputs whose ordinal is listed.
    #[derive(Clone, Default)]
    struct FakeTool {
        duration: Option<f64>,
        failing_ordinals: Vec<u32>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeTool {
        fn with_duration(duration: f64) -> Self {
            Self {
                duration: Some(duration),
                ..Default::default()
            }
        }

        fn failing(mut self, ordinals: &[u32]) -> Self {
            self.failing_ordinals = ordinals.to_vec();
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }

        fn finish(&self, output: &Path) -> MediaResult<()> {
            let name = output
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let ordinal: Option<u32> = name.rsplit('_').next().and_then(|n| n.parse().ok());
            if ordinal.is_some_and(|o| self.failing_ordinals.contains(&o)) {
                return Err(MediaError::command_failed("fake", 1, "Invalid data found"));
            }
            fs::write(output, b"data")
                .map_err(|_| MediaError::OutputMissing(output.to_path_buf()))
        }
    }

    impl MediaTool for FakeTool {
        fn name(&self) -> &str {
            "fake"
        }

        fn probe_duration(&self, source: &Path) -> MediaResult<f64> {
            self.calls.lock().push(format!("probe {}", source.display()));
            self.duration
                .ok_or_else(|| MediaError::probe_failed("duration not found"))
        }

        fn capture_frame(&self, _source: &Path, at: f64, output: &Path) -> MediaResult<()> {
            self.calls.lock().push(format!("frame {}", at));
            self.finish(output)
        }

        fn extract_range(
            &self,
            _source: &Path,
            start: f64,
            length: f64,
            output: &Path,
        ) -> MediaResult<()> {
            self.calls.lock().push(format!("clip {} {}", start, length));
            self.finish(output)
        }
    }

    struct Fixture {
        dir: TempDir,
        source: PathBuf,
    }

    fn fixture() -> Fixture {
        init_test_tracing();
        let dir = tempdir().unwrap();
        let source = dir.path().join("lecture.mp4");
        fs::write(&source, b"not really a video").unwrap();
        Fixture { dir, source }
    }

    fn orchestrator(tool: &FakeTool, fx: &Fixture) -> Orchestrator {
        Orchestrator::new(Box::new(tool.clone()), ExtractionSettings::default())
            .with_output_dir(fx.dir.path().join("out"))
    }

    #[test]
    fn splices_frames_and_clips_in_order() {
        let fx = fixture();
        let tool = FakeTool::with_duration(3600.0);
        let orch = orchestrator(&tool, &fx);

        let report = orch
            .splice(BatchInput::new(&fx.source, "13:00, bogus, 5:00-6:00"))
            .unwrap();

        let names: Vec<String> = report.artifacts().iter().map(|a| a.file_name()).collect();
        assert_eq!(names, vec!["lecture_frame_1.jpg", "lecture_clip_2.mp4"]);
        assert_eq!(report.rejected_count(), 1);
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.outcomes[1].ordinal, None);

        let calls = tool.calls();
        assert!(calls[0].starts_with("probe"));
        assert_eq!(&calls[1..], ["frame 780", "clip 300 60"]);
    }

    #[test]
    fn failed_request_does_not_stop_batch() {
        let fx = fixture();
        let tool = FakeTool::with_duration(120.0).failing(&[2]);
        let orch = orchestrator(&tool, &fx);

        let report = orch.splice(BatchInput::new(&fx.source, "10, 20, 30")).unwrap();

        let ordinals: Vec<u32> = report.artifacts().iter().map(|a| a.ordinal).collect();
        assert_eq!(ordinals, vec![1, 3]);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.is_complete());
        assert!(matches!(report.outcomes[1].status, OutcomeStatus::Failed(_)));
        // All three were attempted.
        assert_eq!(tool.calls().len(), 4);
    }

    #[test]
    fn empty_instructions_give_empty_report() {
        let fx = fixture();
        let tool = FakeTool::with_duration(120.0);
        let orch = orchestrator(&tool, &fx);

        for raw in ["", "   ", " , ,"] {
            let report = orch.splice(BatchInput::new(&fx.source, raw)).unwrap();
            assert!(report.artifacts().is_empty());
            assert!(report.outcomes.is_empty());
        }
    }

    #[test]
    fn missing_input_is_fatal() {
        let fx = fixture();
        let tool = FakeTool::with_duration(120.0);
        let orch = orchestrator(&tool, &fx);

        let err = orch
            .splice(BatchInput {
                source: Some(fx.source.clone()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, BatchError::MissingInput { .. }));
        assert!(tool.calls().is_empty());
    }

    #[test]
    fn nonexistent_source_is_fatal() {
        let fx = fixture();
        let tool = FakeTool::with_duration(120.0);
        let orch = orchestrator(&tool, &fx);

        let err = orch
            .splice(BatchInput::new(fx.dir.path().join("missing.mp4"), "10"))
            .unwrap_err();
        assert!(matches!(err, BatchError::SourceNotFound(_)));
    }

    #[test]
    fn probe_failure_is_fatal() {
        let fx = fixture();
        let tool = FakeTool::default();
        let orch = orchestrator(&tool, &fx);

        let err = orch.splice(BatchInput::new(&fx.source, "10")).unwrap_err();
        assert!(matches!(err, BatchError::ProbeFailed { .. }));
        assert_eq!(tool.calls().len(), 1);
    }

    #[test]
    fn output_names_use_original_file_name_and_extensions() {
        let fx = fixture();
        let tool = FakeTool::with_duration(600.0);
        let extraction = ExtractionSettings {
            frame_extension: "png".to_string(),
            clip_extension: "mkv".to_string(),
        };
        let orch = Orchestrator::new(Box::new(tool.clone()), extraction)
            .with_output_dir(fx.dir.path().join("out"));

        let input = BatchInput::new(&fx.source, "1:00, -0:30").with_file_name("Keynote 2024.mov");
        let report = orch.splice(input).unwrap();

        let names: Vec<String> = report.artifacts().iter().map(|a| a.file_name()).collect();
        assert_eq!(names, vec!["Keynote 2024_frame_1.png", "Keynote 2024_clip_2.mkv"]);
        for artifact in report.artifacts() {
            assert!(artifact.path().starts_with(fx.dir.path().join("out")));
        }
    }

    #[test]
    fn writes_batch_log_when_logs_dir_set() {
        let fx = fixture();
        let tool = FakeTool::with_duration(120.0).failing(&[1]);
        let orch = orchestrator(&tool, &fx).with_logs_dir(fx.dir.path().join("logs"));

        let report = orch.splice(BatchInput::new(&fx.source, "10, nope")).unwrap();

        let log_path = report.log_path.clone().unwrap();
        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.contains("[SKIP] 'nope'"));
        assert!(content.contains("Invalid data found"));
    }

    #[test]
    fn run_plan_uses_given_plan() {
        let fx = fixture();
        let tool = FakeTool::with_duration(0.0);
        let orch = orchestrator(&tool, &fx);
        fs::create_dir_all(orch.output_dir()).unwrap();

        let logger = Arc::new(BatchLogger::detached("talk", LogConfig::default()));
        let ctx = BatchContext::new(&fx.source, "talk", orch.output_dir(), logger);
        let plan = InstructionPlan::build("-1:00, 90-", 120.0);

        let report = orch.run_plan(&ctx, &plan);

        assert_eq!(report.extracted_count(), 2);
        assert_eq!(tool.calls(), vec!["clip 0 60", "clip 90 30"]);
    }

    #[test]
    fn plan_probes_without_extracting() {
        let fx = fixture();
        let tool = FakeTool::with_duration(120.0);
        let orch = orchestrator(&tool, &fx);

        let plan = orch.plan(&fx.source, "10, 200").unwrap();
        assert_eq!(plan.request_count(), 1);
        assert_eq!(tool.calls().len(), 1);
        assert!(!orch.output_dir().exists());
    }
}
