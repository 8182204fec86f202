//! Video Splicer - command line entry point
//!
//! Handles:
//! - Configuration loading
//! - Application-level logging initialization
//! - Dispatch to the splice / plan / probe / check-tools commands

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use splicer_core::config::{ConfigManager, Settings};
use splicer_core::instructions::{format_timecode, InstructionPlan, PlanEntry};
use splicer_core::logging::{init_tracing_with_file, LogLevel};
use splicer_core::media::FfmpegTool;
use splicer_core::models::{BatchReport, OutcomeStatus};
use splicer_core::orchestrator::{BatchInput, Orchestrator};

/// Default config path: .config/splicer.toml (relative to current working directory)
fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("splicer.toml")
}

#[derive(Parser)]
#[command(author, version, about = "Extract frames and clips from a video by timestamp", long_about = None)]
struct Cli {
    /// Config file (created with defaults if missing)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract frames and clips from a video
    Splice {
        /// Source video file
        video: PathBuf,

        /// Comma-separated instructions, e.g. "13:00, -5:00, 20:00-, 1:00-2:30"
        #[arg(allow_hyphen_values = true)]
        instructions: String,

        /// Directory for extracted files (overrides config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Original file name used for output names (defaults to the video's name)
        #[arg(short, long)]
        name: Option<String>,

        /// Print the full batch report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show what a set of instructions would extract, without extracting
    Plan {
        /// Comma-separated instructions
        #[arg(allow_hyphen_values = true)]
        instructions: String,

        /// Video duration in seconds
        #[arg(short, long, conflicts_with = "video", required_unless_present = "video")]
        duration: Option<f64>,

        /// Probe the duration from this video instead
        #[arg(long)]
        video: Option<PathBuf>,

        /// Print the plan as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the duration of a video in seconds
    Probe {
        /// Video file to probe
        video: PathBuf,
    },
    /// Check that ffmpeg and ffprobe can be run
    CheckTools,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logs directory path)
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let logs_dir = config_manager.logs_folder();
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config_manager.settings().logging.level
    };
    let _log_guard = init_tracing_with_file(level, &logs_dir);

    tracing::info!("Video Splicer starting");
    tracing::debug!("Config: {}", config_path.display());
    tracing::debug!("Core version: {}", splicer_core::version());

    let settings = config_manager.into_settings();

    match cli.command {
        Commands::Splice {
            video,
            instructions,
            output_dir,
            name,
            json,
        } => splice(&settings, video, instructions, output_dir, name, json),
        Commands::Plan {
            instructions,
            duration,
            video,
            json,
        } => plan(&settings, &instructions, duration, video.as_deref(), json),
        Commands::Probe { video } => probe(&settings, &video),
        Commands::CheckTools => check_tools(&settings),
    }
}

fn splice(
    settings: &Settings,
    video: PathBuf,
    instructions: String,
    output_dir: Option<PathBuf>,
    name: Option<String>,
    json: bool,
) -> Result<()> {
    let mut orchestrator = Orchestrator::from_settings(settings);
    if let Some(dir) = output_dir {
        orchestrator = orchestrator.with_output_dir(dir);
    }

    let mut input = BatchInput::new(video, instructions);
    if let Some(name) = name {
        input = input.with_file_name(name);
    }

    let report = orchestrator.splice(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, settings.paths.url_prefix());
    }
    Ok(())
}

fn print_report(report: &BatchReport, url_prefix: Option<&str>) {
    for outcome in &report.outcomes {
        match &outcome.status {
            OutcomeStatus::Extracted(artifact) => println!("{}", artifact.reference(url_prefix)),
            _ => eprintln!("'{}': {}", outcome.token, outcome.describe()),
        }
    }

    if let Some(path) = &report.log_path {
        eprintln!("Log: {}", path.display());
    }
}

fn plan(
    settings: &Settings,
    instructions: &str,
    duration: Option<f64>,
    video: Option<&Path>,
    json: bool,
) -> Result<()> {
    let plan = match (duration, video) {
        (Some(duration), _) => {
            if !duration.is_finite() || duration < 0.0 {
                bail!("Duration must be a non-negative number of seconds");
            }
            InstructionPlan::build(instructions, duration)
        }
        (None, Some(video)) => Orchestrator::from_settings(settings).plan(video, instructions)?,
        (None, None) => bail!("Missing input: either --duration or --video is required"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Duration: {}", format_timecode(plan.duration));
    for entry in &plan.entries {
        match entry {
            PlanEntry::Planned(planned) => println!(
                "#{:<3} {:<12} {}",
                planned.ordinal, planned.token, planned.request
            ),
            PlanEntry::Rejected { token, reason } => {
                println!("skip {:<12} {}", token, reason)
            }
        }
    }
    Ok(())
}

fn probe(settings: &Settings, video: &Path) -> Result<()> {
    let duration = Orchestrator::from_settings(settings).probe(video)?;
    println!("{:.3}\t{}", duration, format_timecode(duration));
    Ok(())
}

fn check_tools(settings: &Settings) -> Result<()> {
    let tool = FfmpegTool::new(settings.tools.clone());
    tool.check_available()
        .context("ffmpeg/ffprobe not usable; check [tools] in the config file")?;
    println!(
        "ok: {} and {}",
        settings.tools.ffmpeg_path, settings.tools.ffprobe_path
    );
    Ok(())
}
