//! Analyze command - grade seed images and export a report.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use seed_qa_adapters::{BlobPreviewStore, FsCandidateSource, PdfRenderer};
use seed_qa_core::{
    AnalysisSession, OrchestratorConfig, QualityTier, RandomQualityModel, ReportExporter,
    SessionConfig,
};
use time::OffsetDateTime;
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{CliNotifier, JsonOutput};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Hardcoded default values.
mod defaults {
    pub const MAX_FILE_SIZE_MB: u64 = 10;
    pub const REPORT_DIR: &str = ".";
}

const MIB: u64 = 1024 * 1024;

/// Shared arguments for batch analysis.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Image files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Directory for the PDF report
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Do not write a PDF report
    #[arg(long)]
    pub no_report: bool,

    /// Keep successfully analyzed images when others fail
    #[arg(long)]
    pub partial: bool,

    /// Per-image analysis timeout in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Simulated model latency in milliseconds
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Seed for reproducible placeholder scores
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-file size limit in MiB
    #[arg(long, value_name = "MB", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_file_size_mb: Option<u64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress notifications and progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.max_file_size_mb = args.max_file_size_mb.or(config.upload.max_file_size_mb);
        args.timeout_ms = args.timeout_ms.or(config.analysis.timeout_ms);
        args.latency_ms = args.latency_ms.or(config.analysis.latency_ms);
        args.seed = args.seed.or(config.analysis.seed);
        if !args.partial {
            args.partial = config.analysis.partial.unwrap_or(false);
        }

        // CLI --no-report always wins, then config
        if !args.no_report {
            if let Some(enabled) = config.report.enabled {
                args.no_report = !enabled;
            }
        }
        if args.report_dir.is_none() {
            args.report_dir.clone_from(&config.report.dir);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn max_file_size(&self) -> u64 {
        self.max_file_size_mb
            .unwrap_or(defaults::MAX_FILE_SIZE_MB)
            .saturating_mul(MIB)
    }

    fn report_dir(&self) -> &Path {
        self.report_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(defaults::REPORT_DIR))
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_file_size: self.max_file_size(),
            orchestrator: OrchestratorConfig {
                item_timeout: self.timeout_ms.map(Duration::from_millis),
            },
        }
    }

    fn model(&self) -> RandomQualityModel {
        let model = self
            .seed
            .map_or_else(RandomQualityModel::new, RandomQualityModel::seeded);
        model.with_latency(Duration::from_millis(self.latency_ms.unwrap_or(0)))
    }
}

/// Result of running the analyze command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct AnalyzeResult {
    /// Number of analyzed images.
    pub analyzed: usize,
    /// Number of images that failed analysis (partial mode).
    pub failed: usize,
    /// Number of low-quality images.
    pub low_quality: usize,
    /// Where the report was written, if any.
    pub report: Option<PathBuf>,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub async fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    info!("Running analyze command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let source = FsCandidateSource::new(args.paths.clone(), args.recursive)
        .with_read_limit(args.max_file_size());
    let candidates = source.candidates();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let notifier = Arc::new(CliNotifier::new(args.quiet, show_progress));

    let mut session = AnalysisSession::new(
        Arc::new(args.model()),
        Arc::new(BlobPreviewStore::new()),
        notifier.clone(),
        args.session_config(),
    );
    let acceptance = session.add_files(candidates);
    debug!(
        "{} accepted, {} rejected",
        acceptance.accepted_count(),
        acceptance.rejected.len()
    );

    notifier.begin(session.selection().len());
    let summary = if args.partial {
        session.submit_settled().await?
    } else {
        session.submit().await?
    };

    for failure in &summary.failures {
        notifier.item_failed(&failure.file_name, &failure.error.to_string());
    }

    let Some(batch) = session.results().filter(|_| summary.analyzed > 0) else {
        anyhow::bail!("No image could be analyzed");
    };

    let mut output = JsonOutput::stdout();
    match args.format() {
        OutputFormat::Jsonl => output.write_lines(batch)?,
        OutputFormat::Json => output.write_array(batch, args.pretty)?,
    }
    output.flush()?;

    let report = if args.no_report {
        None
    } else {
        let exporter = ReportExporter::new(PdfRenderer::new());
        let exported = session.export_report(&exporter, OffsetDateTime::now_utc())?;
        let path = write_report(args.report_dir(), &exported.file_name, &exported.bytes)?;
        notifier.report_written(&path, exported.page_count);
        Some(path)
    };

    let low_quality = batch.count_tier(QualityTier::Low);
    let failed = summary.failures.len();
    let exit_code = if failed > 0 {
        ExitCode::Error
    } else if low_quality > 0 {
        ExitCode::LowQuality
    } else {
        ExitCode::Success
    };

    Ok(AnalyzeResult {
        analyzed: summary.analyzed,
        failed,
        low_quality,
        report,
        exit_code,
    })
}

fn write_report(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(path)
}
