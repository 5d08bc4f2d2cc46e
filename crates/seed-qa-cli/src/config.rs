//! Configuration file support for seed-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/seed-qa/config.toml` (lowest priority)
//! - Project-local: `.seed-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Project-local config file name.
pub const PROJECT_CONFIG_NAME: &str = ".seed-qa.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Upload validation settings.
    pub upload: UploadConfig,
    /// Batch analysis settings.
    pub analysis: AnalysisConfig,
    /// Report export settings.
    pub report: ReportConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Upload validation configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Per-file size limit in MiB.
    pub max_file_size_mb: Option<u64>,
}

/// Batch analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Per-item timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Keep successful items when others fail.
    pub partial: Option<bool>,
    /// Simulated latency of the placeholder model in milliseconds.
    pub latency_ms: Option<u64>,
    /// Seed for the placeholder model.
    pub seed: Option<u64>,
}

/// Report export configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Enable/disable writing the PDF report.
    pub enabled: Option<bool>,
    /// Directory the report is written to.
    pub dir: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/seed-qa/config.toml`
    /// 2. Project-local: `.seed-qa.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.validate() {
            eprintln!("warning: {problem}");
        }

        config
    }

    /// Drop values outside their acceptable ranges, so defaults apply instead.
    ///
    /// Returns one message per dropped value.
    fn validate(&mut self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.upload.max_file_size_mb == Some(0) {
            self.upload.max_file_size_mb = None;
            problems.push("upload.max_file_size_mb must be at least 1".to_string());
        }
        if self.analysis.timeout_ms == Some(0) {
            self.analysis.timeout_ms = None;
            problems.push("analysis.timeout_ms must be at least 1".to_string());
        }
        if let Some(f) = self.output.format.take_if(|f| f != "json" && f != "jsonl") {
            problems.push(format!("output.format must be 'json' or 'jsonl', got '{f}'"));
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Upload
        self.upload.max_file_size_mb = other
            .upload
            .max_file_size_mb
            .or(self.upload.max_file_size_mb);

        // Analysis
        self.analysis.timeout_ms = other.analysis.timeout_ms.or(self.analysis.timeout_ms);
        self.analysis.partial = other.analysis.partial.or(self.analysis.partial);
        self.analysis.latency_ms = other.analysis.latency_ms.or(self.analysis.latency_ms);
        self.analysis.seed = other.analysis.seed.or(self.analysis.seed);

        // Report
        self.report.enabled = other.report.enabled.or(self.report.enabled);
        self.report.dir = other.report.dir.or_else(|| self.report.dir.take());

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("seed-qa").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.seed-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_CONFIG_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
