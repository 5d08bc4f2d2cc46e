//! CLI command definitions and handlers.

pub mod analyze;
pub mod grade;

use clap::{Parser, Subcommand};

/// Seed QA - Batch seed image quality analysis
#[derive(Parser)]
#[command(name = "seed-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared analyze arguments (paths, limits, flags).
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze seed images and export a graded report
    Analyze(analyze::AnalyzeArgs),
    /// Show the quality tier and grade for a score
    Grade(grade::GradeArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image was analyzed and none is low quality.
    Success,
    /// The batch was analyzed but at least one image is low quality.
    LowQuality,
    /// Nothing could be analyzed, or an I/O error occurred.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::LowQuality => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
