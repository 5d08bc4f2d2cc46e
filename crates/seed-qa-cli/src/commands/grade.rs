//! Grade command - show the grading rules for a single score.

use anyhow::Result;
use clap::Args;
use seed_qa_core::domain::{grade, quality_tier, MAX_SCORE};
use serde::Serialize;

/// Arguments for the grade command.
#[derive(Args)]
pub struct GradeArgs {
    /// Overall quality score (0-100)
    #[arg(value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_SCORE)))]
    pub score: u8,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct GradeReport {
    score: u8,
    quality_tier: seed_qa_core::QualityTier,
    grade: seed_qa_core::Grade,
}

/// Run the grade command.
pub fn run(args: &GradeArgs) -> Result<()> {
    let report = GradeReport {
        score: args.score,
        quality_tier: quality_tier(args.score),
        grade: grade(args.score),
    };

    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "Score {}/100: {} quality, grade {}",
            report.score, report.quality_tier, report.grade
        );
    }
    Ok(())
}
