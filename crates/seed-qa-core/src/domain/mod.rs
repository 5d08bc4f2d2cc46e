//! Core domain types for seed quality analysis.

mod analysis;
pub mod grading;
mod parameter;
mod selection;

pub use analysis::{AnalysisBatch, QualityResult, RawParameter, SeedAnalysis, MAX_SCORE};
pub use grading::{grade, parameter_status, quality_tier, Grade, QualityTier};
pub use parameter::{ParameterName, ParameterStatus, QualityParameter};
pub use selection::{ImageData, SelectionEntry, SourceFile};
