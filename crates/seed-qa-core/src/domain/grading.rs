//! Scoring and grading rules.
//!
//! Pure, total functions over scores in 0..=100. Values above 100 are treated
//! like 100.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ParameterName, ParameterStatus};

/// Lowest score in the High tier (grade A).
pub const HIGH_MIN_SCORE: u8 = 85;
/// Lowest score in the Medium tier (grade B).
pub const MEDIUM_MIN_SCORE: u8 = 70;
/// Lowest overall score at which defect detection reports `good`.
pub const DEFECT_GOOD_MIN_SCORE: u8 = 80;

/// Coarse quality classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityTier {
    /// Score 85 and above.
    High,
    /// Score 70 to 84.
    Medium,
    /// Score below 70.
    Low,
}

impl QualityTier {
    /// Tier for a score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= HIGH_MIN_SCORE {
            Self::High
        } else if score >= MEDIUM_MIN_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Label used in output and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Letter grade shown alongside the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    /// Score 85 and above.
    A,
    /// Score 70 to 84.
    B,
    /// Score below 70.
    C,
}

impl Grade {
    /// Grade for a score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= HIGH_MIN_SCORE {
            Self::A
        } else if score >= MEDIUM_MIN_SCORE {
            Self::B
        } else {
            Self::C
        }
    }

    /// Letter used in output and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a score to its quality tier.
#[must_use]
pub const fn quality_tier(score: u8) -> QualityTier {
    QualityTier::from_score(score)
}

/// Maps a score to its letter grade.
#[must_use]
pub const fn grade(score: u8) -> Grade {
    Grade::from_score(score)
}

/// Derives a parameter's status from its value and the item's overall score.
///
/// Defect detection ignores its own value and is `good` only when the overall
/// score is at least [`DEFECT_GOOD_MIN_SCORE`], `moderate` otherwise.
#[must_use]
pub const fn parameter_status(name: ParameterName, value: u8, score: u8) -> ParameterStatus {
    if let ParameterName::DefectDetection = name {
        return if score >= DEFECT_GOOD_MIN_SCORE {
            ParameterStatus::Good
        } else {
            ParameterStatus::Moderate
        };
    }

    if value >= name.good_floor() {
        ParameterStatus::Good
    } else if value >= name.moderate_floor() {
        ParameterStatus::Moderate
    } else {
        ParameterStatus::Poor
    }
}
