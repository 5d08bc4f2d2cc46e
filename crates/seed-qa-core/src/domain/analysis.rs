//! Quality model output and the per-item analyses built from it.

use serde::{Deserialize, Serialize};

use super::grading::{grade, parameter_status, quality_tier, Grade, QualityTier};
use super::{ParameterName, QualityParameter};
use crate::error::AnalysisError;
use crate::ports::PreviewHandle;

/// Maximum score and parameter value.
pub const MAX_SCORE: u8 = 100;

/// One raw parameter as produced by a quality model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParameter {
    /// Parameter name.
    pub name: ParameterName,
    /// Value in 0..=100.
    pub value: u8,
    /// Human-readable interpretation.
    pub interpretation: String,
}

impl RawParameter {
    /// Creates a raw parameter.
    pub fn new(name: ParameterName, value: u8, interpretation: impl Into<String>) -> Self {
        Self {
            name,
            value,
            interpretation: interpretation.into(),
        }
    }
}

/// Output of one quality model invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityResult {
    /// Overall score in 0..=100.
    pub score: u8,
    /// Exactly seven parameters, in [`ParameterName::ALL`] order.
    pub parameters: Vec<RawParameter>,
}

impl QualityResult {
    /// Checks the result against the quality model contract.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidResult`] if the score or a value is out of
    /// range, or the parameters are not exactly the fixed set in order.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.score > MAX_SCORE {
            return Err(AnalysisError::InvalidResult(format!(
                "score {} exceeds {MAX_SCORE}",
                self.score
            )));
        }
        if self.parameters.len() != ParameterName::COUNT {
            return Err(AnalysisError::InvalidResult(format!(
                "expected {} parameters, got {}",
                ParameterName::COUNT,
                self.parameters.len()
            )));
        }
        for (expected, param) in ParameterName::ALL.iter().zip(&self.parameters) {
            if param.name != *expected {
                return Err(AnalysisError::InvalidResult(format!(
                    "expected parameter '{expected}', got '{}'",
                    param.name
                )));
            }
            if param.value > MAX_SCORE {
                return Err(AnalysisError::InvalidResult(format!(
                    "'{}' value {} exceeds {MAX_SCORE}",
                    param.name, param.value
                )));
            }
        }
        Ok(())
    }
}

/// Graded analysis of one submitted image. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedAnalysis {
    file_name: String,
    image_reference: PreviewHandle,
    score: u8,
    quality_tier: QualityTier,
    grade: Grade,
    parameters: Vec<QualityParameter>,
}

impl SeedAnalysis {
    /// Grades a quality result for a file, retaining its preview.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidResult`] if the result violates the
    /// quality model contract.
    pub fn from_quality_result(
        file_name: impl Into<String>,
        image_reference: PreviewHandle,
        result: QualityResult,
    ) -> Result<Self, AnalysisError> {
        result.validate()?;

        let score = result.score;
        let parameters = result
            .parameters
            .into_iter()
            .map(|p| {
                let status = parameter_status(p.name, p.value, score);
                QualityParameter::new(p.name, p.value, p.interpretation, status)
            })
            .collect();

        Ok(Self {
            file_name: file_name.into(),
            image_reference,
            score,
            quality_tier: quality_tier(score),
            grade: grade(score),
            parameters,
        })
    }

    /// Name of the analyzed file.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Preview of the analyzed file.
    #[must_use]
    pub const fn image_reference(&self) -> &PreviewHandle {
        &self.image_reference
    }

    /// Overall score in 0..=100.
    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// Tier derived from the score.
    #[must_use]
    pub const fn quality_tier(&self) -> QualityTier {
        self.quality_tier
    }

    /// Grade derived from the score.
    #[must_use]
    pub const fn grade(&self) -> Grade {
        self.grade
    }

    /// The seven graded parameters in fixed order.
    #[must_use]
    pub fn parameters(&self) -> &[QualityParameter] {
        &self.parameters
    }
}

/// Analyses of a submitted batch, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisBatch {
    items: Vec<SeedAnalysis>,
}

impl AnalysisBatch {
    /// Wraps analyses that are already in submission order.
    #[must_use]
    pub const fn new(items: Vec<SeedAnalysis>) -> Self {
        Self { items }
    }

    /// Analyses in submission order.
    #[must_use]
    pub fn items(&self) -> &[SeedAnalysis] {
        &self.items
    }

    /// Number of analyses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the batch holds no analyses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates analyses in submission order.
    pub fn iter(&self) -> std::slice::Iter<'_, SeedAnalysis> {
        self.items.iter()
    }

    /// Number of analyses in the given tier.
    #[must_use]
    pub fn count_tier(&self, tier: QualityTier) -> usize {
        self.items.iter().filter(|a| a.quality_tier == tier).count()
    }
}

impl<'a> IntoIterator for &'a AnalysisBatch {
    type Item = &'a SeedAnalysis;
    type IntoIter = std::slice::Iter<'a, SeedAnalysis>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn result(score: u8, value: u8) -> QualityResult {
        QualityResult {
            score,
            parameters: ParameterName::ALL
                .iter()
                .map(|&name| RawParameter::new(name, value, "ok"))
                .collect(),
        }
    }

    #[test]
    fn test_validate_accepts_contract() {
        assert!(result(100, 100).validate().is_ok());
        assert!(result(0, 0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let err = result(101, 50).validate().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResult(_)));
    }

    #[test]
    fn test_validate_rejects_out_of_range_value() {
        let mut r = result(90, 50);
        r.parameters[3].value = 150;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_parameter() {
        let mut r = result(90, 50);
        r.parameters.pop();
        assert!(r.validate().unwrap_err().to_string().contains("expected 7"));
    }

    #[test]
    fn test_validate_rejects_wrong_order() {
        let mut r = result(90, 50);
        r.parameters.swap(0, 1);
        assert!(r.validate().is_err());
    }
}
