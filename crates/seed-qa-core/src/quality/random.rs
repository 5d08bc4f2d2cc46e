//! Placeholder quality model.
//!
//! Produces uniformly random scores and parameter values in plausible ranges.
//! It stands in for a real computer-vision backend behind the `QualityModel`
//! port and only checks that the payload looks like an image.

use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::domain::{ParameterName, QualityResult, RawParameter, SourceFile};
use crate::error::AnalysisError;
use crate::ports::QualityModel;

/// Range of generated overall scores.
pub const SCORE_RANGE: RangeInclusive<u8> = 60..=99;

/// Value range and interpretation generated for one parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterProfile {
    /// Parameter name.
    pub name: ParameterName,
    /// Lowest generated value.
    pub min: u8,
    /// Highest generated value.
    pub max: u8,
    /// Interpretation attached to every generated value.
    pub interpretation: &'static str,
}

/// Generation profiles, in parameter order.
pub const PARAMETER_PROFILES: [ParameterProfile; ParameterName::COUNT] = [
    ParameterProfile {
        name: ParameterName::ColorUniformity,
        min: 70,
        max: 99,
        interpretation: "Consistent color distribution across seed surface",
    },
    ParameterProfile {
        name: ParameterName::ShapeRatio,
        min: 65,
        max: 99,
        interpretation: "Length-to-width ratio within optimal range",
    },
    ParameterProfile {
        name: ParameterName::SizeConsistency,
        min: 60,
        max: 84,
        interpretation: "Size variation within acceptable limits",
    },
    ParameterProfile {
        name: ParameterName::TextureSmoothness,
        min: 70,
        max: 99,
        interpretation: "Surface texture appears smooth and healthy",
    },
    ParameterProfile {
        name: ParameterName::EdgeSharpness,
        min: 65,
        max: 99,
        interpretation: "Well-defined edges indicate proper development",
    },
    ParameterProfile {
        name: ParameterName::DefectDetection,
        min: 60,
        max: 99,
        interpretation: "Minimal visible defects detected",
    },
    ParameterProfile {
        name: ParameterName::BrightnessLuster,
        min: 70,
        max: 99,
        interpretation: "Good luster indicating seed vitality",
    },
];

/// Random placeholder implementation of [`QualityModel`].
pub struct RandomQualityModel {
    rng: Mutex<StdRng>,
    latency: Duration,
}

impl RandomQualityModel {
    /// Creates a model seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Creates a reproducible model.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            latency: Duration::ZERO,
        }
    }

    /// Simulates a slow backend by sleeping before every answer.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn sample(&self) -> QualityResult {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let score = rng.random_range(SCORE_RANGE);
        let parameters = PARAMETER_PROFILES
            .iter()
            .map(|p| RawParameter::new(p.name, rng.random_range(p.min..=p.max), p.interpretation))
            .collect();
        QualityResult { score, parameters }
    }
}

impl Default for RandomQualityModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QualityModel for RandomQualityModel {
    fn name(&self) -> &'static str {
        "random-placeholder"
    }

    async fn analyze(&self, image: &SourceFile) -> Result<QualityResult, AnalysisError> {
        image::guess_format(image.data.as_bytes()).map_err(|e| {
            AnalysisError::CorruptImage(format!("{}: {e}", image.name))
        })?;

        if !self.latency.is_zero() {
            trace!("Simulating {:?} latency for {}", self.latency, image.name);
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.sample())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::ImageData;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn png() -> SourceFile {
        SourceFile::new("seed.png", "image/png", ImageData::from(PNG_MAGIC))
    }

    #[test]
    fn test_profiles_follow_parameter_order() {
        let names: Vec<_> = PARAMETER_PROFILES.iter().map(|p| p.name).collect();
        assert_eq!(names, ParameterName::ALL);
    }

    #[tokio::test]
    async fn test_results_satisfy_contract() {
        let model = RandomQualityModel::seeded(7);
        for _ in 0..50 {
            let result = model.analyze(&png()).await.unwrap();
            result.validate().unwrap();
            assert!(SCORE_RANGE.contains(&result.score));
            for (param, profile) in result.parameters.iter().zip(&PARAMETER_PROFILES) {
                assert!((profile.min..=profile.max).contains(&param.value));
                assert_eq!(param.interpretation, profile.interpretation);
            }
        }
    }

    #[tokio::test]
    async fn test_seeded_models_are_reproducible() {
        let a = RandomQualityModel::seeded(42).analyze(&png()).await.unwrap();
        let b = RandomQualityModel::seeded(42).analyze(&png()).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_rejects_non_image_payload() {
        let model = RandomQualityModel::seeded(1);
        let file = SourceFile::new("fake.png", "image/png", ImageData::from(&b"hello"[..]));
        let err = model.analyze(&file).await.unwrap_err();
        assert!(matches!(err, AnalysisError::CorruptImage(_)));
    }
}
