//! Quality parameters reported for every analyzed seed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of quality dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterName {
    /// Consistency of color across the seed surface.
    #[serde(rename = "Color Uniformity")]
    ColorUniformity,
    /// Length-to-width ratio.
    #[serde(rename = "Shape Ratio")]
    ShapeRatio,
    /// Size variation against the expected range.
    #[serde(rename = "Size Consistency")]
    SizeConsistency,
    /// Surface texture.
    #[serde(rename = "Texture Smoothness")]
    TextureSmoothness,
    /// Definition of the seed outline.
    #[serde(rename = "Edge Sharpness")]
    EdgeSharpness,
    /// Visible defects (cracks, spots, damage).
    #[serde(rename = "Defect Detection")]
    DefectDetection,
    /// Surface luster.
    #[serde(rename = "Brightness/Luster")]
    BrightnessLuster,
}

impl ParameterName {
    /// Number of parameters in every analysis.
    pub const COUNT: usize = 7;

    /// All parameters in their fixed order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::ColorUniformity,
        Self::ShapeRatio,
        Self::SizeConsistency,
        Self::TextureSmoothness,
        Self::EdgeSharpness,
        Self::DefectDetection,
        Self::BrightnessLuster,
    ];

    /// Human-readable label used in output and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ColorUniformity => "Color Uniformity",
            Self::ShapeRatio => "Shape Ratio",
            Self::SizeConsistency => "Size Consistency",
            Self::TextureSmoothness => "Texture Smoothness",
            Self::EdgeSharpness => "Edge Sharpness",
            Self::DefectDetection => "Defect Detection",
            Self::BrightnessLuster => "Brightness/Luster",
        }
    }

    /// Lowest value inside the nominal high range (reported as `good`).
    #[must_use]
    pub const fn good_floor(self) -> u8 {
        match self {
            Self::ColorUniformity | Self::TextureSmoothness | Self::BrightnessLuster => 70,
            Self::ShapeRatio | Self::EdgeSharpness => 65,
            Self::SizeConsistency => 85,
            Self::DefectDetection => 60,
        }
    }

    /// Lowest value still reported as `moderate`; anything below is `poor`.
    #[must_use]
    pub const fn moderate_floor(self) -> u8 {
        match self {
            Self::ColorUniformity | Self::TextureSmoothness | Self::BrightnessLuster => 50,
            Self::ShapeRatio | Self::EdgeSharpness => 45,
            Self::SizeConsistency => 60,
            Self::DefectDetection => 40,
        }
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterStatus {
    /// Within the nominal high range.
    Good,
    /// Acceptable but below the nominal range.
    Moderate,
    /// Below the acceptable range.
    Poor,
}

impl ParameterStatus {
    /// Lowercase label used in output and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for ParameterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One scored quality dimension of an analyzed seed.
///
/// Only constructed through [`SeedAnalysis`](super::SeedAnalysis), which derives
/// `status` from the value and the overall score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityParameter {
    name: ParameterName,
    value: u8,
    interpretation: String,
    status: ParameterStatus,
}

impl QualityParameter {
    pub(crate) const fn new(
        name: ParameterName,
        value: u8,
        interpretation: String,
        status: ParameterStatus,
    ) -> Self {
        Self {
            name,
            value,
            interpretation,
            status,
        }
    }

    /// Parameter name.
    #[must_use]
    pub const fn name(&self) -> ParameterName {
        self.name
    }

    /// Value in 0..=100.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Human-readable interpretation from the quality model.
    #[must_use]
    pub fn interpretation(&self) -> &str {
        &self.interpretation
    }

    /// Derived status.
    #[must_use]
    pub const fn status(&self) -> ParameterStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_order() {
        let labels: Vec<_> = ParameterName::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            [
                "Color Uniformity",
                "Shape Ratio",
                "Size Consistency",
                "Texture Smoothness",
                "Edge Sharpness",
                "Defect Detection",
                "Brightness/Luster",
            ]
        );
    }

    #[test]
    fn test_floors_are_ordered() {
        for name in ParameterName::ALL {
            assert!(name.moderate_floor() < name.good_floor(), "{name}");
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_serialized_names() {
        let json = serde_json::to_string(&ParameterName::BrightnessLuster).unwrap();
        assert_eq!(json, "\"Brightness/Luster\"");
        let json = serde_json::to_string(&ParameterStatus::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
    }
}
