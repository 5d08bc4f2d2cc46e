//! Builders for test inputs: encoded images, file candidates and analyses.

use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, Rgb, RgbImage};
use seed_qa_core::domain::{
    AnalysisBatch, ImageData, ParameterName, QualityResult, RawParameter, SeedAnalysis, SourceFile,
};
use seed_qa_core::ports::PreviewHandle;

use crate::mocks::RecordingPreviewStore;

/// Builder for encoded seed images and the file candidates wrapping them.
pub struct SeedImageBuilder;

impl SeedImageBuilder {
    /// A small seed-like image: a brown ellipse on a light background.
    #[must_use]
    pub fn seed(width: u32, height: u32) -> RgbImage {
        let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let (rx, ry) = (f64::from(width) / 3.0, f64::from(height) / 4.0);
        RgbImage::from_fn(width, height, |x, y| {
            let dx = (f64::from(x) - cx) / rx;
            let dy = (f64::from(y) - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                Rgb([139, 90, 43])
            } else {
                Rgb([240, 236, 228])
            }
        })
    }

    /// Encodes an image in `format`.
    ///
    /// # Panics
    ///
    /// Panics if the encoder fails, which only happens for formats the
    /// `image` crate was built without.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).expect("encode test image");
        buf.into_inner()
    }

    /// PNG bytes of a seed image.
    #[must_use]
    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        Self::encode(&Self::seed(width, height), ImageFormat::Png)
    }

    /// JPEG bytes of a seed image.
    #[must_use]
    pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        Self::encode(&Self::seed(width, height), ImageFormat::Jpeg)
    }

    /// A valid PNG candidate.
    #[must_use]
    pub fn png(name: &str) -> SourceFile {
        SourceFile::new(name, "image/png", ImageData::from(Self::png_bytes(16, 16)))
    }

    /// A valid JPEG candidate.
    #[must_use]
    pub fn jpeg(name: &str) -> SourceFile {
        SourceFile::new(name, "image/jpeg", ImageData::from(Self::jpeg_bytes(16, 16)))
    }

    /// A candidate declaring `media_type` and `size` without carrying that
    /// many bytes. Useful for size-limit checks.
    #[must_use]
    pub fn declared(name: &str, media_type: &str, size: u64) -> SourceFile {
        SourceFile::new(name, media_type, ImageData::from(vec![0u8; 8])).with_size(size)
    }
}

/// Builder for quality results and graded analyses.
pub struct AnalysisBuilder;

impl AnalysisBuilder {
    /// A valid result with `score` and every parameter at 80.
    #[must_use]
    pub fn quality_result(score: u8) -> QualityResult {
        Self::quality_result_with(score, |_| 80)
    }

    /// A valid result with parameter values chosen by `value`.
    #[must_use]
    pub fn quality_result_with(score: u8, value: impl Fn(ParameterName) -> u8) -> QualityResult {
        QualityResult {
            score,
            parameters: ParameterName::ALL
                .iter()
                .map(|&name| RawParameter::new(name, value(name), format!("{} looks fine", name.label())))
                .collect(),
        }
    }

    /// A preview handle backed by a throwaway store.
    #[must_use]
    pub fn preview(name: &str) -> PreviewHandle {
        PreviewHandle::acquire(
            Arc::new(RecordingPreviewStore::new()),
            name,
            &ImageData::from(vec![0u8]),
        )
    }

    /// A graded analysis for `file_name` with `score`.
    ///
    /// # Panics
    ///
    /// Panics if `score` is above 100.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn analysis(file_name: &str, score: u8) -> SeedAnalysis {
        SeedAnalysis::from_quality_result(
            file_name,
            Self::preview(file_name),
            Self::quality_result(score),
        )
        .expect("valid quality result")
    }

    /// A batch of `count` analyses named `seed-1.png`, `seed-2.png`, ...
    #[must_use]
    pub fn batch(count: usize, score: u8) -> AnalysisBatch {
        AnalysisBatch::new(
            (1..=count)
                .map(|i| Self::analysis(&format!("seed-{i}.png"), score))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_bytes_are_png() {
        let bytes = SeedImageBuilder::png_bytes(8, 8);
        assert_eq!(image::guess_format(&bytes).ok(), Some(ImageFormat::Png));
    }

    #[test]
    fn test_jpeg_candidate() {
        let file = SeedImageBuilder::jpeg("a.jpg");
        assert!(file.is_image());
        assert_eq!(file.size, file.data.len() as u64);
    }

    #[test]
    fn test_quality_result_is_valid() {
        assert!(AnalysisBuilder::quality_result(75).validate().is_ok());
    }

    #[test]
    fn test_batch_names() {
        let batch = AnalysisBuilder::batch(3, 90);
        let names: Vec<_> = batch.iter().map(SeedAnalysis::file_name).collect();
        assert_eq!(names, ["seed-1.png", "seed-2.png", "seed-3.png"]);
    }
}
