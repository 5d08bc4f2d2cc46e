//! Error taxonomy for validation, analysis, batch submission and export.

use std::time::Duration;

use thiserror::Error;

/// Why a file candidate was not accepted into the selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The declared media type is not an image type.
    #[error("not an image file (declared type '{media_type}')")]
    InvalidType {
        /// Declared media type of the candidate.
        media_type: String,
    },
    /// The file exceeds the size limit.
    #[error("exceeds {}MB limit ({size} bytes)", mib(.limit))]
    TooLarge {
        /// File size in bytes.
        size: u64,
        /// Limit in bytes.
        limit: u64,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn mib(bytes: &u64) -> u64 {
    *bytes / (1024 * 1024)
}

impl ValidationError {
    /// Short category title.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InvalidType { .. } => "Invalid file type",
            Self::TooLarge { .. } => "File too large",
        }
    }
}

/// Failure of a single quality model invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The payload could not be read as an image.
    #[error("corrupt image: {0}")]
    CorruptImage(String),
    /// The model backend could not be reached or refused the request.
    #[error("quality model unavailable: {0}")]
    Unavailable(String),
    /// The model did not answer in time.
    #[error("analysis timed out after {0:?}")]
    TimedOut(Duration),
    /// The model answered with a result that violates the result contract.
    #[error("invalid quality result: {0}")]
    InvalidResult(String),
}

/// Failure of an all-or-nothing batch.
///
/// Carries the first failing item in submission order; no results are kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("analysis failed for {failed} of {total} item(s); first failure '{file_name}': {source}")]
pub struct BatchAnalysisError {
    /// Index of the first failing item.
    pub index: usize,
    /// File name of the first failing item.
    pub file_name: String,
    /// Number of failed items.
    pub failed: usize,
    /// Number of submitted items.
    pub total: usize,
    /// Error of the first failing item.
    #[source]
    pub source: AnalysisError,
}

/// Why a batch submission did not produce results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Submission with nothing selected.
    #[error("no images selected")]
    EmptySubmission,
    /// Another batch is already running.
    #[error("an analysis is already in progress")]
    AlreadyAnalyzing,
    /// The batch ran and failed as a whole.
    #[error(transparent)]
    Failed(#[from] BatchAnalysisError),
}

impl SubmitError {
    /// Short category title.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::EmptySubmission => "No images selected",
            Self::AlreadyAnalyzing => "Analysis in progress",
            Self::Failed(_) => "Analysis Failed",
        }
    }
}

/// Failure to turn a report layout into document bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to render report: {0}")]
pub struct RenderError(pub String);

impl RenderError {
    /// Creates a render error from any displayable cause.
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self(cause.to_string())
    }
}

/// Failure to export a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// There are no results to export.
    #[error("no analysis results to export")]
    NoResults,
    /// The renderer failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_message() {
        let err = ValidationError::TooLarge {
            size: 12 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(err.category(), "File too large");
        assert!(err.to_string().starts_with("exceeds 10MB limit"));
    }

    #[test]
    fn test_batch_error_message() {
        let err = SubmitError::from(BatchAnalysisError {
            index: 1,
            file_name: "b.png".into(),
            failed: 2,
            total: 3,
            source: AnalysisError::Unavailable("offline".into()),
        });
        assert_eq!(err.category(), "Analysis Failed");
        let msg = err.to_string();
        assert!(msg.contains("2 of 3"));
        assert!(msg.contains("b.png"));
        assert!(msg.contains("offline"));
    }
}
