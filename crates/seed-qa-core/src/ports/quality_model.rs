//! Quality model port.

use async_trait::async_trait;

use crate::domain::{QualityResult, SourceFile};
use crate::error::AnalysisError;

/// Produces a structured quality result for one image.
///
/// Invocations may be slow (network call, heavy local computation) and may
/// fail; a failed invocation never returns a partial result.
#[async_trait]
pub trait QualityModel: Send + Sync {
    /// Returns the name of this model.
    fn name(&self) -> &'static str;

    /// Analyzes a single image.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalysisError`] if the model cannot produce a result.
    async fn analyze(&self, image: &SourceFile) -> Result<QualityResult, AnalysisError>;
}
