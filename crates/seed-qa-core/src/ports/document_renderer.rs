//! Document renderer port for report export.

use crate::error::RenderError;
use crate::report::ReportLayout;

/// Turns a laid-out report into document bytes.
pub trait DocumentRenderer: Send + Sync {
    /// File extension of the produced document, without the dot.
    fn extension(&self) -> &'static str;

    /// Renders every page of `layout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded.
    fn render(&self, layout: &ReportLayout) -> Result<Vec<u8>, RenderError>;
}
