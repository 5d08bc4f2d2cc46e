//! Report exporter: lays out an analysis batch and renders it to a document.

mod layout;
mod text;

pub use layout::{
    layout_report, Element, FontWeight, Page, ReportLayout, Rgb, CONTINUATION_Y,
    FIRST_SECTION_Y, MARGIN, PAGE_HEIGHT, PAGE_WIDTH, SECTION_BREAK_Y, TABLE_BOTTOM,
    TABLE_HEADERS,
};
pub use text::{text_width, wrap};

use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::AnalysisBatch;
use crate::error::ExportError;
use crate::ports::DocumentRenderer;

/// Title shown at the top of the first page.
pub const REPORT_TITLE: &str = "Seed Quality Analysis Report";

/// File name prefix of exported reports.
pub const REPORT_FILE_PREFIX: &str = "seed-quality-report";

/// A rendered report ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    /// Suggested file name, unique per export instant.
    pub file_name: String,
    /// Encoded document.
    pub bytes: Vec<u8>,
    /// Number of pages in the document.
    pub page_count: usize,
}

/// Renders analysis batches into report documents.
///
/// The exporter never mutates the batch; the only input besides the batch is
/// the instant passed to [`ReportExporter::export`].
#[derive(Debug, Clone)]
pub struct ReportExporter<R> {
    renderer: R,
}

impl<R: DocumentRenderer> ReportExporter<R> {
    /// Creates an exporter on top of `renderer`.
    pub const fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Renders `batch` as generated at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoResults`] for an empty batch and
    /// [`ExportError::Render`] when the renderer fails.
    pub fn export(
        &self,
        batch: &AnalysisBatch,
        now: OffsetDateTime,
    ) -> Result<ExportedReport, ExportError> {
        if batch.is_empty() {
            return Err(ExportError::NoResults);
        }

        let layout = layout_report(REPORT_TITLE, &format_timestamp(now), batch);
        let page_count = layout.page_count();
        debug!(items = batch.len(), pages = page_count, "Report laid out");

        let bytes = self.renderer.render(&layout)?;
        let file_name = report_file_name(now, self.renderer.extension());
        info!(file = %file_name, pages = page_count, bytes = bytes.len(), "Report rendered");

        Ok(ExportedReport {
            file_name,
            bytes,
            page_count,
        })
    }
}

/// Formats the generation timestamp shown under the title.
#[must_use]
pub fn format_timestamp(now: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    now.format(&format).unwrap_or_else(|_| now.to_string())
}

/// `seed-quality-report-{unix millis}.{extension}`.
#[must_use]
pub fn report_file_name(now: OffsetDateTime, extension: &str) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    format!("{REPORT_FILE_PREFIX}-{millis}.{extension}")
}
