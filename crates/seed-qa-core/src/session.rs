//! Page-level controller tying the selection, the orchestrator and the
//! current results together.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::{AnalysisBatch, SelectionEntry, SourceFile};
use crate::error::{ExportError, SubmitError};
use crate::orchestrator::{
    AnalysisOrchestrator, ItemFailure, OrchestratorConfig, OrchestratorState,
};
use crate::ports::{DocumentRenderer, Notification, NotificationSink, PreviewStore, QualityModel};
use crate::report::{ExportedReport, ReportExporter};
use crate::upload::{Acceptance, UploadValidator, DEFAULT_MAX_FILE_SIZE};

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Per-file size limit in bytes.
    pub max_file_size: u64,
    /// Orchestrator settings.
    pub orchestrator: OrchestratorConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            orchestrator: OrchestratorConfig::default(),
        }
    }
}

/// What a submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSummary {
    /// Number of analyzed items now available through [`AnalysisSession::results`].
    pub analyzed: usize,
    /// Failed items (partial mode only; always empty for [`AnalysisSession::submit`]).
    pub failures: Vec<ItemFailure>,
}

/// One user's working session: a selection, its analysis, and the results.
pub struct AnalysisSession {
    selection: UploadValidator,
    orchestrator: AnalysisOrchestrator,
    sink: Arc<dyn NotificationSink>,
    results: Option<AnalysisBatch>,
}

impl AnalysisSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new(
        model: Arc<dyn QualityModel>,
        store: Arc<dyn PreviewStore>,
        sink: Arc<dyn NotificationSink>,
        config: SessionConfig,
    ) -> Self {
        Self {
            selection: UploadValidator::new(store).with_max_file_size(config.max_file_size),
            orchestrator: AnalysisOrchestrator::new(model)
                .with_config(config.orchestrator)
                .with_sink(Arc::clone(&sink)),
            sink,
            results: None,
        }
    }

    /// Validates `candidates` and appends the valid ones to the selection.
    ///
    /// Every rejection is reported to the notification sink.
    pub fn add_files(&mut self, candidates: impl IntoIterator<Item = SourceFile>) -> Acceptance {
        let acceptance = self.selection.accept(candidates);
        for rejection in &acceptance.rejected {
            self.sink.on_event(Notification::FileRejected {
                file_name: rejection.file.name.clone(),
                category: rejection.reason.category(),
                reason: rejection.reason.to_string(),
            });
        }
        acceptance
    }

    /// Removes the selected entry at `index`. See [`UploadValidator::remove`].
    pub fn remove(&mut self, index: usize) -> Option<String> {
        self.selection.remove(index)
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &[SelectionEntry] {
        self.selection.entries()
    }

    /// Orchestrator state.
    #[must_use]
    pub fn state(&self) -> OrchestratorState {
        self.orchestrator.state()
    }

    /// Whether a batch is in flight.
    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.orchestrator.is_analyzing()
    }

    /// Analyzes the whole selection, all-or-nothing.
    ///
    /// On success the results are replaced and the selection is cleared. On
    /// failure the selection is kept for a retry and the results are left as
    /// they were.
    ///
    /// # Errors
    ///
    /// See [`AnalysisOrchestrator::run_batch`].
    pub async fn submit(&mut self) -> Result<SubmitSummary, SubmitError> {
        if self.selection.is_empty() {
            self.sink.on_event(Notification::NothingSelected);
            return Err(SubmitError::EmptySubmission);
        }

        match self.orchestrator.run_batch(self.selection.entries()).await {
            Ok(batch) => {
                let analyzed = batch.len();
                self.results = Some(batch);
                self.selection.reset();
                self.sink.on_event(Notification::BatchSucceeded { count: analyzed });
                Ok(SubmitSummary {
                    analyzed,
                    failures: Vec::new(),
                })
            }
            Err(e) => {
                self.sink.on_event(Notification::BatchFailed {
                    description: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Analyzes the whole selection, keeping whatever succeeded.
    ///
    /// Analyzed entries leave the selection and replace the results; failed
    /// entries stay selected so they can be retried. If nothing succeeded the
    /// results are left as they were.
    ///
    /// # Errors
    ///
    /// See [`AnalysisOrchestrator::run_batch_settled`].
    pub async fn submit_settled(&mut self) -> Result<SubmitSummary, SubmitError> {
        if self.selection.is_empty() {
            self.sink.on_event(Notification::NothingSelected);
            return Err(SubmitError::EmptySubmission);
        }

        let settled = self
            .orchestrator
            .run_batch_settled(self.selection.entries())
            .await?;
        let (batch, failures) = settled.into_parts();
        let analyzed = batch.len();

        if analyzed == 0 {
            self.sink.on_event(Notification::BatchFailed {
                description: format!("all {} item(s) failed", failures.len()),
            });
            return Ok(SubmitSummary { analyzed, failures });
        }

        // Remove back to front so pending indices stay valid.
        for index in (0..self.selection.len()).rev() {
            if !failures.iter().any(|f| f.index == index) {
                self.selection.remove(index);
            }
        }
        debug!("{} failed entries kept for retry", self.selection.len());

        self.results = Some(batch);
        self.sink.on_event(if failures.is_empty() {
            Notification::BatchSucceeded { count: analyzed }
        } else {
            Notification::BatchPartial {
                analyzed,
                failed: failures.len(),
            }
        });
        Ok(SubmitSummary { analyzed, failures })
    }

    /// Results of the last successful submission.
    #[must_use]
    pub const fn results(&self) -> Option<&AnalysisBatch> {
        self.results.as_ref()
    }

    /// Drops the current results and clears the selection, releasing every
    /// preview no one else holds.
    pub fn discard_results(&mut self) {
        let count = self.results.take().map_or(0, |b| b.len());
        let selected = self.selection.reset();
        info!("Discarded {count} result(s) and {selected} selected file(s)");
    }

    /// Exports the current results.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NoResults`] when there is nothing to export, or
    /// the renderer's error.
    pub fn export_report<R: DocumentRenderer>(
        &self,
        exporter: &ReportExporter<R>,
        now: OffsetDateTime,
    ) -> Result<ExportedReport, ExportError> {
        let batch = self.results.as_ref().ok_or(ExportError::NoResults)?;
        exporter.export(batch, now)
    }
}
