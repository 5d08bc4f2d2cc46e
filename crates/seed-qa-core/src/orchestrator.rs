//! Analysis orchestrator.
//!
//! Submits every entry of a batch to the quality model concurrently on the
//! current task, waits for all of them, and reassembles the results in
//! submission order. `run_batch` is all-or-nothing; `run_batch_settled`
//! keeps per-item outcomes.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::{AnalysisBatch, SeedAnalysis, SelectionEntry};
use crate::error::{AnalysisError, BatchAnalysisError, SubmitError};
use crate::ports::{Notification, NotificationSink, NullSink, QualityModel};

/// Orchestrator settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Upper bound for a single quality model call. `None` waits indefinitely.
    pub item_timeout: Option<Duration>,
}

/// Lifecycle of the orchestrator. Only one batch runs at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrchestratorState {
    /// No batch has run yet, or the last one was abandoned mid-flight.
    #[default]
    Idle,
    /// A batch is in flight.
    Running,
    /// The last batch produced results.
    Succeeded {
        /// Number of analyzed items.
        count: usize,
    },
    /// The last batch produced no results.
    Failed,
}

/// A single failed item of a settled batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Index in submission order.
    pub index: usize,
    /// File name.
    pub file_name: String,
    /// Why the analysis failed.
    pub error: AnalysisError,
}

/// Per-item result of a settled batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// The item was analyzed.
    Analyzed(SeedAnalysis),
    /// The item failed.
    Failed(ItemFailure),
}

/// Tagged per-item outcomes, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct SettledBatch {
    outcomes: Vec<ItemOutcome>,
}

impl SettledBatch {
    /// Outcomes in submission order.
    #[must_use]
    pub fn outcomes(&self) -> &[ItemOutcome] {
        &self.outcomes
    }

    /// Number of analyzed items.
    #[must_use]
    pub fn analyzed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ItemOutcome::Analyzed(_)))
            .count()
    }

    /// Number of failed items.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.analyzed_count()
    }

    /// Splits into the analyzed items (still in submission order) and failures.
    #[must_use]
    pub fn into_parts(self) -> (AnalysisBatch, Vec<ItemFailure>) {
        let mut analyzed = Vec::new();
        let mut failures = Vec::new();
        for outcome in self.outcomes {
            match outcome {
                ItemOutcome::Analyzed(a) => analyzed.push(a),
                ItemOutcome::Failed(f) => failures.push(f),
            }
        }
        (AnalysisBatch::new(analyzed), failures)
    }
}

/// Drives a [`QualityModel`] over batches of selection entries.
pub struct AnalysisOrchestrator {
    model: Arc<dyn QualityModel>,
    config: OrchestratorConfig,
    sink: Arc<dyn NotificationSink>,
    state: Mutex<OrchestratorState>,
}

/// Marks the orchestrator as running; restores a settled state when dropped.
struct RunGuard<'a> {
    state: &'a Mutex<OrchestratorState>,
    outcome: OrchestratorState,
}

impl RunGuard<'_> {
    fn finish(mut self, outcome: OrchestratorState) {
        self.outcome = outcome;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = self.outcome;
    }
}

impl AnalysisOrchestrator {
    /// Creates an orchestrator for `model` with default settings.
    #[must_use]
    pub fn new(model: Arc<dyn QualityModel>) -> Self {
        Self {
            model,
            config: OrchestratorConfig::default(),
            sink: Arc::new(NullSink),
            state: Mutex::new(OrchestratorState::Idle),
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub const fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sends per-item progress to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> OrchestratorState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a batch is in flight.
    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.state() == OrchestratorState::Running
    }

    /// Analyzes every entry and returns the graded batch in submission order.
    ///
    /// If any item fails, no analyses are returned.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::EmptySubmission`] if `entries` is empty
    /// - [`SubmitError::AlreadyAnalyzing`] if another batch is running
    /// - [`SubmitError::Failed`] if any item failed
    pub async fn run_batch(&self, entries: &[SelectionEntry]) -> Result<AnalysisBatch, SubmitError> {
        let run = self.begin(entries)?;
        let outcomes = self.analyze_all(entries).await;

        match all_or_nothing(outcomes, entries) {
            Ok(batch) => {
                info!("Batch of {} analyzed", batch.len());
                run.finish(OrchestratorState::Succeeded { count: batch.len() });
                Ok(batch)
            }
            Err(e) => {
                warn!("Batch failed: {e}");
                run.finish(OrchestratorState::Failed);
                Err(e.into())
            }
        }
    }

    /// Analyzes every entry and returns a tagged outcome per item.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::EmptySubmission`] if `entries` is empty
    /// - [`SubmitError::AlreadyAnalyzing`] if another batch is running
    pub async fn run_batch_settled(
        &self,
        entries: &[SelectionEntry],
    ) -> Result<SettledBatch, SubmitError> {
        let run = self.begin(entries)?;
        let outcomes = self.analyze_all(entries).await;

        let outcomes: Vec<_> = outcomes
            .into_iter()
            .zip(entries)
            .enumerate()
            .map(|(index, (outcome, entry))| match outcome {
                Ok(analysis) => ItemOutcome::Analyzed(analysis),
                Err(error) => ItemOutcome::Failed(ItemFailure {
                    index,
                    file_name: entry.name().to_string(),
                    error,
                }),
            })
            .collect();
        let settled = SettledBatch { outcomes };

        let analyzed = settled.analyzed_count();
        info!(
            "Settled batch: {analyzed} analyzed, {} failed",
            settled.failed_count()
        );
        run.finish(if analyzed == 0 {
            OrchestratorState::Failed
        } else {
            OrchestratorState::Succeeded { count: analyzed }
        });
        Ok(settled)
    }

    fn begin(&self, entries: &[SelectionEntry]) -> Result<RunGuard<'_>, SubmitError> {
        if entries.is_empty() {
            return Err(SubmitError::EmptySubmission);
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == OrchestratorState::Running {
            debug!("Rejecting re-entrant submission");
            return Err(SubmitError::AlreadyAnalyzing);
        }
        *state = OrchestratorState::Running;
        drop(state);

        info!(
            "Analyzing {} item(s) with model '{}'",
            entries.len(),
            self.model.name()
        );
        Ok(RunGuard {
            state: &self.state,
            outcome: OrchestratorState::Idle,
        })
    }

    async fn analyze_all(
        &self,
        entries: &[SelectionEntry],
    ) -> Vec<Result<SeedAnalysis, AnalysisError>> {
        let total = entries.len();
        join_all(
            entries
                .iter()
                .enumerate()
                .map(|(index, entry)| self.analyze_one(index, total, entry)),
        )
        .await
    }

    async fn analyze_one(
        &self,
        index: usize,
        total: usize,
        entry: &SelectionEntry,
    ) -> Result<SeedAnalysis, AnalysisError> {
        let call = self.model.analyze(entry.source());
        let result = match self.config.item_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(AnalysisError::TimedOut(limit))),
            None => call.await,
        };

        let analysis = result.and_then(|r| {
            SeedAnalysis::from_quality_result(entry.name(), entry.preview().clone(), r)
        });

        match &analysis {
            Ok(a) => {
                debug!("{}: score {} ({})", entry.name(), a.score(), a.grade());
                self.sink.on_event(Notification::ItemAnalyzed {
                    index,
                    file_name: entry.name().to_string(),
                    total,
                });
            }
            Err(e) => warn!("{}: {e}", entry.name()),
        }
        analysis
    }
}

fn all_or_nothing(
    outcomes: Vec<Result<SeedAnalysis, AnalysisError>>,
    entries: &[SelectionEntry],
) -> Result<AnalysisBatch, BatchAnalysisError> {
    let total = outcomes.len();
    let failed = outcomes.iter().filter(|o| o.is_err()).count();
    let mut items = Vec::with_capacity(total);
    let mut first_failure = None;

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(analysis) => items.push(analysis),
            Err(error) => {
                if first_failure.is_none() {
                    first_failure = Some((index, error));
                }
            }
        }
    }

    match first_failure {
        None => Ok(AnalysisBatch::new(items)),
        Some((index, source)) => Err(BatchAnalysisError {
            index,
            file_name: entries[index].name().to_string(),
            failed,
            total,
            source,
        }),
    }
}
