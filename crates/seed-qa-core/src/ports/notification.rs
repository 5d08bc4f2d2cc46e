//! Notification port for user-facing events.

/// Events the pipeline signals to its presentation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A candidate was not accepted into the selection.
    FileRejected {
        /// File name.
        file_name: String,
        /// Short category, e.g. "File too large".
        category: &'static str,
        /// Reason the file was rejected.
        reason: String,
    },
    /// Analysis was requested with nothing selected.
    NothingSelected,
    /// One item of the running batch finished successfully.
    ItemAnalyzed {
        /// Index in submission order (0-based).
        index: usize,
        /// File name.
        file_name: String,
        /// Total items in the batch.
        total: usize,
    },
    /// The batch completed.
    BatchSucceeded {
        /// Number of analyzed items.
        count: usize,
    },
    /// The batch completed with some items failed (partial mode only).
    BatchPartial {
        /// Number of analyzed items.
        analyzed: usize,
        /// Number of failed items.
        failed: usize,
    },
    /// The batch failed as a whole.
    BatchFailed {
        /// Internal description, for logs.
        description: String,
    },
}

impl Notification {
    /// Short title for display.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::FileRejected { category, .. } => *category,
            Self::NothingSelected => "No images selected",
            Self::ItemAnalyzed { .. } => "Analyzing",
            Self::BatchSucceeded { .. } => "Analysis Complete",
            Self::BatchPartial { .. } => "Analysis Incomplete",
            Self::BatchFailed { .. } => "Analysis Failed",
        }
    }

    /// Short user-facing description.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::FileRejected {
                file_name, reason, ..
            } => format!("{file_name}: {reason}"),
            Self::NothingSelected => "Please upload at least one seed image".to_string(),
            Self::ItemAnalyzed {
                index,
                file_name,
                total,
            } => format!("[{}/{total}] {file_name}", index + 1),
            Self::BatchSucceeded { count } => format!(
                "Successfully analyzed {count} seed image{}",
                if *count == 1 { "" } else { "s" }
            ),
            Self::BatchPartial { analyzed, failed } => {
                format!("Analyzed {analyzed} seed image(s), {failed} failed")
            }
            Self::BatchFailed { .. } => {
                "An error occurred during seed analysis. Please try again.".to_string()
            }
        }
    }

    /// Whether the event reports a problem.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(
            self,
            Self::FileRejected { .. }
                | Self::NothingSelected
                | Self::BatchPartial { .. }
                | Self::BatchFailed { .. }
        )
    }
}

/// Port for receiving notifications.
pub trait NotificationSink: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: Notification);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn on_event(&self, _event: Notification) {}
}
