//! Notification and progress adapter using indicatif.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use seed_qa_core::{Notification, NotificationSink};

/// Renders pipeline notifications on stderr, with an optional progress bar.
pub struct CliNotifier {
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl CliNotifier {
    /// Creates a new notifier.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, suppress all output
    /// * `show_bar` - If true, show progress bar; otherwise show per-item status
    #[must_use]
    pub fn new(quiet: bool, show_bar: bool) -> Self {
        if quiet {
            return Self { bar: None, quiet };
        }

        let bar = show_bar.then(|| {
            let bar = ProgressBar::new(0);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            ) {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        });

        Self { bar, quiet }
    }

    /// Sets the number of items about to be analyzed.
    pub fn begin(&self, total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
        }
    }

    /// Reports an item that failed in partial mode.
    pub fn item_failed(&self, file_name: &str, reason: &str) {
        self.print(&format!("WARN: {file_name}: {reason}"));
    }

    /// Reports the written report.
    pub fn report_written(&self, path: &Path, pages: usize) {
        self.print(&format!(
            "Report written to {} ({pages} page{})",
            path.display(),
            if pages == 1 { "" } else { "s" }
        ));
    }

    fn print(&self, line: &str) {
        if self.quiet {
            return;
        }
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }
}

impl NotificationSink for CliNotifier {
    fn on_event(&self, event: Notification) {
        if self.quiet {
            return;
        }

        match &event {
            Notification::ItemAnalyzed { file_name, .. } => {
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                    bar.set_message(file_name.clone());
                } else {
                    eprintln!("{}", event.description());
                }
            }
            Notification::BatchSucceeded { .. }
            | Notification::BatchPartial { .. }
            | Notification::BatchFailed { .. } => {
                if let Some(bar) = &self.bar {
                    bar.finish_and_clear();
                }
                self.print(&notice(&event));
            }
            Notification::FileRejected { .. } | Notification::NothingSelected => {
                self.print(&notice(&event));
            }
        }
    }
}

/// One stderr line for a user-facing notification; problems are tagged `WARN`.
fn notice(event: &Notification) -> String {
    let line = format!("{}: {}", event.category(), event.description());
    if event.is_error() {
        format!("WARN: {line}")
    } else {
        line
    }
}
