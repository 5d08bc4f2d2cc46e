//! Mock implementations of core port traits.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use seed_qa_core::domain::{ImageData, QualityResult, SourceFile};
use seed_qa_core::error::{AnalysisError, RenderError};
use seed_qa_core::ports::{DocumentRenderer, Notification, NotificationSink, PreviewStore, QualityModel};
use seed_qa_core::report::{Element, ReportLayout};

use crate::builders::AnalysisBuilder;

/// Behaviour of the scripted model for one file name.
#[derive(Debug, Clone)]
struct Script {
    delay: Duration,
    outcome: Result<QualityResult, AnalysisError>,
}

/// Mock implementation of `QualityModel` for testing.
///
/// Answers every file with a fixed result unless a per-name script says
/// otherwise. Records the order in which calls started and finished.
pub struct ScriptedQualityModel {
    default_score: u8,
    scripts: HashMap<String, Script>,
    started: Mutex<Vec<String>>,
    finished: Mutex<Vec<String>>,
}

impl ScriptedQualityModel {
    /// Creates a model answering every file with score 90.
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_score(90)
    }

    /// Creates a model answering every unscripted file with `score`.
    #[must_use]
    pub fn with_default_score(score: u8) -> Self {
        Self {
            default_score: score,
            scripts: HashMap::new(),
            started: Mutex::new(Vec::new()),
            finished: Mutex::new(Vec::new()),
        }
    }

    fn script(&mut self, name: &str) -> &mut Script {
        let score = self.default_score;
        self.scripts.entry(name.to_string()).or_insert_with(|| Script {
            delay: Duration::ZERO,
            outcome: Ok(AnalysisBuilder::quality_result(score)),
        })
    }

    /// Answers `name` with `score`.
    #[must_use]
    pub fn score(mut self, name: &str, score: u8) -> Self {
        self.script(name).outcome = Ok(AnalysisBuilder::quality_result(score));
        self
    }

    /// Answers `name` with an arbitrary result, valid or not.
    #[must_use]
    pub fn result(mut self, name: &str, result: QualityResult) -> Self {
        self.script(name).outcome = Ok(result);
        self
    }

    /// Fails `name` with `error`.
    #[must_use]
    pub fn fail(mut self, name: &str, error: AnalysisError) -> Self {
        self.script(name).outcome = Err(error);
        self
    }

    /// Delays the answer for `name`.
    #[must_use]
    pub fn delay(mut self, name: &str, delay: Duration) -> Self {
        self.script(name).delay = delay;
        self
    }

    /// File names in the order their analysis started.
    #[must_use]
    pub fn started(&self) -> Vec<String> {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// File names in the order their analysis finished.
    #[must_use]
    pub fn finished(&self) -> Vec<String> {
        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for ScriptedQualityModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QualityModel for ScriptedQualityModel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn analyze(&self, image: &SourceFile) -> Result<QualityResult, AnalysisError> {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(image.name.clone());

        let script = self.scripts.get(&image.name).cloned();
        let (delay, outcome) = match script {
            Some(s) => (s.delay, s.outcome),
            None => (
                Duration::ZERO,
                Ok(AnalysisBuilder::quality_result(self.default_score)),
            ),
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(image.name.clone());
        outcome
    }
}

/// Mock implementation of `PreviewStore` for testing.
///
/// Hands out `mock:N` URLs and records every release, so tests can assert
/// that each preview is released exactly once.
#[derive(Default)]
pub struct RecordingPreviewStore {
    next: AtomicUsize,
    allocated: Mutex<Vec<String>>,
    released: Mutex<Vec<String>>,
}

impl RecordingPreviewStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs in allocation order.
    #[must_use]
    pub fn allocated(&self) -> Vec<String> {
        self.allocated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// URLs in release order. Duplicates indicate a double release.
    #[must_use]
    pub fn released(&self) -> Vec<String> {
        self.released
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `url` was released.
    #[must_use]
    pub fn release_count(&self, url: &str) -> usize {
        self.released().iter().filter(|u| *u == url).count()
    }

    /// Number of allocated previews not yet released.
    #[must_use]
    pub fn live(&self) -> usize {
        let released = self.released();
        self.allocated()
            .iter()
            .filter(|u| !released.contains(u))
            .count()
    }
}

impl PreviewStore for RecordingPreviewStore {
    fn allocate(&self, _name: &str, _data: &ImageData) -> String {
        let url = format!("mock:{}", self.next.fetch_add(1, Ordering::Relaxed));
        self.allocated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());
        url
    }

    fn release(&self, url: &str) {
        self.released
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
    }
}

/// Mock implementation of `NotificationSink` for testing.
///
/// Captures events for later assertions.
#[derive(Default)]
pub struct MockNotificationSink {
    events: Mutex<Vec<Notification>>,
}

impl MockNotificationSink {
    /// Creates a new mock sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Categories of all captured events, in order.
    #[must_use]
    pub fn categories(&self) -> Vec<&'static str> {
        self.events().iter().map(Notification::category).collect()
    }

    /// Returns the number of `ItemAnalyzed` events.
    #[must_use]
    pub fn analyzed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Notification::ItemAnalyzed { .. }))
            .count()
    }

    /// Returns the number of `FileRejected` events.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Notification::FileRejected { .. }))
            .count()
    }

    /// Returns the last captured event, if any.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.events().pop()
    }
}

impl NotificationSink for MockNotificationSink {
    fn on_event(&self, event: Notification) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// `DocumentRenderer` that writes every text element on its own line, with a
/// form feed between pages. Useful for asserting report content.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer {
    fail: bool,
}

impl TextRenderer {
    /// Creates a renderer that always succeeds.
    #[must_use]
    pub const fn new() -> Self {
        Self { fail: false }
    }

    /// Creates a renderer that always fails.
    #[must_use]
    pub const fn failing() -> Self {
        Self { fail: true }
    }
}

impl DocumentRenderer for TextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, layout: &ReportLayout) -> Result<Vec<u8>, RenderError> {
        if self.fail {
            return Err(RenderError::new("renderer configured to fail"));
        }
        let mut out = String::new();
        for (i, page) in layout.pages().iter().enumerate() {
            if i > 0 {
                out.push('\u{c}');
            }
            for element in page.elements() {
                if let Element::Text { text, .. } = element {
                    let _ = writeln!(out, "{text}");
                }
            }
        }
        Ok(out.into_bytes())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use seed_qa_core::ports::PreviewHandle;

    use super::*;

    #[tokio::test]
    async fn test_scripted_model_failure() {
        let model = ScriptedQualityModel::new().fail("bad.png", AnalysisError::Unavailable("down".into()));
        let file = SourceFile::new("bad.png", "image/png", ImageData::from(vec![1u8]));

        assert!(model.analyze(&file).await.is_err());
        assert_eq!(model.started(), ["bad.png"]);
    }

    #[tokio::test]
    async fn test_scripted_model_default_score() {
        let model = ScriptedQualityModel::with_default_score(72);
        let file = SourceFile::new("a.png", "image/png", ImageData::from(vec![1u8]));

        assert_eq!(model.analyze(&file).await.unwrap().score, 72);
    }

    #[test]
    fn test_recording_store_tracks_release() {
        let store = Arc::new(RecordingPreviewStore::new());
        let handle = PreviewHandle::acquire(store.clone(), "a.png", &ImageData::from(vec![1u8]));
        let url = handle.url().to_string();

        assert_eq!(store.live(), 1);
        drop(handle);
        assert_eq!(store.release_count(&url), 1);
        assert_eq!(store.live(), 0);
    }

    #[test]
    fn test_mock_notification_sink() {
        let sink = MockNotificationSink::new();
        sink.on_event(Notification::NothingSelected);
        sink.on_event(Notification::BatchSucceeded { count: 2 });

        assert_eq!(sink.categories(), ["No images selected", "Analysis Complete"]);
        assert_eq!(sink.last(), Some(Notification::BatchSucceeded { count: 2 }));
    }
}
