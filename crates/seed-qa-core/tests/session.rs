//! Session facade: notifications, selection handling and result lifetime.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use seed_qa_core::error::{AnalysisError, ExportError, SubmitError};
use seed_qa_core::ports::Notification;
use seed_qa_core::report::ReportExporter;
use seed_qa_core::session::{AnalysisSession, SessionConfig};
use seed_qa_core::OrchestratorConfig;
use seed_qa_test_support::{
    MockNotificationSink, RecordingPreviewStore, ScriptedQualityModel, SeedImageBuilder,
    TextRenderer,
};
use time::macros::datetime;

struct Harness {
    store: Arc<RecordingPreviewStore>,
    sink: Arc<MockNotificationSink>,
    session: AnalysisSession,
}

fn harness(model: ScriptedQualityModel) -> Harness {
    let store = Arc::new(RecordingPreviewStore::new());
    let sink = Arc::new(MockNotificationSink::new());
    let session = AnalysisSession::new(
        Arc::new(model),
        store.clone(),
        sink.clone(),
        SessionConfig::default(),
    );
    Harness {
        store,
        sink,
        session,
    }
}

#[test]
fn test_rejections_are_notified() {
    let mut h = harness(ScriptedQualityModel::new());

    h.session.add_files([
        SeedImageBuilder::png("a.png"),
        SeedImageBuilder::declared("b.txt", "text/plain", 10),
    ]);

    assert_eq!(h.session.selection().len(), 1);
    assert_eq!(h.sink.categories(), ["Invalid file type"]);
}

#[tokio::test]
async fn test_empty_submit_notifies() {
    let mut h = harness(ScriptedQualityModel::new());

    let err = h.session.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::EmptySubmission));
    assert_eq!(h.sink.last(), Some(Notification::NothingSelected));
}

#[tokio::test]
async fn test_success_clears_selection_and_keeps_previews() {
    let mut h = harness(ScriptedQualityModel::new());
    h.session
        .add_files([SeedImageBuilder::png("a.png"), SeedImageBuilder::png("b.png")]);

    let summary = h.session.submit().await.unwrap();

    assert_eq!(summary.analyzed, 2);
    assert!(h.session.selection().is_empty());
    assert_eq!(h.session.results().unwrap().len(), 2);
    // Results still reference their previews.
    assert_eq!(h.store.live(), 2);
    assert_eq!(h.sink.last(), Some(Notification::BatchSucceeded { count: 2 }));

    h.session.discard_results();
    assert!(h.session.results().is_none());
    assert_eq!(h.store.live(), 0);
    assert_eq!(h.store.released().len(), 2);
}

#[tokio::test]
async fn test_failure_keeps_selection_for_retry() {
    let mut h = harness(
        ScriptedQualityModel::new().fail("b.png", AnalysisError::Unavailable("offline".into())),
    );
    h.session
        .add_files([SeedImageBuilder::png("a.png"), SeedImageBuilder::png("b.png")]);

    let err = h.session.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Failed(_)));
    assert_eq!(err.category(), "Analysis Failed");
    assert_eq!(h.session.selection().len(), 2);
    assert!(h.session.results().is_none());
    assert!(!h.session.is_analyzing());
    assert_eq!(h.store.live(), 2);
    assert_eq!(h.sink.categories().last(), Some(&"Analysis Failed"));
}

#[tokio::test]
async fn test_settled_submit_keeps_failed_entries() {
    let mut h = harness(
        ScriptedQualityModel::new()
            .fail("b.png", AnalysisError::CorruptImage("truncated".into()))
            .fail("d.png", AnalysisError::CorruptImage("truncated".into())),
    );
    h.session
        .add_files(["a.png", "b.png", "c.png", "d.png"].map(SeedImageBuilder::png));

    let summary = h.session.submit_settled().await.unwrap();

    assert_eq!(summary.analyzed, 2);
    assert_eq!(summary.failures.len(), 2);
    let selected: Vec<_> = h.session.selection().iter().map(|e| e.name()).collect();
    assert_eq!(selected, ["b.png", "d.png"]);
    let analyzed: Vec<_> = h
        .session
        .results()
        .unwrap()
        .iter()
        .map(|a| a.file_name())
        .collect();
    assert_eq!(analyzed, ["a.png", "c.png"]);
    assert_eq!(
        h.sink.last(),
        Some(Notification::BatchPartial {
            analyzed: 2,
            failed: 2
        })
    );
}

#[tokio::test]
async fn test_timeout_from_config() {
    let store = Arc::new(RecordingPreviewStore::new());
    let mut session = AnalysisSession::new(
        Arc::new(ScriptedQualityModel::new().delay("a.png", Duration::from_secs(5))),
        store,
        Arc::new(MockNotificationSink::new()),
        SessionConfig {
            orchestrator: OrchestratorConfig {
                item_timeout: Some(Duration::from_millis(10)),
            },
            ..SessionConfig::default()
        },
    );
    session.add_files([SeedImageBuilder::png("a.png")]);

    let Err(SubmitError::Failed(e)) = session.submit().await else {
        panic!("expected timeout");
    };
    assert!(matches!(e.source, AnalysisError::TimedOut(_)));
}

#[tokio::test]
async fn test_export_requires_results() {
    let mut h = harness(ScriptedQualityModel::new());
    let exporter = ReportExporter::new(TextRenderer::new());
    let now = datetime!(2024-03-01 12:00 UTC);

    assert!(matches!(
        h.session.export_report(&exporter, now),
        Err(ExportError::NoResults)
    ));

    h.session.add_files([SeedImageBuilder::png("a.png")]);
    h.session.submit().await.unwrap();
    let report = h.session.export_report(&exporter, now).unwrap();

    assert_eq!(report.file_name, "seed-quality-report-1709294400000.txt");
    assert!(String::from_utf8(report.bytes).unwrap().contains("Seed 1: a.png"));
}
