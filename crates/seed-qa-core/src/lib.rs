//! Seed QA Core - domain logic for batch seed image quality analysis.
//!
//! This crate contains the domain types, grading rules, upload validation,
//! the analysis orchestrator, report layout and the port traits that adapters
//! implement. A random placeholder quality model is included.

pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod ports;
pub mod quality;
pub mod report;
pub mod session;
pub mod upload;

pub use domain::{
    AnalysisBatch, Grade, ImageData, ParameterName, ParameterStatus, QualityParameter,
    QualityResult, QualityTier, RawParameter, SeedAnalysis, SelectionEntry, SourceFile,
};
pub use error::{
    AnalysisError, BatchAnalysisError, ExportError, RenderError, SubmitError, ValidationError,
};
pub use orchestrator::{
    AnalysisOrchestrator, ItemFailure, ItemOutcome, OrchestratorConfig, OrchestratorState,
    SettledBatch,
};
pub use ports::{
    DocumentRenderer, Notification, NotificationSink, NullSink, PreviewHandle, PreviewStore,
    QualityModel,
};
pub use quality::RandomQualityModel;
pub use report::{ExportedReport, ReportExporter, ReportLayout};
pub use session::{AnalysisSession, SessionConfig, SubmitSummary};
pub use upload::{Acceptance, Rejection, UploadValidator, DEFAULT_MAX_FILE_SIZE};
