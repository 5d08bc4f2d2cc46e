//! Seed QA Adapters - External adapters for seed-qa.
//!
//! This crate provides adapters for:
//! - Filesystem candidate source
//! - In-memory blob preview store
//! - PDF report rendering

pub mod fs;
pub mod pdf;
pub mod preview;

pub use fs::FsCandidateSource;
pub use pdf::PdfRenderer;
pub use preview::BlobPreviewStore;
