//! Test support utilities for seed-qa.
//!
//! Provides mocks for every core port and builders for encoded images, file
//! candidates and graded analyses.
//!
//! # Example
//!
//! ```
//! use seed_qa_test_support::{AnalysisBuilder, ScriptedQualityModel, SeedImageBuilder};
//!
//! let candidate = SeedImageBuilder::png("seed.png");
//! let batch = AnalysisBuilder::batch(3, 90);
//! let model = ScriptedQualityModel::new().score("seed.png", 64);
//! # let _ = (candidate, batch, model);
//! ```

mod builders;
mod mocks;

pub use builders::{AnalysisBuilder, SeedImageBuilder};
pub use mocks::{MockNotificationSink, RecordingPreviewStore, ScriptedQualityModel, TextRenderer};
