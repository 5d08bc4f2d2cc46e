//! Quality model implementations.
//!
//! Each model implements the `QualityModel` port; the orchestrator only sees
//! the trait.

mod random;

pub use random::{ParameterProfile, RandomQualityModel, PARAMETER_PROFILES, SCORE_RANGE};
