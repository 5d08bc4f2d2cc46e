//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod document_renderer;
mod notification;
mod preview_store;
mod quality_model;

pub use document_renderer::DocumentRenderer;
pub use notification::{Notification, NotificationSink, NullSink};
pub use preview_store::{PreviewHandle, PreviewStore};
pub use quality_model::QualityModel;
