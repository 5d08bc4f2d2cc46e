//! Preview store port and the scoped preview handle.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::trace;

use crate::domain::ImageData;

/// Allocates and releases displayable preview resources for in-memory files.
pub trait PreviewStore: Send + Sync {
    /// Allocates a preview for `data` and returns its URL.
    fn allocate(&self, name: &str, data: &ImageData) -> String;

    /// Releases a preview previously returned by `allocate`.
    fn release(&self, url: &str);
}

struct Lease {
    url: String,
    store: Arc<dyn PreviewStore>,
}

impl Drop for Lease {
    fn drop(&mut self) {
        trace!("Releasing preview {}", self.url);
        self.store.release(&self.url);
    }
}

/// Shared lease on a preview resource.
///
/// Clones share one lease; the store releases the preview exactly once, when
/// the last clone is dropped.
#[derive(Clone)]
pub struct PreviewHandle(Arc<Lease>);

impl PreviewHandle {
    /// Allocates a preview for `data` from `store`.
    pub fn acquire(store: Arc<dyn PreviewStore>, name: &str, data: &ImageData) -> Self {
        let url = store.allocate(name, data);
        trace!("Allocated preview {url} for {name}");
        Self(Arc::new(Lease { url, store }))
    }

    /// Displayable URL of the preview.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.0.url
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreviewHandle").field(&self.0.url).finish()
    }
}

impl PartialEq for PreviewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0.url == other.0.url
    }
}

impl Eq for PreviewHandle {}

impl Serialize for PreviewHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.url())
    }
}
