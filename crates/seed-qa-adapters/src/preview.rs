//! In-memory preview store handing out blob-style URLs.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use seed_qa_core::domain::ImageData;
use seed_qa_core::ports::PreviewStore;
use tracing::{trace, warn};
use uuid::Uuid;

/// URL prefix of every preview.
pub const BLOB_PREFIX: &str = "blob:seed-qa/";

/// Keeps preview bytes in memory under `blob:seed-qa/<uuid>` URLs until they
/// are released.
#[derive(Default)]
pub struct BlobPreviewStore {
    blobs: Mutex<HashMap<String, ImageData>>,
}

impl BlobPreviewStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes behind `url`, if it is still live.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<ImageData> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Number of live previews.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no preview is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreviewStore for BlobPreviewStore {
    fn allocate(&self, name: &str, data: &ImageData) -> String {
        let url = format!("{BLOB_PREFIX}{}", Uuid::new_v4());
        trace!("{url} -> {name} ({} bytes)", data.len());
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone(), data.clone());
        url
    }

    fn release(&self, url: &str) {
        let removed = self
            .blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url);
        if removed.is_none() {
            warn!("Release of unknown preview {url}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        let store = BlobPreviewStore::new();
        let data = ImageData::from(vec![1u8, 2, 3]);

        let a = store.allocate("a.png", &data);
        let b = store.allocate("a.png", &data);

        assert!(a.starts_with(BLOB_PREFIX));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a).map(|d| d.len()), Some(3));

        store.release(&a);
        assert!(store.get(&a).is_none());
        assert_eq!(store.len(), 1);
    }
}
