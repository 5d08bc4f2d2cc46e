//! Upload validation and the running selection.
//!
//! Candidates are checked for an image media type and a size limit; accepted
//! ones are appended to the selection together with a freshly allocated
//! preview. Previews are released when an entry is removed or the selection is
//! reset (or later, if an analysis still holds the preview).

use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{SelectionEntry, SourceFile};
use crate::error::ValidationError;
use crate::ports::{PreviewHandle, PreviewStore};

/// Default per-file size limit (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// A candidate that was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The rejected candidate.
    pub file: SourceFile,
    /// Why it was rejected.
    pub reason: ValidationError,
}

/// Outcome of one `accept` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    /// Selection indices of the newly appended entries.
    pub accepted: Range<usize>,
    /// Candidates that were rejected, in input order.
    pub rejected: Vec<Rejection>,
}

impl Acceptance {
    /// Number of newly accepted entries.
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}

/// Validates candidates and owns the current selection.
pub struct UploadValidator {
    store: Arc<dyn PreviewStore>,
    max_file_size: u64,
    entries: Vec<SelectionEntry>,
}

impl UploadValidator {
    /// Creates an empty selection allocating previews from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn PreviewStore>) -> Self {
        Self {
            store,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            entries: Vec::new(),
        }
    }

    /// Overrides the per-file size limit.
    #[must_use]
    pub const fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Per-file size limit in bytes.
    #[must_use]
    pub const fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Checks a single candidate without touching the selection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidType`] for non-image media types and
    /// [`ValidationError::TooLarge`] for files above the size limit.
    pub fn validate(&self, file: &SourceFile) -> Result<(), ValidationError> {
        if !file.is_image() {
            return Err(ValidationError::InvalidType {
                media_type: file.media_type.clone(),
            });
        }
        if file.size > self.max_file_size {
            return Err(ValidationError::TooLarge {
                size: file.size,
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Validates candidates and appends the valid ones to the selection.
    ///
    /// Existing entries are kept; each accepted file gets its own preview.
    pub fn accept(&mut self, candidates: impl IntoIterator<Item = SourceFile>) -> Acceptance {
        let start = self.entries.len();
        let mut rejected = Vec::new();

        for file in candidates {
            match self.validate(&file) {
                Ok(()) => {
                    let preview =
                        PreviewHandle::acquire(Arc::clone(&self.store), &file.name, &file.data);
                    debug!("Accepted {} ({} bytes)", file.name, file.size);
                    self.entries.push(SelectionEntry::new(file, preview));
                }
                Err(reason) => {
                    warn!("Rejected {}: {reason}", file.name);
                    rejected.push(Rejection { file, reason });
                }
            }
        }

        Acceptance {
            accepted: start..self.entries.len(),
            rejected,
        }
    }

    /// Removes the entry at `index`, releasing its preview now.
    ///
    /// Later entries shift down by one. Returns the removed file's name, or
    /// `None` if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        let name = entry.name().to_string();
        drop(entry);
        debug!("Removed {name} from selection");
        Some(name)
    }

    /// Clears the selection, releasing every preview. Returns the number of
    /// entries removed.
    pub fn reset(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            debug!("Selection reset ({count} entries)");
        }
        count
    }

    /// Current entries in selection order.
    #[must_use]
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// Number of selected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
