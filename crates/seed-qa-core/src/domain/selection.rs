//! Input files and the entries of a pending selection.

use std::fmt;
use std::sync::Arc;

use crate::ports::PreviewHandle;

/// Opaque, cheaply cloneable image bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData(Arc<[u8]>);

impl ImageData {
    /// Raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ImageData {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }
}

impl From<&[u8]> for ImageData {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageData({} bytes)", self.0.len())
    }
}

/// A file offered for analysis: bytes plus name, size and declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name as shown to the user.
    pub name: String,
    /// Declared media type, e.g. `image/jpeg`.
    pub media_type: String,
    /// Declared size in bytes.
    pub size: u64,
    /// File contents.
    pub data: ImageData,
}

impl SourceFile {
    /// Creates a source file whose declared size is the byte length of `data`.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: ImageData) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: data.len() as u64,
            data,
        }
    }

    /// Overrides the declared size.
    #[must_use]
    pub const fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Whether the declared media type names an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// An accepted file and the preview allocated for it.
///
/// Dropping the entry releases its share of the preview.
#[derive(Debug)]
pub struct SelectionEntry {
    source: SourceFile,
    preview: PreviewHandle,
}

impl SelectionEntry {
    pub(crate) const fn new(source: SourceFile, preview: PreviewHandle) -> Self {
        Self { source, preview }
    }

    /// The accepted file.
    #[must_use]
    pub const fn source(&self) -> &SourceFile {
        &self.source
    }

    /// File name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.source.name
    }

    /// Preview bound to this file.
    #[must_use]
    pub const fn preview(&self) -> &PreviewHandle {
        &self.preview
    }
}
