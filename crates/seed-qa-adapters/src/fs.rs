//! Filesystem adapter turning paths into upload candidates.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageFormat;
use seed_qa_core::domain::{ImageData, SourceFile};
use tracing::{debug, warn};

/// Extensions picked up when scanning directories.
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "avif",
];

/// Media type declared for files whose extension is not a known image format.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Filesystem candidate source.
///
/// Explicitly named files always become candidates so the upload validator
/// can reject them with a reason; directory scans only pick up files with an
/// image extension.
pub struct FsCandidateSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    read_limit: Option<u64>,
}

impl FsCandidateSource {
    /// Creates a new filesystem candidate source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            paths,
            recursive,
            read_limit: None,
        }
    }

    /// Skips reading the contents of files larger than `bytes`.
    ///
    /// Such files still become candidates carrying their real size, so the
    /// validator rejects them without the bytes ever being loaded.
    #[must_use]
    pub const fn with_read_limit(mut self, bytes: u64) -> Self {
        self.read_limit = Some(bytes);
        self
    }

    /// Collects the candidate files, in argument order; directory contents are
    /// sorted by path.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                files.push(path.clone());
            } else if path.is_dir() {
                let start = files.len();
                self.collect_from_dir(path, &mut files);
                files[start..].sort();
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && has_image_extension(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }

    /// Loads every candidate. Unreadable files are logged and skipped.
    #[must_use]
    pub fn candidates(&self) -> Vec<SourceFile> {
        let files = self.files();
        debug!("Found {} candidate files", files.len());

        files
            .iter()
            .filter_map(|path| match self.load(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("{e:#}");
                    None
                }
            })
            .collect()
    }

    fn load(&self, path: &Path) -> Result<SourceFile> {
        let name = display_name(path);
        let media_type = media_type(path);

        let size = std::fs::metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();
        if self.read_limit.is_some_and(|limit| size > limit) {
            debug!("Not reading {} ({size} bytes)", path.display());
            return Ok(SourceFile::new(name, media_type, ImageData::from(Vec::new())).with_size(size));
        }

        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(SourceFile::new(name, media_type, ImageData::from(bytes)))
    }
}

/// Name shown for a file: its final component, or the whole path if it has none.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
        .into_owned()
}

/// Checks if a path has an image extension.
fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// Media type declared for `path`, derived from its extension.
#[must_use]
pub fn media_type(path: &Path) -> &'static str {
    ImageFormat::from_path(path).map_or(UNKNOWN_MEDIA_TYPE, |f| f.to_mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_image_extension() {
        assert!(has_image_extension(Path::new("seed.jpg")));
        assert!(has_image_extension(Path::new("seed.JPEG")));
        assert!(has_image_extension(Path::new("seed.png")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("seed")));
    }

    #[test]
    fn test_display_name_is_final_component() {
        assert_eq!(display_name(Path::new("photos/batch/a.png")), "a.png");
        assert_eq!(display_name(Path::new("a.png")), "a.png");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn test_media_type() {
        assert_eq!(media_type(Path::new("a.png")), "image/png");
        assert_eq!(media_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(media_type(Path::new("a.txt")), UNKNOWN_MEDIA_TYPE);
        assert_eq!(media_type(Path::new("a")), UNKNOWN_MEDIA_TYPE);
    }
}
