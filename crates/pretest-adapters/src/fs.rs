//! Filesystem adapter for loading creatives.

use anyhow::{ensure, Context, Result};
use pretest_core::{CreativeImage, CreativeSource};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supported image extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tiff", "tif"];

/// Filesystem creative source adapter.
pub struct FsCreativeSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsCreativeSource {
    /// Creates a new filesystem creative source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects all creative files from the configured paths.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if is_supported_image(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
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
            if path.is_file() && is_supported_image(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl CreativeSource for FsCreativeSource {
    fn creatives(&self) -> Box<dyn Iterator<Item = Result<CreativeImage>> + Send + '_> {
        let mut files = self.collect_files();
        files.sort();
        debug!("Found {} creative files", files.len());

        Box::new(files.into_iter().map(|path| load_creative(&path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()))
}

/// Loads a creative from the filesystem.
///
/// # Errors
///
/// Fails if the file cannot be opened or decoded, or if the decoded
/// image has a zero dimension.
pub fn load_creative(path: &Path) -> Result<CreativeImage> {
    let image =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;

    let creative = CreativeImage::new(path.to_string_lossy().into_owned(), image);
    ensure!(
        creative.width > 0 && creative.height > 0,
        "Image has zero dimension: {}",
        path.display()
    );

    Ok(creative)
}
