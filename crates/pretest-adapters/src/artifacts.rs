//! Artifact store for per-creative output files.
//!
//! Every analyzed creative gets a raw copy and a saliency heatmap in
//! the output directory, named `{id}_raw_{filename}` and
//! `{id}_heatmap_{filename}`, so a report's artifacts can be located
//! from its creative id alone.

use anyhow::{Context, Result};
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes per-creative artifacts under a single output directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Opens (and creates if needed) the artifact directory.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// The artifact directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies the source creative into the store as
    /// `{creative_id}_raw_{filename}`.
    ///
    /// # Errors
    ///
    /// Fails if the copy fails.
    pub fn persist_raw(&self, creative_id: &str, source: &Path) -> Result<PathBuf> {
        let filename = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("creative");
        let target = self.dir.join(format!("{creative_id}_raw_{filename}"));

        std::fs::copy(source, &target)
            .with_context(|| format!("Failed to copy creative to {}", target.display()))?;
        debug!("Persisted raw creative: {}", target.display());
        Ok(target)
    }

    /// Saves the heatmap next to the raw copy, deriving its name from
    /// the raw path by substituting the `_raw_` marker. The heatmap is
    /// always PNG-encoded regardless of the source format.
    ///
    /// # Errors
    ///
    /// Fails if PNG encoding or the write fails.
    pub fn persist_heatmap(&self, raw_path: &Path, heatmap: &RgbImage) -> Result<PathBuf> {
        let target = heatmap_path_for(raw_path);
        heatmap
            .save(&target)
            .with_context(|| format!("Failed to write heatmap: {}", target.display()))?;
        debug!("Persisted heatmap: {}", target.display());
        Ok(target)
    }
}

/// Derives the heatmap path from a raw artifact path: the `_raw_`
/// marker becomes `_heatmap_` and the extension becomes `.png`.
#[must_use]
pub fn heatmap_path_for(raw_path: &Path) -> PathBuf {
    let name = raw_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("creative");
    let renamed = name.replacen("_raw_", "_heatmap_", 1);
    raw_path.with_file_name(renamed).with_extension("png")
}
