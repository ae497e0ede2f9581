//! Creative source port for loading images from various sources.

use crate::domain::CreativeImage;

/// Port for loading creatives from a source.
pub trait CreativeSource: Send + Sync {
    /// Returns an iterator over creatives from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a creative fails to load.
    fn creatives(&self) -> Box<dyn Iterator<Item = anyhow::Result<CreativeImage>> + Send + '_>;

    /// Returns the total number of creatives, if known.
    fn count_hint(&self) -> Option<usize>;
}
