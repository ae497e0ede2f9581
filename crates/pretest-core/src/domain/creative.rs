//! Creative image and geometry types.

use serde::{Deserialize, Serialize};

/// A decoded ad creative, immutable for the duration of one analysis.
#[derive(Debug, Clone)]
pub struct CreativeImage {
    /// Path or identifier of the creative file.
    pub path: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Decoded pixel data.
    pub image: image::DynamicImage,
}

impl CreativeImage {
    /// Wraps a decoded image with its source path.
    #[must_use]
    pub fn new(path: impl Into<String>, image: image::DynamicImage) -> Self {
        let width = image.width();
        let height = image.height();
        Self {
            path: path.into(),
            width,
            height,
            image,
        }
    }

    /// Returns the creative as 8-bit RGB.
    #[must_use]
    pub fn to_rgb8(&self) -> image::RgbImage {
        self.image.to_rgb8()
    }

    /// Returns the creative as 8-bit grayscale.
    #[must_use]
    pub fn to_luma8(&self) -> image::GrayImage {
        self.image.to_luma8()
    }
}

/// Axis-aligned bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box area in pixels.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Box center as floating-point coordinates.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }
}

/// Platform placement of a creative, deciding the safe-area geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Standard feed placement.
    #[default]
    Feed,
    /// Full-screen story placement with top/bottom UI bars.
    Story,
    /// Square placement.
    Square,
}

impl Placement {
    /// Parses a placement string, falling back to `Feed` for anything
    /// unrecognized rather than failing.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "story" => Self::Story,
            "square" => Self::Square,
            "feed" => Self::Feed,
            other => {
                tracing::debug!("Unknown placement '{other}', using feed geometry");
                Self::Feed
            }
        }
    }

    /// Name used in reports and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Story => "story",
            Self::Square => "square",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_area_and_center() {
        let bbox = BoundingBox::new(10, 20, 40, 30);
        assert_eq!(bbox.area(), 1200);
        assert_eq!(bbox.center(), (30.0, 35.0));
    }

    #[test]
    fn test_placement_parse_lossy() {
        assert_eq!(Placement::parse_lossy("story"), Placement::Story);
        assert_eq!(Placement::parse_lossy("SQUARE"), Placement::Square);
        assert_eq!(Placement::parse_lossy("feed"), Placement::Feed);
        // Unknown values fall back to feed geometry instead of failing
        assert_eq!(Placement::parse_lossy("carousel"), Placement::Feed);
        assert_eq!(Placement::parse_lossy(""), Placement::Feed);
    }

    #[test]
    fn test_creative_dimensions() {
        let img = image::DynamicImage::new_rgb8(320, 200);
        let creative = CreativeImage::new("ad.png", img);
        assert_eq!(creative.width, 320);
        assert_eq!(creative.height, 200);
        assert_eq!(creative.path, "ad.png");
    }
}
