//! Synthetic creative builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use pretest_core::domain::CreativeImage;

/// Builder for creating synthetic test creatives.
///
/// Provides convenience methods for generating creatives with specific
/// characteristics (high contrast, busy texture, centered subject, etc.).
pub struct SyntheticCreativeBuilder;

impl SyntheticCreativeBuilder {
    /// Creates a uniform single-color creative (no saliency, no edges,
    /// contrast ratio ~1).
    #[must_use]
    pub fn uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> CreativeImage {
        let img = RgbImage::from_fn(width, height, |_, _| Rgb([r, g, b]));
        CreativeImage::new("synthetic://uniform", DynamicImage::ImageRgb8(img))
    }

    /// Creates a uniform mid-gray creative.
    #[must_use]
    pub fn flat_gray(width: u32, height: u32) -> CreativeImage {
        Self::uniform(width, height, 128, 128, 128)
    }

    /// Creates a high-contrast checkerboard (busy edges, maximum
    /// visual noise on the edge component).
    #[must_use]
    pub fn checkerboard(width: u32, height: u32, cell_size: u32) -> CreativeImage {
        let cell = cell_size.max(1);
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        CreativeImage::new("synthetic://checkerboard", DynamicImage::ImageLuma8(img))
    }

    /// Creates a creative split into a black left half and a white
    /// right half (contrast ratio ~21:1, one strong edge).
    #[must_use]
    pub fn two_tone_halves(width: u32, height: u32) -> CreativeImage {
        let img = RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        CreativeImage::new("synthetic://two_tone", DynamicImage::ImageRgb8(img))
    }

    /// Creates a dark creative with a single bright square centered in
    /// the safe area (saliency concentrates in-frame).
    #[must_use]
    pub fn centered_blob(width: u32, height: u32) -> CreativeImage {
        let cx = width / 2;
        let cy = height / 2;
        let radius = (width.min(height) / 8).max(1);

        let img = RgbImage::from_fn(width, height, |x, y| {
            let dx = x.abs_diff(cx);
            let dy = y.abs_diff(cy);
            if dx < radius && dy < radius {
                Rgb([240, 240, 240])
            } else {
                Rgb([20, 20, 20])
            }
        });
        CreativeImage::new("synthetic://centered_blob", DynamicImage::ImageRgb8(img))
    }

    /// Creates a dark creative with a bright square tucked into the
    /// top-left corner, outside every safe area.
    #[must_use]
    pub fn corner_blob(width: u32, height: u32) -> CreativeImage {
        let size = (width.min(height) / 12).max(1);
        let img = RgbImage::from_fn(width, height, |x, y| {
            if x < size && y < size {
                Rgb([240, 240, 240])
            } else {
                Rgb([20, 20, 20])
            }
        });
        CreativeImage::new("synthetic://corner_blob", DynamicImage::ImageRgb8(img))
    }

    /// Creates a smooth horizontal luminance gradient.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> CreativeImage {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let val = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Luma([val])
        });
        CreativeImage::new(
            "synthetic://horizontal_gradient",
            DynamicImage::ImageLuma8(img),
        )
    }

    /// Creates a 1x1 pixel creative (edge case).
    #[must_use]
    pub fn single_pixel(value: u8) -> CreativeImage {
        let img = GrayImage::from_fn(1, 1, |_, _| Luma([value]));
        CreativeImage::new("synthetic://1x1", DynamicImage::ImageLuma8(img))
    }
}

/// Convenience functions for common test creatives.
impl SyntheticCreativeBuilder {
    /// A standard 128x128 creative that should score well on focus.
    #[must_use]
    pub fn focused_creative() -> CreativeImage {
        Self::centered_blob(128, 128)
    }

    /// A standard 128x128 creative with nothing to look at.
    #[must_use]
    pub fn empty_creative() -> CreativeImage {
        Self::flat_gray(128, 128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_dimensions_and_color() {
        let creative = SyntheticCreativeBuilder::uniform(100, 80, 10, 20, 30);
        assert_eq!(creative.width, 100);
        assert_eq!(creative.height, 80);
        assert_eq!(creative.path, "synthetic://uniform");
        assert_eq!(creative.to_rgb8().get_pixel(50, 40).0, [10, 20, 30]);
    }

    #[test]
    fn test_two_tone_split() {
        let creative = SyntheticCreativeBuilder::two_tone_halves(64, 64);
        let rgb = creative.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 32).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(63, 32).0, [255, 255, 255]);
    }

    #[test]
    fn test_centered_blob_geometry() {
        let creative = SyntheticCreativeBuilder::centered_blob(128, 128);
        let rgb = creative.to_rgb8();
        assert_eq!(rgb.get_pixel(64, 64).0, [240, 240, 240]);
        assert_eq!(rgb.get_pixel(0, 0).0, [20, 20, 20]);
        assert_eq!(rgb.get_pixel(127, 127).0, [20, 20, 20]);
    }

    #[test]
    fn test_corner_blob_outside_safe_area() {
        let creative = SyntheticCreativeBuilder::corner_blob(128, 128);
        let rgb = creative.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [240, 240, 240]);
        assert_eq!(rgb.get_pixel(64, 64).0, [20, 20, 20]);
    }

    #[test]
    fn test_gradient_range() {
        let creative = SyntheticCreativeBuilder::horizontal_gradient(256, 8);
        let luma = creative.to_luma8();
        assert!(luma.get_pixel(0, 0).0[0] < 5);
        assert!(luma.get_pixel(255, 0).0[0] > 250);
    }

    #[test]
    fn test_single_pixel() {
        let creative = SyntheticCreativeBuilder::single_pixel(42);
        assert_eq!(creative.width, 1);
        assert_eq!(creative.to_luma8().get_pixel(0, 0).0[0], 42);
    }
}
