//! Saliency heatmap rendering.

use image::{Rgb, RgbImage};

use super::map::ScalarMap;

/// Renders a saliency map as a cool-to-hot heatmap image.
///
/// The map is min-max normalized to 8-bit range first, so only the
/// relative magnitudes matter.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render(saliency: &ScalarMap) -> RgbImage {
    let mut normalized = saliency.clone();
    normalized.normalize();

    RgbImage::from_fn(saliency.width(), saliency.height(), |x, y| {
        let v = (normalized.get(x, y) * 255.0).clamp(0.0, 255.0) as u8;
        jet(v)
    })
}

/// Jet-style color ramp: dark blue through cyan, yellow and red.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn jet(value: u8) -> Rgb<u8> {
    let v = f32::from(value) / 255.0;
    let channel = |center: f32| ((1.5 - (4.0 * v - center).abs()).clamp(0.0, 1.0) * 255.0) as u8;
    Rgb([channel(3.0), channel(2.0), channel(1.0)])
}
