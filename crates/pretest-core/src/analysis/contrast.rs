//! Dominant-color contrast estimation.
//!
//! Clusters pixel colors into two groups on a small downsample and
//! computes a WCAG-style relative-luminance contrast ratio between the
//! two cluster centers.

use image::imageops::FilterType;
use image::RgbImage;

use super::kmeans::cluster_colors;

/// Downsample edge length used before clustering.
const SAMPLE_SIZE: u32 = 256;

/// WCAG relative luminance of a color with channels in `[0, 1]`.
///
/// Gamma handling matches the shipped estimator: channels above the
/// 0.03928 breakpoint are raised to 2.4 directly, below it divided by
/// 12.92.
fn relative_luminance(c: [f32; 3]) -> f64 {
    fn gamma(u: f64) -> f64 {
        if u > 0.03928 {
            u.powf(2.4)
        } else {
            u / 12.92
        }
    }
    let r = gamma(f64::from(c[0]));
    let g = gamma(f64::from(c[1]));
    let b = gamma(f64::from(c[2]));
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Estimates the contrast ratio between the two dominant colors.
///
/// Always >= 1; approaches 1 when clustering degenerates to a single
/// dominant color, and reaches 21 only for pure black/white clusters.
#[must_use]
pub fn contrast_ratio(rgb: &RgbImage) -> f64 {
    let small = image::imageops::resize(rgb, SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle);

    let pixels: Vec<[f32; 3]> = small
        .pixels()
        .map(|p| [f32::from(p.0[0]), f32::from(p.0[1]), f32::from(p.0[2])])
        .collect();

    let clustering = cluster_colors(&pixels, 2, 3, 20, 0.5);

    let lums: Vec<f64> = clustering
        .centers
        .iter()
        .map(|&c| relative_luminance([c[0] / 255.0, c[1] / 255.0, c[2] / 255.0]))
        .collect();

    let hi = lums.iter().copied().fold(f64::MIN, f64::max);
    let lo = lums.iter().copied().fold(f64::MAX, f64::min);

    (hi + 0.05) / (lo + 0.05)
}
