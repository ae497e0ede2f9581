//! Visual-noise estimation.
//!
//! Combines edge density with color-cluster balance into a single
//! busy-ness scalar. This is an approximate proxy metric, not a
//! calibrated noise model: uniform cluster occupancy reads as "more
//! organized" and lowers the result.

use image::imageops::FilterType;
use image::{GrayImage, RgbImage};
use imageproc::edges::canny;

use super::kmeans::cluster_colors;

/// Canny hysteresis thresholds.
const CANNY_LOW: f32 = 100.0;
const CANNY_HIGH: f32 = 200.0;

/// Downsample edge length for the cluster-balance component.
const SAMPLE_SIZE: u32 = 128;

/// Number of color clusters for the balance component.
const CLUSTERS: usize = 5;

/// Fraction of pixels marked as edges by a dual-threshold detector.
#[allow(clippy::cast_precision_loss)]
fn edge_density(gray: &GrayImage) -> f64 {
    let total = gray.width() as u64 * gray.height() as u64;
    if total == 0 {
        return 0.0;
    }
    let edges = canny(gray, CANNY_LOW, CANNY_HIGH);
    let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();
    edge_pixels as f64 / total as f64
}

/// Variance of cluster-occupancy proportions from a k=5 clustering.
fn cluster_variance(rgb: &RgbImage) -> f64 {
    let small = image::imageops::resize(rgb, SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle);
    let pixels: Vec<[f32; 3]> = small
        .pixels()
        .map(|p| [f32::from(p.0[0]), f32::from(p.0[1]), f32::from(p.0[2])])
        .collect();

    let clustering = cluster_colors(&pixels, CLUSTERS, 3, 10, 1.0);
    let occupancy = clustering.occupancy();

    #[allow(clippy::cast_precision_loss)]
    let mean = occupancy.iter().sum::<f64>() / occupancy.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let variance = occupancy
        .iter()
        .map(|&p| (p - mean) * (p - mean))
        .sum::<f64>()
        / occupancy.len() as f64;
    variance
}

/// Estimates visual noise for a creative; higher means busier.
///
/// `0.6 x edge_density + 0.4 x (1 - cluster_variance)`. Nominally in
/// `[0, 1]` but deliberately not clamped here; the scoring engine
/// clamps on consumption.
#[must_use]
pub fn visual_noise(rgb: &RgbImage, gray: &GrayImage) -> f64 {
    let density = edge_density(gray);
    let variance = cluster_variance(rgb);
    0.6 * density + 0.4 * (1.0 - variance)
}
