//! Spectral-residual saliency estimation.
//!
//! The primary estimator works in the frequency domain: the smooth,
//! expected part of the log-amplitude spectrum is removed so that only
//! the "residual" high-information regions survive the inverse
//! transform. If the primary estimator fails, a Laplacian edge
//! magnitude fallback is used; the fallback triggers only on estimator
//! failure, never on visually boring input.

use anyhow::{ensure, Context, Result};
use image::imageops::FilterType;
use image::{GrayImage, ImageBuffer, Luma};
use imageproc::filter::{gaussian_blur_f32, laplacian_filter};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

use super::map::ScalarMap;

/// Working resolution of the spectral estimator. The saliency map is
/// computed at this size and upsampled to the source dimensions.
const SPECTRAL_SIZE: u32 = 64;

/// Sigma of the post-transform Gaussian smoothing.
const SMOOTH_SIGMA: f32 = 2.5;

/// Computes a saliency map for the creative, same spatial size as the
/// input.
///
/// Falls back to the Laplacian estimator when the spectral method
/// fails; a degenerate (all-zero) result from either path is valid
/// output for downstream consumers.
#[must_use]
pub fn saliency_map(gray: &GrayImage) -> ScalarMap {
    match spectral_residual(gray) {
        Ok(map) => map,
        Err(e) => {
            debug!("Spectral saliency failed ({e}), using Laplacian fallback");
            laplacian_fallback(gray)
        }
    }
}

/// Spectral-residual saliency.
///
/// # Errors
///
/// Fails on zero-sized input or non-finite spectral values.
pub fn spectral_residual(gray: &GrayImage) -> Result<ScalarMap> {
    ensure!(
        gray.width() > 0 && gray.height() > 0,
        "cannot compute saliency for a zero-sized image"
    );

    let small = image::imageops::resize(gray, SPECTRAL_SIZE, SPECTRAL_SIZE, FilterType::Triangle);
    let n = (SPECTRAL_SIZE * SPECTRAL_SIZE) as usize;

    let mut spectrum: Vec<Complex<f32>> = small
        .pixels()
        .map(|p| Complex::new(f32::from(p.0[0]), 0.0))
        .collect();

    fft_2d(&mut spectrum, SPECTRAL_SIZE as usize, false);

    // Log-amplitude spectrum and its smoothed trend
    let amplitude: Vec<f32> = spectrum.iter().map(|c| c.norm()).collect();
    let phase: Vec<f32> = spectrum.iter().map(|c| c.arg()).collect();
    let log_amp: Vec<f32> = amplitude.iter().map(|&a| (a + 1e-8).ln()).collect();
    let smoothed = box_filter_3x3(&log_amp, SPECTRAL_SIZE as usize);

    // Recombine the residual with the original phase. The residual is
    // weighted by the original amplitude so that empty spectrum bins
    // stay empty; a bare exp(residual) maps them to unit magnitude and
    // floods sparse spectra with interference patterns.
    for i in 0..n {
        let residual = log_amp[i] - smoothed[i];
        let magnitude = amplitude[i] * residual.exp();
        spectrum[i] = Complex::from_polar(magnitude, phase[i]);
    }

    fft_2d(&mut spectrum, SPECTRAL_SIZE as usize, true);

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / n as f32;
    let values: Vec<f32> = spectrum
        .iter()
        .map(|c| {
            let v = c.norm() * scale;
            v * v
        })
        .collect();

    ensure!(
        values.iter().all(|v| v.is_finite()),
        "spectral residual produced non-finite values"
    );

    let plane: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_raw(SPECTRAL_SIZE, SPECTRAL_SIZE, values)
            .context("saliency plane does not match the spectral size")?;
    let smoothed_plane = gaussian_blur_f32(&plane, SMOOTH_SIGMA);

    let mut map = ScalarMap::from_raw(SPECTRAL_SIZE, SPECTRAL_SIZE, smoothed_plane.into_raw());
    map.normalize();

    Ok(resize_bilinear(&map, gray.width(), gray.height()))
}

/// Fallback estimator: grayscale Laplacian magnitude, min-max
/// normalized to `[0, 1]`.
#[must_use]
pub fn laplacian_fallback(gray: &GrayImage) -> ScalarMap {
    let (w, h) = (gray.width(), gray.height());
    if w == 0 || h == 0 {
        return ScalarMap::zeros(w, h);
    }

    let lap = laplacian_filter(gray);
    let values: Vec<f32> = lap.pixels().map(|p| f32::from(p.0[0]).abs()).collect();

    let mut map = ScalarMap::from_raw(w, h, values);
    map.normalize();
    map
}

/// In-place 2-D FFT over a square row-major buffer.
///
/// Rows are transformed first, then columns via transposes. The
/// inverse path leaves the conventional `1/N` scaling to the caller.
fn fft_2d(buffer: &mut [Complex<f32>], size: usize, inverse: bool) {
    let mut planner = FftPlanner::new();
    let fft = if inverse {
        planner.plan_fft_inverse(size)
    } else {
        planner.plan_fft_forward(size)
    };

    // Rows
    fft.process(buffer);

    // Columns
    transpose(buffer, size);
    fft.process(buffer);
    transpose(buffer, size);
}

fn transpose(buffer: &mut [Complex<f32>], size: usize) {
    for y in 0..size {
        for x in (y + 1)..size {
            buffer.swap(y * size + x, x * size + y);
        }
    }
}

/// 3x3 box filter with edge clamping.
fn box_filter_3x3(values: &[f32], size: usize) -> Vec<f32> {
    let mut out = vec![0.0; values.len()];
    for y in 0..size {
        for x in 0..size {
            let mut sum = 0.0;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    let sy = (y as i64 + dy).clamp(0, size as i64 - 1) as usize;
                    let sx = (x as i64 + dx).clamp(0, size as i64 - 1) as usize;
                    sum += values[sy * size + sx];
                }
            }
            out[y * size + x] = sum / 9.0;
        }
    }
    out
}

/// Bilinear upsampling of a scalar map to the target dimensions.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn resize_bilinear(map: &ScalarMap, width: u32, height: u32) -> ScalarMap {
    if map.width() == width && map.height() == height {
        return map.clone();
    }

    let mut out = ScalarMap::zeros(width, height);
    let sx = map.width() as f32 / width as f32;
    let sy = map.height() as f32 / height as f32;

    for y in 0..height {
        for x in 0..width {
            let fx = ((x as f32 + 0.5) * sx - 0.5).max(0.0);
            let fy = ((y as f32 + 0.5) * sy - 0.5).max(0.0);
            let x0 = (fx as u32).min(map.width() - 1);
            let y0 = (fy as u32).min(map.height() - 1);
            let x1 = (x0 + 1).min(map.width() - 1);
            let y1 = (y0 + 1).min(map.height() - 1);
            let tx = fx - x0 as f32;
            let ty = fy - y0 as f32;

            let top = map.get(x0, y0) * (1.0 - tx) + map.get(x1, y0) * tx;
            let bottom = map.get(x0, y1) * (1.0 - tx) + map.get(x1, y1) * tx;
            out.set(x, y, top * (1.0 - ty) + bottom * ty);
        }
    }

    out
}
