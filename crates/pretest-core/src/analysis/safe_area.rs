//! Safe-area mask builder.
//!
//! Approximates the region of a creative left visible by platform UI
//! chrome for a given placement. The rectangle fractions are tunable
//! constants, not derived values.

use crate::domain::Placement;

use super::map::ScalarMap;

/// Vertical and horizontal extent of a safe area as fractions of the
/// full image.
struct SafeRect {
    y0: f32,
    y1: f32,
    x0: f32,
    x1: f32,
}

const fn safe_rect(placement: Placement) -> SafeRect {
    match placement {
        // Story avoids the top/bottom UI bars.
        Placement::Story => SafeRect {
            y0: 0.15,
            y1: 0.85,
            x0: 0.10,
            x1: 0.90,
        },
        Placement::Square => SafeRect {
            y0: 0.10,
            y1: 0.90,
            x0: 0.10,
            x1: 0.90,
        },
        Placement::Feed => SafeRect {
            y0: 0.15,
            y1: 0.85,
            x0: 0.15,
            x1: 0.85,
        },
    }
}

/// Builds a binary mask that is 1 inside the centered safe rectangle
/// for the placement and 0 everywhere else.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn build_mask(width: u32, height: u32, placement: Placement) -> ScalarMap {
    let rect = safe_rect(placement);
    let mut mask = ScalarMap::zeros(width, height);

    let y0 = (rect.y0 * height as f32) as u32;
    let y1 = (rect.y1 * height as f32) as u32;
    let x0 = (rect.x0 * width as f32) as u32;
    let x1 = (rect.x1 * width as f32) as u32;

    for y in y0..y1.min(height) {
        for x in x0..x1.min(width) {
            mask.set(x, y, 1.0);
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_area(mask: &ScalarMap) -> f64 {
        mask.sum()
    }

    fn center_of_mass(mask: &ScalarMap) -> (f64, f64) {
        let mut sum = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                let v = f64::from(mask.get(x, y));
                sum += v;
                cx += v * f64::from(x);
                cy += v * f64::from(y);
            }
        }
        (cx / sum, cy / sum)
    }

    #[test]
    fn test_mask_smaller_than_image_for_all_placements() {
        for placement in [Placement::Feed, Placement::Story, Placement::Square] {
            let mask = build_mask(200, 100, placement);
            let area = mask_area(&mask);
            assert!(area > 0.0, "{placement:?} mask must be non-empty");
            assert!(
                area < 200.0 * 100.0,
                "{placement:?} mask must be strictly smaller than the image"
            );
        }
    }

    #[test]
    fn test_mask_is_centered() {
        for placement in [Placement::Feed, Placement::Story, Placement::Square] {
            let mask = build_mask(200, 100, placement);
            let (cx, cy) = center_of_mass(&mask);
            // Center of mass at the image center within half a pixel
            assert!(
                (cx - 99.5).abs() < 1.0,
                "{placement:?} cx = {cx}, expected ~99.5"
            );
            assert!(
                (cy - 49.5).abs() < 1.0,
                "{placement:?} cy = {cy}, expected ~49.5"
            );
        }
    }

    #[test]
    fn test_story_mask_wider_than_feed() {
        let story = build_mask(100, 100, Placement::Story);
        let feed = build_mask(100, 100, Placement::Feed);
        // Story keeps 80% of the width, feed only 70%
        assert!(mask_area(&story) > mask_area(&feed));
    }

    #[test]
    fn test_mask_values_binary() {
        let mask = build_mask(60, 60, Placement::Square);
        assert!(mask
            .values()
            .iter()
            .all(|&v| (v - 0.0).abs() < f32::EPSILON || (v - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_feed_rectangle_bounds() {
        let mask = build_mask(100, 100, Placement::Feed);
        // [0.15, 0.85] on both axes
        assert_eq!(mask.get(14, 50), 0.0);
        assert_eq!(mask.get(15, 50), 1.0);
        assert_eq!(mask.get(84, 50), 1.0);
        assert_eq!(mask.get(85, 50), 0.0);
        assert_eq!(mask.get(50, 14), 0.0);
        assert_eq!(mask.get(50, 85), 0.0);
    }
}
