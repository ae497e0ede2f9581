//! Focus ratio: the fraction of saliency energy inside the safe area.

use super::map::ScalarMap;

/// Small constant guarding the all-zero saliency case.
const EPSILON: f64 = 1e-6;

/// Computes `sum(saliency * mask) / (sum(saliency) + epsilon)`.
///
/// The result is always in `[0, 1]`: 0 when no saliency lies in the
/// safe area (including the degenerate all-zero map), ~1 when all of
/// it does.
///
/// # Panics
///
/// Panics if the map and mask dimensions differ; that is a caller
/// contract violation, not a recoverable condition.
#[must_use]
pub fn focus_ratio(saliency: &ScalarMap, mask: &ScalarMap) -> f64 {
    assert_eq!(
        (saliency.width(), saliency.height()),
        (mask.width(), mask.height()),
        "saliency map and safe-area mask dimensions must match"
    );

    let masked: f64 = saliency
        .values()
        .iter()
        .zip(mask.values())
        .map(|(&s, &m)| f64::from(s) * f64::from(m))
        .sum();

    masked / (saliency.sum() + EPSILON)
}
