//! Row-major scalar plane shared by saliency maps and safe-area masks.

/// A `height x width` plane of `f32` values.
///
/// Saliency maps are non-negative with arbitrary scale; only relative
/// magnitude is meaningful. Masks hold values in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ScalarMap {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ScalarMap {
    /// Creates an all-zero map.
    #[must_use]
    pub fn zeros(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    /// Wraps existing row-major data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height`.
    #[must_use]
    pub fn from_raw(width: u32, height: u32, data: Vec<f32>) -> Self {
        assert_eq!(
            data.len(),
            width as usize * height as usize,
            "scalar map data length must match dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Map width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Map height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Value at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Sets the value at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        self.data[y as usize * self.width as usize + x as usize] = value;
    }

    /// Raw row-major values.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw row-major values.
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Sum of all values.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| f64::from(v)).sum()
    }

    /// Minimum and maximum value, or `(0, 0)` for an empty map.
    #[must_use]
    pub fn min_max(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }

    /// Min-max normalizes values into `[0, 1]` in place.
    ///
    /// A small epsilon guards the flat-map case; an all-constant map
    /// normalizes to all-zero.
    pub fn normalize(&mut self) {
        let (min, max) = self.min_max();
        let range = max - min + 1e-6;
        for v in &mut self.data {
            *v = (*v - min) / range;
        }
    }
}
