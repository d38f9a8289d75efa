//! Depth sensor types.
//!
//! Provides the per-pixel depth grid produced by stereo cameras, structured
//! light sensors, or time-of-flight cameras, co-registered with a color image.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SensorError;

/// A depth map from a depth sensor.
///
/// One entry per pixel of the source image, same resolution.
///
/// # Depth Values
///
/// - Depth is stored in meters as `f32` values
/// - An entry is valid iff it is finite and strictly positive; `NaN`,
///   infinities, zero and negative values all mean "no measurement"
/// - The depth buffer is stored in row-major order (width × height)
///
/// A depth map is an immutable per-frame snapshot. Nothing in this workspace
/// mutates or retains one beyond a call.
///
/// # Example
///
/// ```
/// use sensor_types::DepthMap;
///
/// let depth_map = DepthMap::filled(640, 480, 1.5).unwrap();
///
/// assert_eq!(depth_map.pixel_count(), 640 * 480);
/// assert_eq!(depth_map.get_valid(10, 10), Some(1.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DepthMap {
    width: u32,
    height: u32,
    depths: Vec<f32>,
}

impl DepthMap {
    /// Creates a depth map from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::InvalidDimensions`] if either dimension is zero,
    /// or [`SensorError::BufferSizeMismatch`] if `depths.len()` is not
    /// `width * height`.
    pub fn new(width: u32, height: u32, depths: Vec<f32>) -> Result<Self, SensorError> {
        if width == 0 || height == 0 {
            return Err(SensorError::invalid_dimensions(width, height));
        }
        let expected = width as usize * height as usize;
        if depths.len() != expected {
            return Err(SensorError::buffer_mismatch(expected, depths.len()));
        }
        Ok(Self {
            width,
            height,
            depths,
        })
    }

    /// Creates a depth map with every pixel set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::InvalidDimensions`] if either dimension is zero.
    pub fn filled(width: u32, height: u32, value: f32) -> Result<Self, SensorError> {
        Self::new(
            width,
            height,
            vec![value; width as usize * height as usize],
        )
    }

    /// Creates a depth map by evaluating `f(x, y)` for every pixel.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::InvalidDimensions`] if either dimension is zero.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> f32,
    ) -> Result<Self, SensorError> {
        let mut depths = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                depths.push(f(x, y));
            }
        }
        Self::new(width, height, depths)
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Returns the center pixel `(width / 2, height / 2)`.
    #[must_use]
    pub const fn center(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }

    /// Checks whether a (possibly negative) coordinate lies inside the map.
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Gets the raw depth at a pixel coordinate.
    ///
    /// Returns `None` if coordinates are out of bounds. The value itself may
    /// still be invalid; see [`Self::get_valid`].
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.depths.get(idx).copied()
    }

    /// Checks if a depth value is a usable measurement (finite and positive).
    #[must_use]
    pub fn is_valid_depth(depth: f32) -> bool {
        depth.is_finite() && depth > 0.0
    }

    /// Gets the depth at a pixel, returning `None` if out of bounds or invalid.
    #[must_use]
    pub fn get_valid(&self, x: u32, y: u32) -> Option<f32> {
        self.get(x, y).filter(|&d| Self::is_valid_depth(d))
    }

    /// Counts the number of valid depth pixels.
    #[must_use]
    pub fn valid_pixel_count(&self) -> usize {
        self.depths
            .iter()
            .filter(|&&d| Self::is_valid_depth(d))
            .count()
    }

    /// Returns the fraction of pixels with valid depth (0.0 to 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn valid_fraction(&self) -> f32 {
        if self.depths.is_empty() {
            return 0.0;
        }
        self.valid_pixel_count() as f32 / self.depths.len() as f32
    }

    /// Returns depth statistics (min, max, mean) for valid pixels.
    ///
    /// Returns `None` if there are no valid pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn depth_stats(&self) -> Option<DepthStats> {
        let mut count = 0usize;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;

        for &d in self.depths.iter().filter(|&&d| Self::is_valid_depth(d)) {
            count += 1;
            min = min.min(d);
            max = max.max(d);
            sum += f64::from(d);
        }

        if count == 0 {
            return None;
        }

        #[allow(clippy::cast_possible_truncation)]
        let mean = (sum / count as f64) as f32;
        Some(DepthStats { min, max, mean })
    }
}

/// Statistics for valid depth values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DepthStats {
    /// Minimum valid depth in meters.
    pub min: f32,
    /// Maximum valid depth in meters.
    pub max: f32,
    /// Mean valid depth in meters.
    pub mean: f32,
}
