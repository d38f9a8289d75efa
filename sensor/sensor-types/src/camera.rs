//! Camera calibration types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Camera intrinsic parameters (pinhole model focal lengths).
///
/// Supplied by the depth provider once per camera configuration and
/// treated as read-only. Only the focal lengths matter for metric sizing;
/// the principal point cancels out when converting a pixel *extent*.
///
/// # Pinhole Model
///
/// A real-world extent `E` at depth `Z` spans `p` pixels:
/// ```text
/// p = fx * E / Z    (horizontal)
/// p = fy * E / Z    (vertical)
/// ```
///
/// # Example
///
/// ```
/// use sensor_types::CameraIntrinsics;
///
/// let intrinsics = CameraIntrinsics::new(700.0, 700.0);
/// assert!(intrinsics.is_valid());
/// assert!(!CameraIntrinsics::new(0.0, 700.0).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraIntrinsics {
    /// Focal length in pixels (x direction).
    pub fx: f64,
    /// Focal length in pixels (y direction).
    pub fy: f64,
}

impl CameraIntrinsics {
    /// Creates new camera intrinsics.
    #[must_use]
    pub const fn new(fx: f64, fy: f64) -> Self {
        Self { fx, fy }
    }

    /// Creates intrinsics with equal focal lengths on both axes.
    #[must_use]
    pub const fn square(focal_length: f64) -> Self {
        Self {
            fx: focal_length,
            fy: focal_length,
        }
    }

    /// Returns `true` if both focal lengths are finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fx.is_finite() && self.fx > 0.0 && self.fy.is_finite() && self.fy > 0.0
    }

    /// Converts a pixel extent at `depth` meters into meters along x.
    #[must_use]
    pub fn pixels_to_meters_x(&self, pixels: f64, depth: f64) -> f64 {
        pixels * depth / self.fx
    }

    /// Converts a pixel extent at `depth` meters into meters along y.
    #[must_use]
    pub fn pixels_to_meters_y(&self, pixels: f64, depth: f64) -> f64 {
        pixels * depth / self.fy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsics_square() {
        let intr = CameraIntrinsics::square(500.0);
        assert!((intr.fx - 500.0).abs() < 1e-10);
        assert!((intr.fy - 500.0).abs() < 1e-10);
    }

    #[test]
    fn intrinsics_validity() {
        assert!(CameraIntrinsics::new(700.0, 650.0).is_valid());
        assert!(!CameraIntrinsics::new(-1.0, 650.0).is_valid());
        assert!(!CameraIntrinsics::new(700.0, 0.0).is_valid());
        assert!(!CameraIntrinsics::new(f64::NAN, 700.0).is_valid());
        assert!(!CameraIntrinsics::new(700.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn intrinsics_pixels_to_meters() {
        let intr = CameraIntrinsics::new(700.0, 350.0);
        assert!((intr.pixels_to_meters_x(100.0, 4.0) - 400.0 / 700.0).abs() < 1e-12);
        assert!((intr.pixels_to_meters_y(100.0, 4.0) - 400.0 / 350.0).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn camera_serialization() {
        let intr = CameraIntrinsics::square(500.0);
        let json = serde_json::to_string(&intr).unwrap();
        let parsed: CameraIntrinsics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, intr);
    }
}
