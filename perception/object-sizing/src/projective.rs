//! Pinhole-projection sizing.
//!
//! Converts the pixel extent of a box into meters using one depth reading
//! and the camera focal lengths:
//!
//! ```text
//! real_width  = pixel_width  * depth / fx
//! real_height = pixel_height * depth / fy
//! ```
//!
//! This assumes the object is a plane facing the camera at the sampled
//! depth. It is cheap and stable but biased for tilted or deep objects.

use ml_types::BoundingBox;
use sensor_types::CameraIntrinsics;

use crate::error::{Anchor, Result, SizingError};
use crate::sampler::DepthSample;

/// Metric `(width, height)` of `bbox` at the sampled depth.
///
/// # Errors
///
/// - [`SizingError::MalformedBox`] if `x1 >= x2` or `y1 >= y2`
/// - [`SizingError::InvalidIntrinsics`] if a focal length is not positive
/// - [`SizingError::NoDepthData`] if `depth` is invalid
///
/// # Example
///
/// ```
/// use ml_types::BoundingBox;
/// use object_sizing::{DepthSample, projective_size};
/// use sensor_types::CameraIntrinsics;
///
/// let bbox = BoundingBox::new(0, 0, 100, 50);
/// let depth = DepthSample::Valid { depth: 4.0, pixel: [50, 25] };
/// let (w, h) = projective_size(&bbox, depth, &CameraIntrinsics::square(700.0)).unwrap();
///
/// assert!((w - 0.571).abs() < 1e-3);
/// assert!((h - 0.286).abs() < 1e-3);
/// ```
pub fn projective_size(
    bbox: &BoundingBox,
    depth: DepthSample,
    intrinsics: &CameraIntrinsics,
) -> Result<(f64, f64)> {
    if !bbox.is_well_formed() {
        return Err(SizingError::malformed(bbox));
    }
    if !intrinsics.is_valid() {
        return Err(SizingError::InvalidIntrinsics {
            fx: intrinsics.fx,
            fy: intrinsics.fy,
        });
    }
    let depth = depth
        .value()
        .map(f64::from)
        .ok_or(SizingError::no_depth(Anchor::Center))?;

    let width = intrinsics.pixels_to_meters_x(f64::from(bbox.pixel_width()), depth);
    let height = intrinsics.pixels_to_meters_y(f64::from(bbox.pixel_height()), depth);
    Ok((width, height))
}
