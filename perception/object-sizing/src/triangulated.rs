//! Median-theorem sizing.
//!
//! Treats the camera as the apex of a triangle whose other two vertices are
//! the 3D points behind two opposite edge midpoints of the box. The edge
//! depths `a` and `b` are two sides; the center depth `m` approximates the
//! median from the apex. The median-length identity
//!
//! ```text
//! m² = (2a² + 2b² - c²) / 4
//! ```
//!
//! solved for the third side gives the real-world extent
//!
//! ```text
//! c = 2 * sqrt((a² + b²) / 2 - m²)
//! ```
//!
//! No focal length is needed, at the cost of sensitivity to depth noise at
//! the three anchors. A negative radicand means the readings are mutually
//! inconsistent and the axis is reported absent.

use ml_types::BoundingBox;
use sensor_types::DepthMap;

use crate::error::{Anchor, Axis, Result, SizingError};
use crate::sampler::{DepthSample, SearchWindow, sample};

/// Side length opposite the apex, from two sides and the median.
///
/// Returns `None` when the radicand is negative or the result is not finite.
///
/// # Example
///
/// ```
/// use object_sizing::median_extent;
///
/// let c = median_extent(3.0, 3.2, 3.05).unwrap();
/// assert!((c - 1.127).abs() < 1e-3);
///
/// assert!(median_extent(1.0, 1.0, 2.0).is_none());
/// ```
#[must_use]
pub fn median_extent(a: f64, b: f64, m: f64) -> Option<f64> {
    let radicand = median_radicand(a, b, m);
    if radicand >= 0.0 && radicand.is_finite() {
        Some(2.0 * radicand.sqrt())
    } else {
        None
    }
}

fn median_radicand(a: f64, b: f64, m: f64) -> f64 {
    a.mul_add(a, b * b) / 2.0 - m * m
}

/// Extent along one axis from three depth samples.
///
/// `edge_a`/`edge_b` are the left/right (width) or top/bottom (height)
/// samples; `center` is the median sample.
///
/// # Errors
///
/// - [`SizingError::NoDepthData`] naming the first invalid anchor
/// - [`SizingError::UnstableTriangulation`] if the radicand is negative
pub fn triangulated_extent(
    edge_a: DepthSample,
    edge_b: DepthSample,
    center: DepthSample,
    axis: Axis,
) -> Result<f64> {
    let (anchor_a, anchor_b) = axis.edge_anchors();
    let a = edge_a.value().ok_or(SizingError::no_depth(anchor_a))?;
    let b = edge_b.value().ok_or(SizingError::no_depth(anchor_b))?;
    let m = center.value().ok_or(SizingError::no_depth(Anchor::Center))?;

    let (a, b, m) = (f64::from(a), f64::from(b), f64::from(m));
    median_extent(a, b, m).ok_or_else(|| SizingError::UnstableTriangulation {
        axis,
        radicand: median_radicand(a, b, m),
    })
}

/// Per-axis outcome of triangulated sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisExtents {
    /// Width result.
    pub width: Result<f64>,
    /// Height result.
    pub height: Result<f64>,
}

impl AxisExtents {
    /// Returns `true` if both axes succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.width.is_ok() && self.height.is_ok()
    }

    /// Returns `true` if at least one axis succeeded.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.width.is_ok() || self.height.is_ok()
    }
}

/// Samples the four edge midpoints of `bbox` and triangulates both axes.
///
/// `center` is the already-resolved center sample; it is shared by both
/// axes rather than searched for again.
#[must_use]
pub fn triangulated_size(
    depth_map: &DepthMap,
    bbox: &BoundingBox,
    center: DepthSample,
    window: SearchWindow,
) -> AxisExtents {
    let at = |(x, y): (u32, u32)| sample(depth_map, x, y, bbox, window);

    let width = triangulated_extent(at(bbox.left_mid()), at(bbox.right_mid()), center, Axis::Width);
    let height = triangulated_extent(at(bbox.top_mid()), at(bbox.bottom_mid()), center, Axis::Height);

    AxisExtents { width, height }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn at(depth: f32) -> DepthSample {
        DepthSample::Valid {
            depth,
            pixel: [0, 0],
        }
    }

    #[test]
    fn median_extent_known_values() {
        let c = median_extent(3.0, 3.2, 3.05).unwrap();
        assert_relative_eq!(c, 2.0 * 0.3175f64.sqrt(), epsilon = 1e-12);

        // Equal sides, median equal to the sides: degenerate zero extent.
        assert_relative_eq!(median_extent(2.0, 2.0, 2.0).unwrap(), 0.0);

        // Right isoceles triangle with legs 1: hypotenuse sqrt(2), median
        // to hypotenuse sqrt(2)/2.
        let c = median_extent(1.0, 1.0, 2f64.sqrt() / 2.0).unwrap();
        assert_relative_eq!(c, 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn median_extent_negative_radicand() {
        assert!(median_extent(1.0, 1.0, 1.5).is_none());
        assert!(median_extent(f64::NAN, 1.0, 0.5).is_none());
    }

    #[test]
    fn triangulated_extent_scenario() {
        let c = triangulated_extent(at(3.0), at(3.2), at(3.05), Axis::Width).unwrap();
        assert_relative_eq!(c, 1.127, epsilon = 1e-3);
    }

    #[test]
    fn triangulated_extent_names_missing_anchor() {
        let err = triangulated_extent(at(1.0), DepthSample::Invalid, at(1.0), Axis::Width);
        assert_eq!(err, Err(SizingError::no_depth(Anchor::Right)));

        let err = triangulated_extent(DepthSample::Invalid, at(1.0), at(1.0), Axis::Height);
        assert_eq!(err, Err(SizingError::no_depth(Anchor::Top)));

        let err = triangulated_extent(at(1.0), at(1.0), DepthSample::Invalid, Axis::Height);
        assert_eq!(err, Err(SizingError::no_depth(Anchor::Center)));
    }

    #[test]
    fn triangulated_extent_unstable() {
        let err = triangulated_extent(at(1.0), at(1.0), at(1.5), Axis::Height).unwrap_err();
        match err {
            SizingError::UnstableTriangulation { axis, radicand } => {
                assert_eq!(axis, Axis::Height);
                assert_relative_eq!(radicand, 1.0 - 2.25);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn triangulated_size_samples_edges() {
        // Depth grows with distance from the center column, like a surface
        // seen obliquely; rows are constant.
        #[allow(clippy::cast_possible_truncation)]
        let map = DepthMap::from_fn(41, 41, |x, _| {
            let dx = f64::from(x) - 20.0;
            (4.0 + dx * dx / 400.0) as f32
        })
        .unwrap();
        let bbox = BoundingBox::new(10, 10, 30, 30);
        let center = DepthSample::Valid {
            depth: 4.0,
            pixel: [20, 20],
        };

        let extents = triangulated_size(&map, &bbox, center, SearchWindow::default());

        // First ring hits: (10, 18) for the left edge at depth 4.25, and
        // (28, 18) for the right edge at depth 4.16.
        let expected_width = median_extent(4.25, 4.16, 4.0).unwrap();
        assert_relative_eq!(*extents.width.as_ref().unwrap(), expected_width, epsilon = 1e-5);

        // Top and bottom searches both land first on x = 18, depth 4.01.
        let expected_height = median_extent(4.01, 4.01, 4.0).unwrap();
        assert_relative_eq!(*extents.height.as_ref().unwrap(), expected_height, epsilon = 1e-3);

        assert!(extents.is_complete());
    }

    #[test]
    fn triangulated_size_partial() {
        // Only the left half of the box has depth.
        let map = DepthMap::from_fn(41, 41, |x, _| if x <= 20 { 4.0 } else { f32::NAN }).unwrap();
        let bbox = BoundingBox::new(10, 10, 30, 30);
        let center = DepthSample::Valid {
            depth: 4.0,
            pixel: [20, 20],
        };

        // Radius 6 cannot reach from the right edge (x = 30) into x <= 20.
        let extents = triangulated_size(&map, &bbox, center, SearchWindow::new(2, 3));
        assert_eq!(extents.width, Err(SizingError::no_depth(Anchor::Right)));
        assert!(extents.height.is_ok());
        assert!(extents.is_partial());
        assert!(!extents.is_complete());
    }
}
