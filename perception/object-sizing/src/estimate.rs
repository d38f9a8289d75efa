//! Size estimate result types.

use serde::Serialize;

use crate::error::SizingError;

/// Which calculator produced a size estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMethod {
    /// Pinhole projection from one depth sample and the focal lengths.
    Projective,
    /// Median-theorem triangulation from edge and center depths.
    Triangulated,
    /// No size could be estimated.
    #[default]
    None,
}

/// Metric width, height and area of an object.
///
/// Absent values mean "could not be estimated". `area` is present exactly
/// when both `width` and `height` are, and then equals their product; the
/// constructors enforce this.
///
/// # Example
///
/// ```
/// use object_sizing::{SizeEstimate, SizingMethod};
///
/// let full = SizeEstimate::from_axes(Some(0.5), Some(0.2), SizingMethod::Projective);
/// assert!((full.area().unwrap() - 0.1).abs() < 1e-12);
///
/// let partial = SizeEstimate::from_axes(Some(0.5), None, SizingMethod::Triangulated);
/// assert_eq!(partial.area(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SizeEstimate {
    width: Option<f64>,
    height: Option<f64>,
    area: Option<f64>,
    method: SizingMethod,
}

impl SizeEstimate {
    /// An estimate with every field absent.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            width: None,
            height: None,
            area: None,
            method: SizingMethod::None,
        }
    }

    /// Builds an estimate from per-axis results, deriving the area.
    ///
    /// If both axes are absent the method collapses to
    /// [`SizingMethod::None`].
    #[must_use]
    pub fn from_axes(width: Option<f64>, height: Option<f64>, method: SizingMethod) -> Self {
        if width.is_none() && height.is_none() {
            return Self::none();
        }
        Self {
            width,
            height,
            area: width.zip(height).map(|(w, h)| w * h),
            method,
        }
    }

    /// Metric width in meters.
    #[must_use]
    pub const fn width(&self) -> Option<f64> {
        self.width
    }

    /// Metric height in meters.
    #[must_use]
    pub const fn height(&self) -> Option<f64> {
        self.height
    }

    /// Area in square meters.
    #[must_use]
    pub const fn area(&self) -> Option<f64> {
        self.area
    }

    /// Calculator that produced this estimate.
    #[must_use]
    pub const fn method(&self) -> SizingMethod {
        self.method
    }

    /// Returns `true` if width and height are both present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.area.is_some()
    }
}

/// Everything the dispatcher learned about one detection.
///
/// `distance` is the resolved center depth; `size` is populated only for
/// measurable classes. `degradations` lists the data-quality failures that
/// left fields absent, for the presentation layer to log.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectMeasurement {
    /// Distance to the object center in meters.
    pub distance: Option<f64>,
    /// Metric size estimate.
    pub size: SizeEstimate,
    /// Whether the class policy asked for a size.
    pub measurable: bool,
    /// Why fields are absent.
    #[serde(skip)]
    pub degradations: Vec<SizingError>,
}

impl ObjectMeasurement {
    /// Distance known, size not requested.
    #[must_use]
    pub const fn distance_only(distance: f64) -> Self {
        Self {
            distance: Some(distance),
            size: SizeEstimate::none(),
            measurable: false,
            degradations: Vec::new(),
        }
    }

    /// Nothing could be measured.
    #[must_use]
    pub const fn unknown(measurable: bool, degradations: Vec<SizingError>) -> Self {
        Self {
            distance: None,
            size: SizeEstimate::none(),
            measurable,
            degradations,
        }
    }

    /// Returns `true` if any size field is present.
    #[must_use]
    pub const fn has_size(&self) -> bool {
        self.size.width.is_some() || self.size.height.is_some()
    }
}
