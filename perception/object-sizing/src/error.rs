//! Error types for object sizing.
//!
//! Every variant except [`SizingError::MalformedBox`],
//! [`SizingError::Detection`] and [`SizingError::InvalidConfig`] describes
//! a *degraded result*: the corresponding output field is absent and
//! processing continues.

use std::fmt;

use ml_types::{BoundingBox, MlTypesError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pixel location at which a depth value is sought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Bounding-box center.
    Center,
    /// Midpoint of the left edge.
    Left,
    /// Midpoint of the right edge.
    Right,
    /// Midpoint of the top edge.
    Top,
    /// Midpoint of the bottom edge.
    Bottom,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// An image axis along which an extent is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Horizontal extent, measured between the left and right edges.
    Width,
    /// Vertical extent, measured between the top and bottom edges.
    Height,
}

impl Axis {
    /// The two opposite edge anchors that bound this axis.
    #[must_use]
    pub const fn edge_anchors(self) -> (Anchor, Anchor) {
        match self {
            Self::Width => (Anchor::Left, Anchor::Right),
            Self::Height => (Anchor::Top, Anchor::Bottom),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Width => "width",
            Self::Height => "height",
        })
    }
}

/// Errors and degradations produced while sizing an object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    /// No valid depth found within the search bounds of an anchor point.
    #[error("no depth data near {anchor} anchor")]
    NoDepthData {
        /// Anchor whose search came up empty.
        anchor: Anchor,
    },

    /// A focal length is non-positive or not finite.
    #[error("invalid intrinsics: fx={fx}, fy={fy}")]
    InvalidIntrinsics {
        /// Focal length along x.
        fx: f64,
        /// Focal length along y.
        fy: f64,
    },

    /// Projective sizing is enabled but the caller supplied no intrinsics.
    #[error("projective sizing requires camera intrinsics")]
    MissingIntrinsics,

    /// The median-theorem radicand went negative.
    #[error("unstable triangulation along {axis}: radicand {radicand}")]
    UnstableTriangulation {
        /// Axis whose estimate was rejected.
        axis: Axis,
        /// The offending value of `(a² + b²) / 2 - m²`.
        radicand: f64,
    },

    /// The bounding box has `x1 >= x2` or `y1 >= y2`.
    #[error("malformed bounding box ({x1}, {y1}, {x2}, {y2})")]
    MalformedBox {
        /// Left edge.
        x1: u32,
        /// Top edge.
        y1: u32,
        /// Right edge.
        x2: u32,
        /// Bottom edge.
        y2: u32,
    },

    /// Configuration rejected by validation or parsing.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The detection itself is unusable (e.g., confidence outside `[0, 1]`).
    #[error(transparent)]
    Detection(#[from] MlTypesError),
}

impl SizingError {
    /// Creates a no-depth-data error for an anchor.
    #[must_use]
    pub const fn no_depth(anchor: Anchor) -> Self {
        Self::NoDepthData { anchor }
    }

    /// Creates a malformed box error.
    #[must_use]
    pub const fn malformed(bbox: &BoundingBox) -> Self {
        Self::MalformedBox {
            x1: bbox.x1,
            y1: bbox.y1,
            x2: bbox.x2,
            y2: bbox.y2,
        }
    }

    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Returns `true` for expected, frequent data-quality outcomes.
    ///
    /// These degrade individual output fields. The remaining variants are
    /// caller contract violations.
    #[must_use]
    pub const fn is_data_quality(&self) -> bool {
        matches!(
            self,
            Self::NoDepthData { .. }
                | Self::InvalidIntrinsics { .. }
                | Self::MissingIntrinsics
                | Self::UnstableTriangulation { .. }
        )
    }
}

impl From<serde_json::Error> for SizingError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for sizing operations.
pub type Result<T> = std::result::Result<T, SizingError>;
