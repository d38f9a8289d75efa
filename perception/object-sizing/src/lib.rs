//! Metric distance and size of detected objects from depth.
//!
//! Given a pixel [`BoundingBox`](ml_types::BoundingBox) from an object
//! detector and a co-registered [`DepthMap`](sensor_types::DepthMap), this
//! crate estimates how far away the object is and, for measurable classes,
//! its real-world width, height and area.
//!
//! # Depth Sampling
//!
//! - [`sample`] - Expanding-ring search for a valid depth near an anchor
//! - [`resolve_center`] - Direct center lookup with search fallback
//! - [`box_mean_depth`] - Mean of all valid depths inside a box
//! - [`SearchWindow`] - Ring step and attempt bounds
//!
//! # Dimension Calculators
//!
//! - [`projective_size`] - Pinhole projection, needs focal lengths
//! - [`triangulated_size`] - Median-theorem triangulation from edge depths
//!
//! # Estimation
//!
//! - [`SizeEstimator`] - Selects and combines the calculators per detection
//! - [`SizingConfig`] - Calculators, search bounds, confidence gate
//! - [`ClassPolicy`] - Which labels get a size
//!
//! # Layer 0 Crate
//!
//! No I/O, no global state and no GUI. Rendering, camera lifecycles and
//! detector inference belong to the caller. Nothing here installs a
//! `tracing` subscriber.
//!
//! # Example
//!
//! ```
//! use ml_types::{BoundingBox, Detection};
//! use object_sizing::{SizeEstimator, SizingConfig};
//! use sensor_types::{CameraIntrinsics, DepthMap};
//!
//! let estimator = SizeEstimator::new(SizingConfig::default()).unwrap();
//!
//! // Everything missing except the center pixel.
//! let depth = DepthMap::from_fn(40, 40, |x, y| if (x, y) == (20, 20) { 2.5 } else { f32::NAN })
//!     .unwrap();
//! let det = Detection::new(BoundingBox::new(10, 10, 30, 30), "person", 0.8);
//!
//! let m = estimator
//!     .estimate(&det, &depth, Some(&CameraIntrinsics::square(700.0)))
//!     .unwrap();
//! assert_eq!(m.distance, Some(2.5));
//! assert!(!m.has_size());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod estimate;
mod estimator;
mod policy;
mod probe;
mod projective;
mod sampler;
mod triangulated;

// Re-export sampling
pub use sampler::{DepthSample, SearchWindow, box_mean_depth, resolve_center, sample};

// Re-export calculators
pub use projective::projective_size;
pub use triangulated::{AxisExtents, median_extent, triangulated_extent, triangulated_size};

// Re-export estimation types
pub use config::{CenterDepthMode, SizingConfig};
pub use estimate::{ObjectMeasurement, SizeEstimate, SizingMethod};
pub use estimator::{DetectionOutcome, FrameMeasurements, SizeEstimator};
pub use policy::{ClassPolicy, MeasurableClasses};

// Re-export diagnostics
pub use probe::{DepthProbe, ProbeReading};

// Re-export error types
pub use error::{Anchor, Axis, Result, SizingError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ClassPolicy, DepthSample, MeasurableClasses, ObjectMeasurement, SearchWindow,
        SizeEstimate, SizeEstimator, SizingConfig, SizingError, SizingMethod,
    };
}
