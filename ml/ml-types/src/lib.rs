//! Detection types consumed by depth-based object sizing.
//!
//! # Inference Types
//!
//! - [`BoundingBox`] - Integer pixel box `(x1, y1, x2, y2)`
//! - [`Detection`] - Box plus class label and confidence
//! - [`FrameDetections`] - All detections for one frame
//!
//! # Layer 0 Crate
//!
//! This crate does not run a detector. It only describes detector output in
//! a form the sizing geometry can consume, so any model backend can feed it.
//!
//! # Example
//!
//! ```
//! use ml_types::{BoundingBox, Detection};
//!
//! let det = Detection::new(BoundingBox::new(10, 10, 30, 30), "rocks", 0.92);
//! assert!(det.bbox.is_well_formed());
//! assert_eq!(det.bbox.center(), (20, 20));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bbox;
mod detection;
mod error;

pub use bbox::BoundingBox;
pub use detection::{Detection, FrameDetections};
pub use error::{MlTypesError, Result};
