//! Sensor data types for depth-based object sizing.
//!
//! This crate provides the raw inputs delivered by a depth provider
//! (a stereo or depth camera driver):
//!
//! - [`DepthMap`] - Per-pixel metric depth, co-registered with the color image
//! - [`DepthStats`] - Min/max/mean over the valid pixels of a map
//! - [`CameraIntrinsics`] - Pinhole focal lengths in pixel units
//!
//! # Layer 0 Crate
//!
//! Pure data types with no I/O. Sensor lifecycles (opening the camera,
//! grabbing frames) belong to the driver, not here.
//!
//! # Design Philosophy
//!
//! These are **raw sensor types**. Detection types (`BoundingBox`,
//! `Detection`) belong in `ml-types`, and the geometry that combines the
//! two lives in `object-sizing`.
//!
//! # Example
//!
//! ```
//! use sensor_types::{CameraIntrinsics, DepthMap};
//!
//! let depth = DepthMap::from_fn(64, 48, |x, _| if x < 8 { f32::NAN } else { 2.0 }).unwrap();
//! let intrinsics = CameraIntrinsics::square(700.0);
//!
//! assert_eq!(depth.get_valid(4, 4), None);
//! assert_eq!(depth.get_valid(32, 24), Some(2.0));
//! assert!(intrinsics.is_valid());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod camera;
mod depth;
mod error;

pub use camera::CameraIntrinsics;
pub use depth::{DepthMap, DepthStats};
pub use error::SensorError;

/// Result type for sensor operations.
pub type Result<T> = std::result::Result<T, SensorError>;
