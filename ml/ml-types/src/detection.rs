//! Detection types.

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, MlTypesError};

/// One detected object instance.
///
/// Produced by an external detector and consumed read-only.
///
/// # Example
///
/// ```
/// use ml_types::{BoundingBox, Detection};
///
/// let det = Detection::new(BoundingBox::new(10, 10, 30, 30), "stone", 0.87);
/// assert_eq!(det.class_label, "stone");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Pixel-space bounding box.
    pub bbox: BoundingBox,
    /// Class label as reported by the detector.
    pub class_label: String,
    /// Confidence score in `[0, 1]`.
    pub confidence: f32,
}

impl Detection {
    /// Creates a new detection.
    #[must_use]
    pub fn new(bbox: BoundingBox, class_label: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox,
            class_label: class_label.into(),
            confidence,
        }
    }

    /// Checks the confidence lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`MlTypesError::InvalidConfidence`] otherwise.
    pub fn validate_confidence(&self) -> Result<(), MlTypesError> {
        if (0.0..=1.0).contains(&self.confidence) {
            Ok(())
        } else {
            Err(MlTypesError::invalid_confidence(self.confidence))
        }
    }
}

/// All detections produced for one frame.
///
/// # Example
///
/// ```
/// use ml_types::{BoundingBox, Detection, FrameDetections};
///
/// let frame = FrameDetections::new(
///     42,
///     vec![
///         Detection::new(BoundingBox::new(0, 0, 10, 10), "rocks", 0.9),
///         Detection::new(BoundingBox::new(20, 20, 40, 40), "person", 0.2),
///     ],
/// );
///
/// assert_eq!(frame.detection_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDetections {
    /// Frame ID this result corresponds to.
    pub frame_id: u64,
    /// Detections in detector output order.
    pub detections: Vec<Detection>,
}

impl FrameDetections {
    /// Creates a frame's detections.
    #[must_use]
    pub const fn new(frame_id: u64, detections: Vec<Detection>) -> Self {
        Self {
            frame_id,
            detections,
        }
    }

    /// Returns the number of detections.
    #[must_use]
    pub fn detection_count(&self) -> usize {
        self.detections.len()
    }
}
