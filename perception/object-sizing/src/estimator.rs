//! Estimation dispatcher.
//!
//! Resolves a detection's center depth, consults the class policy, runs the
//! configured calculators and assembles an [`ObjectMeasurement`].

use ml_types::{BoundingBox, Detection, FrameDetections};
use rayon::prelude::*;
use sensor_types::{CameraIntrinsics, DepthMap};
use tracing::{debug, warn};

use crate::config::{CenterDepthMode, SizingConfig};
use crate::error::{Anchor, Result, SizingError};
use crate::estimate::{ObjectMeasurement, SizeEstimate, SizingMethod};
use crate::policy::{ClassPolicy, MeasurableClasses};
use crate::projective::projective_size;
use crate::sampler::{DepthSample, box_mean_depth, resolve_center};
use crate::triangulated::{AxisExtents, triangulated_size};

/// Estimates distance and metric size for detections.
///
/// Holds only immutable configuration, so one estimator can serve any
/// number of frames and threads.
///
/// # Example
///
/// ```
/// use ml_types::{BoundingBox, Detection};
/// use object_sizing::{MeasurableClasses, SizeEstimator, SizingConfig, SizingMethod};
/// use sensor_types::{CameraIntrinsics, DepthMap};
///
/// let config = SizingConfig::projective_only()
///     .with_measurable_classes(MeasurableClasses::rocks());
/// let estimator = SizeEstimator::new(config).unwrap();
///
/// let depth = DepthMap::filled(200, 100, 4.0).unwrap();
/// let det = Detection::new(BoundingBox::new(50, 25, 150, 75), "stone", 0.9);
///
/// let m = estimator
///     .estimate(&det, &depth, Some(&CameraIntrinsics::square(700.0)))
///     .unwrap();
///
/// assert_eq!(m.distance, Some(4.0));
/// assert_eq!(m.size.method(), SizingMethod::Projective);
/// assert!((m.size.width().unwrap() - 0.571).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct SizeEstimator<P = MeasurableClasses> {
    config: SizingConfig,
    policy: P,
}

impl SizeEstimator<MeasurableClasses> {
    /// Creates an estimator whose policy is `config.measurable_classes`.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidConfig`] if the config fails validation.
    pub fn new(config: SizingConfig) -> Result<Self> {
        let policy = config.measurable_classes.clone();
        Self::with_policy(config, policy)
    }
}

impl<P: ClassPolicy> SizeEstimator<P> {
    /// Creates an estimator with a custom class policy.
    ///
    /// `config.measurable_classes` is ignored; `policy` decides.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidConfig`] if the config fails validation.
    pub fn with_policy(config: SizingConfig, policy: P) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, policy })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// The active class policy.
    #[must_use]
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// Estimates distance and, for measurable classes, metric size.
    ///
    /// Missing depth, bad intrinsics and unstable triangulation degrade
    /// individual fields and are listed in
    /// [`ObjectMeasurement::degradations`].
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::MalformedBox`] if `x1 >= x2` or `y1 >= y2`,
    /// and [`SizingError::Detection`] if the confidence lies outside
    /// `[0, 1]`. Both are caller contract violations and are logged as
    /// warnings.
    pub fn estimate(
        &self,
        detection: &Detection,
        depth_map: &DepthMap,
        intrinsics: Option<&CameraIntrinsics>,
    ) -> Result<ObjectMeasurement> {
        let bbox = &detection.bbox;
        if !bbox.is_well_formed() {
            let err = SizingError::malformed(bbox);
            warn!(
                label = %detection.class_label,
                x1 = bbox.x1,
                y1 = bbox.y1,
                x2 = bbox.x2,
                y2 = bbox.y2,
                "Skipping detection with malformed bounding box"
            );
            return Err(err);
        }
        if let Err(err) = detection.validate_confidence() {
            warn!(
                label = %detection.class_label,
                confidence = detection.confidence,
                "Skipping detection with out-of-range confidence"
            );
            return Err(err.into());
        }

        let window = self.config.search;
        let measurable = self.policy.is_measurable(&detection.class_label);

        let nearest = resolve_center(depth_map, bbox, window);
        let distance_sample = match self.config.center_depth {
            CenterDepthMode::NearestValid => nearest,
            CenterDepthMode::BoxMean => box_mean_depth(depth_map, bbox),
        };

        let Some(distance) = distance_sample.value().map(f64::from) else {
            debug!(label = %detection.class_label, "No center depth, distance and size unknown");
            return Ok(ObjectMeasurement::unknown(
                measurable,
                vec![SizingError::no_depth(Anchor::Center)],
            ));
        };

        if !measurable {
            return Ok(ObjectMeasurement::distance_only(distance));
        }

        let mut degradations = Vec::new();
        let triangulated = self
            .config
            .use_triangulated
            .then(|| triangulated_size(depth_map, bbox, nearest, window));
        let project = self
            .config
            .use_projective
            .then_some(|| projective(bbox, distance_sample, intrinsics));

        let size = select(triangulated, project, &mut degradations);

        if !degradations.is_empty() {
            debug!(
                label = %detection.class_label,
                method = ?size.method(),
                issues = degradations.len(),
                "Size estimate degraded"
            );
        }

        Ok(ObjectMeasurement {
            distance: Some(distance),
            size,
            measurable: true,
            degradations,
        })
    }
}

fn projective(
    bbox: &BoundingBox,
    depth: DepthSample,
    intrinsics: Option<&CameraIntrinsics>,
) -> Result<(f64, f64)> {
    let intrinsics = intrinsics.ok_or(SizingError::MissingIntrinsics)?;
    projective_size(bbox, depth, intrinsics)
}

/// Picks the estimate to report from whichever calculators ran.
///
/// Preference: complete triangulation, then projective, then partial
/// triangulation, then nothing. Every failure is recorded. Projective
/// sizing only runs when triangulation did not complete.
fn select(
    triangulated: Option<AxisExtents>,
    projective: Option<impl FnOnce() -> Result<(f64, f64)>>,
    degradations: &mut Vec<SizingError>,
) -> SizeEstimate {
    let mut partial = None;

    if let Some(extents) = triangulated {
        if extents.is_complete() {
            return SizeEstimate::from_axes(
                extents.width.ok(),
                extents.height.ok(),
                SizingMethod::Triangulated,
            );
        }
        let any = extents.is_partial();
        let width = keep_ok(extents.width, degradations);
        let height = keep_ok(extents.height, degradations);
        if any {
            partial = Some(SizeEstimate::from_axes(width, height, SizingMethod::Triangulated));
        }
    }

    match projective.map(|size| size()) {
        Some(Ok((width, height))) => {
            return SizeEstimate::from_axes(Some(width), Some(height), SizingMethod::Projective);
        }
        Some(Err(err)) => degradations.push(err),
        None => {}
    }

    partial.unwrap_or_else(SizeEstimate::none)
}

fn keep_ok<T>(result: Result<T>, degradations: &mut Vec<SizingError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            degradations.push(err);
            None
        }
    }
}

/// What happened to one detection of a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    /// Estimation ran; fields may still be absent.
    Measured(ObjectMeasurement),
    /// The detection violated the input contract.
    Rejected(SizingError),
    /// Below the confidence gate; not evaluated.
    Skipped {
        /// The detection's confidence.
        confidence: f32,
    },
}

impl DetectionOutcome {
    /// The measurement, if estimation ran.
    #[must_use]
    pub const fn measurement(&self) -> Option<&ObjectMeasurement> {
        match self {
            Self::Measured(m) => Some(m),
            Self::Rejected(_) | Self::Skipped { .. } => None,
        }
    }
}

/// Per-detection outcomes for one frame, in detector order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameMeasurements {
    /// Frame ID the detections came from.
    pub frame_id: u64,
    /// One outcome per input detection.
    pub outcomes: Vec<DetectionOutcome>,
}

impl FrameMeasurements {
    /// Detections with at least one size field.
    #[must_use]
    pub fn measured_count(&self) -> usize {
        self.measurements().filter(|m| m.has_size()).count()
    }

    /// Detections with a distance but no size.
    #[must_use]
    pub fn distance_only_count(&self) -> usize {
        self.measurements()
            .filter(|m| m.distance.is_some() && !m.has_size())
            .count()
    }

    /// Detections rejected for contract violations.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DetectionOutcome::Rejected(_)))
            .count()
    }

    /// Detections skipped by the confidence gate.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DetectionOutcome::Skipped { .. }))
            .count()
    }

    /// Iterates over the measurements that ran.
    pub fn measurements(&self) -> impl Iterator<Item = &ObjectMeasurement> {
        self.outcomes.iter().filter_map(DetectionOutcome::measurement)
    }
}

impl<P: ClassPolicy + Sync> SizeEstimator<P> {
    /// Estimates every detection of a frame independently.
    ///
    /// A failure on one detection never affects the others. Runs in
    /// parallel when `config.parallel` is set; output order always matches
    /// input order.
    pub fn estimate_frame(
        &self,
        frame: &FrameDetections,
        depth_map: &DepthMap,
        intrinsics: Option<&CameraIntrinsics>,
    ) -> FrameMeasurements {
        debug!(
            frame_id = frame.frame_id,
            detections = frame.detection_count(),
            valid_depth = depth_map.valid_fraction(),
            "Estimating frame"
        );

        let one = |detection: &Detection| self.outcome(detection, depth_map, intrinsics);
        let outcomes: Vec<DetectionOutcome> = if self.config.parallel {
            frame.detections.par_iter().map(one).collect()
        } else {
            frame.detections.iter().map(one).collect()
        };

        let result = FrameMeasurements {
            frame_id: frame.frame_id,
            outcomes,
        };

        debug!(
            frame_id = frame.frame_id,
            measured = result.measured_count(),
            distance_only = result.distance_only_count(),
            rejected = result.rejected_count(),
            skipped = result.skipped_count(),
            "Frame estimated"
        );

        result
    }

    fn outcome(
        &self,
        detection: &Detection,
        depth_map: &DepthMap,
        intrinsics: Option<&CameraIntrinsics>,
    ) -> DetectionOutcome {
        // Out-of-range confidences fall through to `estimate`, which rejects them.
        if detection.validate_confidence().is_ok()
            && self
                .config
                .min_confidence
                .is_some_and(|threshold| detection.confidence < threshold)
        {
            return DetectionOutcome::Skipped {
                confidence: detection.confidence,
            };
        }
        match self.estimate(detection, depth_map, intrinsics) {
            Ok(m) => DetectionOutcome::Measured(m),
            Err(err) => DetectionOutcome::Rejected(err),
        }
    }
}
