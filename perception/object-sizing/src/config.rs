//! Sizing configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SizingError};
use crate::policy::MeasurableClasses;
use crate::sampler::SearchWindow;

/// How the center (distance) depth of a detection is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterDepthMode {
    /// Center pixel if valid, else the nearest valid pixel found by the
    /// expanding search.
    #[default]
    NearestValid,
    /// Mean of all valid depths inside the box.
    BoxMean,
}

/// Configuration for a [`SizeEstimator`](crate::SizeEstimator).
///
/// # Example
///
/// ```
/// use object_sizing::{MeasurableClasses, SearchWindow, SizingConfig};
///
/// let config = SizingConfig::default()
///     .with_measurable_classes(MeasurableClasses::rocks())
///     .with_search(SearchWindow::new(3, 8))
///     .with_min_confidence(0.35);
///
/// assert!(config.validate().is_ok());
/// assert!(config.use_triangulated);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Labels for which a metric size is estimated.
    pub measurable_classes: MeasurableClasses,

    /// Attempt pinhole-projection sizing (needs intrinsics).
    pub use_projective: bool,

    /// Attempt median-theorem sizing (needs four edge samples).
    pub use_triangulated: bool,

    /// Expanding-ring search bounds for every anchor.
    pub search: SearchWindow,

    /// How the center depth is resolved.
    pub center_depth: CenterDepthMode,

    /// Detections below this confidence are skipped by frame processing.
    pub min_confidence: Option<f32>,

    /// Process a frame's detections in parallel.
    pub parallel: bool,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            measurable_classes: MeasurableClasses::default(),
            use_projective: true,
            use_triangulated: true,
            search: SearchWindow::default(),
            center_depth: CenterDepthMode::default(),
            min_confidence: None,
            parallel: true,
        }
    }
}

impl SizingConfig {
    /// Config that only runs the projective calculator.
    #[must_use]
    pub fn projective_only() -> Self {
        Self {
            use_triangulated: false,
            ..Self::default()
        }
    }

    /// Config that only runs the triangulated calculator.
    #[must_use]
    pub fn triangulated_only() -> Self {
        Self {
            use_projective: false,
            ..Self::default()
        }
    }

    /// Sets the measurable classes.
    #[must_use]
    pub fn with_measurable_classes(mut self, classes: MeasurableClasses) -> Self {
        self.measurable_classes = classes;
        self
    }

    /// Sets the search window.
    #[must_use]
    pub const fn with_search(mut self, search: SearchWindow) -> Self {
        self.search = search;
        self
    }

    /// Sets the center depth mode.
    #[must_use]
    pub const fn with_center_depth(mut self, mode: CenterDepthMode) -> Self {
        self.center_depth = mode;
        self
    }

    /// Sets the confidence gate.
    #[must_use]
    pub const fn with_min_confidence(mut self, threshold: f32) -> Self {
        self.min_confidence = Some(threshold);
        self
    }

    /// Disables parallel frame processing.
    #[must_use]
    pub const fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidConfig`] for a zero search step, zero
    /// search attempts, a search radius above [`SearchWindow::MAX_RADIUS`],
    /// a confidence gate outside `[0, 1]`, or both calculators disabled.
    pub fn validate(&self) -> Result<()> {
        if self.search.step == 0 {
            return Err(SizingError::invalid_config("search step must be positive"));
        }
        if self.search.max_attempts == 0 {
            return Err(SizingError::invalid_config(
                "search max_attempts must be positive",
            ));
        }
        if self.search.max_radius() > SearchWindow::MAX_RADIUS {
            return Err(SizingError::invalid_config(format!(
                "search radius {} exceeds {}",
                self.search.max_radius(),
                SearchWindow::MAX_RADIUS
            )));
        }
        if let Some(threshold) = self
            .min_confidence
            .filter(|threshold| !(0.0..=1.0).contains(threshold))
        {
            return Err(SizingError::invalid_config(format!(
                "min_confidence {threshold} outside [0, 1]"
            )));
        }
        if !self.use_projective && !self.use_triangulated {
            return Err(SizingError::invalid_config(
                "at least one of use_projective, use_triangulated must be set",
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidConfig`] if the JSON is malformed or
    /// the result fails [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if let Err(err) = config.validate() {
            warn!(error = %err, "Rejected sizing config");
            return Err(err);
        }
        Ok(config)
    }

    /// Serializes the configuration to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidConfig`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::policy::ClassPolicy;

    #[test]
    fn config_defaults() {
        let config = SizingConfig::default();
        assert!(config.use_projective);
        assert!(config.use_triangulated);
        assert!(config.measurable_classes.is_empty());
        assert_eq!(config.search, SearchWindow::new(2, 10));
        assert_eq!(config.center_depth, CenterDepthMode::NearestValid);
        assert_eq!(config.min_confidence, None);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_presets() {
        let p = SizingConfig::projective_only();
        assert!(p.use_projective && !p.use_triangulated);
        let t = SizingConfig::triangulated_only();
        assert!(!t.use_projective && t.use_triangulated);
        assert!(!SizingConfig::default().sequential().parallel);
    }

    #[test]
    fn config_rejects_degenerate_search() {
        let config = SizingConfig::default().with_search(SearchWindow::new(0, 10));
        assert!(matches!(config.validate(), Err(SizingError::InvalidConfig(_))));

        let config = SizingConfig::default().with_search(SearchWindow::new(2, 0));
        assert!(config.validate().is_err());

        let config = SizingConfig::default().with_search(SearchWindow::new(65_536, 65_536));
        assert!(matches!(config.validate(), Err(SizingError::InvalidConfig(_))));

        let widest = SearchWindow::new(2, 512);
        assert_eq!(widest.max_radius(), SearchWindow::MAX_RADIUS);
        assert!(SizingConfig::default().with_search(widest).validate().is_ok());
        let config = SizingConfig::default().with_search(SearchWindow::new(2, 513));
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_rejects_bad_confidence() {
        assert!(SizingConfig::default().with_min_confidence(1.5).validate().is_err());
        assert!(SizingConfig::default().with_min_confidence(-0.1).validate().is_err());
        assert!(SizingConfig::default().with_min_confidence(f32::NAN).validate().is_err());
        assert!(SizingConfig::default().with_min_confidence(0.35).validate().is_ok());
    }

    #[test]
    fn config_rejects_no_calculator() {
        let config = SizingConfig {
            use_projective: false,
            use_triangulated: false,
            ..SizingConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn config_from_partial_json() {
        let config = SizingConfig::from_json(
            r#"{
                "measurable_classes": ["rocks", "stone"],
                "use_projective": false,
                "center_depth": "box_mean",
                "search": { "step": 3, "max_attempts": 5 }
            }"#,
        )
        .unwrap();

        assert!(config.measurable_classes.is_measurable("stone"));
        assert!(!config.use_projective);
        assert!(config.use_triangulated);
        assert_eq!(config.center_depth, CenterDepthMode::BoxMean);
        assert_eq!(config.search.max_radius(), 15);
    }

    #[test]
    fn config_from_json_validates() {
        let err = SizingConfig::from_json(r#"{ "search": { "step": 0, "max_attempts": 5 } }"#);
        assert!(matches!(err, Err(SizingError::InvalidConfig(_))));

        let err = SizingConfig::from_json("{ not json");
        assert!(matches!(err, Err(SizingError::InvalidConfig(_))));
    }

    #[test]
    fn config_json_roundtrip() {
        let config = SizingConfig::triangulated_only()
            .with_measurable_classes(MeasurableClasses::rocks())
            .with_min_confidence(0.35);
        let json = config.to_json().unwrap();
        assert_eq!(SizingConfig::from_json(&json).unwrap(), config);
    }
}
