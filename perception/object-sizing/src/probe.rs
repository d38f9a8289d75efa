//! Point depth inspection for debugging a depth provider.

use std::fmt;

use sensor_types::{DepthMap, DepthStats};

/// Depth read at one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReading {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Valid depth in meters, if any.
    pub depth: Option<f32>,
}

impl fmt::Display for ProbeReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.depth {
            Some(d) => write!(f, "Depth at ({}, {}): {d:.2}m", self.x, self.y),
            None => write!(f, "Depth at ({}, {}): Invalid/Out of range", self.x, self.y),
        }
    }
}

/// Reads individual pixels of a borrowed depth map.
///
/// # Example
///
/// ```
/// use object_sizing::DepthProbe;
/// use sensor_types::DepthMap;
///
/// let map = DepthMap::filled(4, 4, 2.5).unwrap();
/// let probe = DepthProbe::new(&map);
///
/// assert_eq!(probe.probe(1, 2).to_string(), "Depth at (1, 2): 2.50m");
/// assert_eq!(probe.probe(9, 9).to_string(), "Depth at (9, 9): Invalid/Out of range");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DepthProbe<'a> {
    map: &'a DepthMap,
}

impl<'a> DepthProbe<'a> {
    /// Creates a probe over `map`.
    #[must_use]
    pub const fn new(map: &'a DepthMap) -> Self {
        Self { map }
    }

    /// Reads `(x, y)`. Out-of-range and invalid pixels read as `None`.
    #[must_use]
    pub fn probe(&self, x: u32, y: u32) -> ProbeReading {
        ProbeReading {
            x,
            y,
            depth: self.map.get_valid(x, y),
        }
    }

    /// Reads the image center.
    #[must_use]
    pub fn probe_center(&self) -> ProbeReading {
        let (x, y) = self.map.center();
        self.probe(x, y)
    }

    /// Min/max/mean over the valid pixels, for colormap normalization.
    ///
    /// `None` when the map has no valid pixel.
    #[must_use]
    pub fn summary(&self) -> Option<DepthStats> {
        self.map.depth_stats()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn probe_formats_valid_depth() {
        let map = DepthMap::from_fn(10, 10, |x, _| if x < 5 { f32::NAN } else { 1.234 }).unwrap();
        let probe = DepthProbe::new(&map);
        assert_eq!(probe.probe(7, 3).to_string(), "Depth at (7, 3): 1.23m");
        assert_eq!(probe.probe(2, 3).depth, None);
        assert_eq!(
            probe.probe(2, 3).to_string(),
            "Depth at (2, 3): Invalid/Out of range"
        );
    }

    #[test]
    fn probe_center_reads_middle() {
        let map = DepthMap::from_fn(6, 4, |x, y| if (x, y) == (3, 2) { 4.0 } else { 1.0 }).unwrap();
        let reading = DepthProbe::new(&map).probe_center();
        assert_eq!((reading.x, reading.y), (3, 2));
        assert_eq!(reading.depth, Some(4.0));
    }

    #[test]
    fn probe_summary() {
        let map = DepthMap::new(2, 2, vec![1.0, 3.0, f32::NAN, 2.0]).unwrap();
        let stats = DepthProbe::new(&map).summary().unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 2.0);

        let empty = DepthMap::filled(2, 2, 0.0).unwrap();
        assert!(DepthProbe::new(&empty).summary().is_none());
    }
}
