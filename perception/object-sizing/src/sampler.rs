//! Depth sampling around anchor points.
//!
//! Depth maps are sparse and noisy near object boundaries, so a single
//! lookup at an edge midpoint often lands on a missing reading. The sampler
//! searches outward from the anchor in growing square rings, restricted to
//! the object's bounding box, and returns the first valid reading.
//!
//! # Scan Order
//!
//! Ring `k` (1-based) has radius `k * step`. Offsets are visited row-major:
//! `dy` ascending in the outer loop, `dx` ascending in the inner loop. Ring 1
//! covers the full filled square; later rings visit only the cells the
//! previous ring did not cover. Re-scanning the inner square would only
//! revisit cells already known to be invalid, so the first hit is the same
//! either way.
//!
//! Only the part of each ring that overlaps the eligible region (the box
//! clipped to the image) is visited, and the search stops early once a ring
//! covers that whole region. Oversized windows therefore cost no more than
//! one pass over the box.
//!
//! Note that the target pixel itself is *not* checked first: with the
//! default window the first candidate is `(x - 2, y - 2)`. Callers that want
//! the exact pixel when it is valid use [`resolve_center`].

use std::ops::RangeInclusive;

use ml_types::BoundingBox;
use sensor_types::DepthMap;
use serde::{Deserialize, Serialize};

/// Expanding-ring search bounds.
///
/// The worst case per anchor is [`SearchWindow::max_lookups`] depth reads.
///
/// # Example
///
/// ```
/// use object_sizing::SearchWindow;
///
/// let window = SearchWindow::default();
/// assert_eq!(window.step, 2);
/// assert_eq!(window.max_attempts, 10);
/// assert_eq!(window.max_radius(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    /// Radius increment per ring, in pixels.
    pub step: u32,
    /// Number of rings to search.
    pub max_attempts: u32,
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self {
            step: 2,
            max_attempts: 10,
        }
    }
}

impl SearchWindow {
    /// Largest [`max_radius`](Self::max_radius) a validated configuration
    /// accepts, in pixels.
    pub const MAX_RADIUS: u64 = 1024;

    /// Creates a search window.
    #[must_use]
    pub const fn new(step: u32, max_attempts: u32) -> Self {
        Self { step, max_attempts }
    }

    /// Radius of the outermost ring.
    #[must_use]
    pub const fn max_radius(&self) -> u64 {
        self.step as u64 * self.max_attempts as u64
    }

    /// Upper bound on depth reads for one [`sample`] call, saturating at
    /// `u64::MAX`.
    #[must_use]
    pub const fn max_lookups(&self) -> u64 {
        if self.max_attempts == 0 {
            return 0;
        }
        let side = self.max_radius().saturating_mul(2).saturating_add(1);
        side.saturating_mul(side)
    }
}

/// A resolved depth reading.
///
/// There is no numeric sentinel: a missing reading is [`DepthSample::Invalid`],
/// never `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum DepthSample {
    /// A valid reading.
    Valid {
        /// Depth in meters.
        depth: f32,
        /// Pixel `[x, y]` the reading stands for.
        pixel: [u32; 2],
    },
    /// No valid reading was found.
    #[default]
    Invalid,
}

impl DepthSample {
    /// Returns `true` for a valid reading.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Depth in meters, if valid.
    #[must_use]
    pub const fn value(&self) -> Option<f32> {
        match self {
            Self::Valid { depth, .. } => Some(*depth),
            Self::Invalid => None,
        }
    }

    /// Pixel the reading was taken from, if valid.
    #[must_use]
    pub const fn pixel(&self) -> Option<[u32; 2]> {
        match self {
            Self::Valid { pixel, .. } => Some(*pixel),
            Self::Invalid => None,
        }
    }
}

/// Finds a valid depth near `(target_x, target_y)` inside `bbox`.
///
/// A candidate is eligible only when it lies inside the bounding box (edges
/// inclusive) and inside the depth map. The first eligible candidate with a
/// valid depth wins. The search terminates after `window.max_attempts`
/// rings, or earlier once a ring covers the whole eligible region.
///
/// # Example
///
/// ```
/// use std::ops::RangeInclusive;
///
/// use ml_types::BoundingBox;
/// use object_sizing::{SearchWindow, sample};
/// use sensor_types::DepthMap;
///
/// let map = DepthMap::from_fn(40, 40, |x, y| if (x, y) == (22, 20) { 3.0 } else { f32::NAN }).unwrap();
/// let bbox = BoundingBox::new(10, 10, 30, 30);
///
/// let hit = sample(&map, 20, 20, &bbox, SearchWindow::default());
/// assert_eq!(hit.value(), Some(3.0));
/// assert_eq!(hit.pixel(), Some([22, 20]));
/// ```
#[must_use]
pub fn sample(
    depth_map: &DepthMap,
    target_x: u32,
    target_y: u32,
    bbox: &BoundingBox,
    window: SearchWindow,
) -> DepthSample {
    let Some(region) = Region::eligible(depth_map, bbox) else {
        return DepthSample::Invalid;
    };
    let tx = i64::from(target_x);
    let ty = i64::from(target_y);
    let step = i64::from(window.step);

    // Radius already covered by the previous ring.
    let mut covered: Option<i64> = None;

    for attempt in 1..=i64::from(window.max_attempts) {
        let radius = attempt.saturating_mul(step);
        if covered.is_some_and(|r| r >= radius) {
            break;
        }

        let xs = tx.saturating_sub(radius).max(region.x_min)
            ..=tx.saturating_add(radius).min(region.x_max);
        let ys = ty.saturating_sub(radius).max(region.y_min)
            ..=ty.saturating_add(radius).min(region.y_max);
        for y in ys {
            let hit = match covered {
                // Rows crossing the covered square only visit its two flanks.
                Some(r) if (y - ty).abs() <= r => {
                    let inner = tx.saturating_sub(r)..=tx.saturating_add(r);
                    let left = *xs.start()..=(*xs.end()).min(inner.start().saturating_sub(1));
                    let right = (*xs.start()).max(inner.end().saturating_add(1))..=*xs.end();
                    scan_row(depth_map, bbox, y, left)
                        .or_else(|| scan_row(depth_map, bbox, y, right))
                }
                _ => scan_row(depth_map, bbox, y, xs.clone()),
            };
            if let Some(hit) = hit {
                return hit;
            }
        }

        if region.within(tx, ty, radius) {
            break;
        }
        covered = Some(radius);
    }

    DepthSample::Invalid
}

/// Pixels a search may visit: the box clipped to the image, inclusive.
#[derive(Debug, Clone, Copy)]
struct Region {
    x_min: i64,
    x_max: i64,
    y_min: i64,
    y_max: i64,
}

impl Region {
    fn eligible(depth_map: &DepthMap, bbox: &BoundingBox) -> Option<Self> {
        let region = Self {
            x_min: i64::from(bbox.x1),
            x_max: i64::from(bbox.x2.min(depth_map.width().saturating_sub(1))),
            y_min: i64::from(bbox.y1),
            y_max: i64::from(bbox.y2.min(depth_map.height().saturating_sub(1))),
        };
        (region.x_min <= region.x_max && region.y_min <= region.y_max).then_some(region)
    }

    /// Returns `true` if the square of `radius` around `(x, y)` covers the
    /// whole region.
    const fn within(&self, x: i64, y: i64, radius: i64) -> bool {
        x.saturating_sub(radius) <= self.x_min
            && x.saturating_add(radius) >= self.x_max
            && y.saturating_sub(radius) <= self.y_min
            && y.saturating_add(radius) >= self.y_max
    }
}

fn scan_row(
    depth_map: &DepthMap,
    bbox: &BoundingBox,
    y: i64,
    xs: RangeInclusive<i64>,
) -> Option<DepthSample> {
    xs.into_iter().find_map(|x| lookup(depth_map, bbox, x, y))
}

fn lookup(depth_map: &DepthMap, bbox: &BoundingBox, nx: i64, ny: i64) -> Option<DepthSample> {
    if !bbox.contains(nx, ny) || !depth_map.contains(nx, ny) {
        return None;
    }
    let x = u32::try_from(nx).ok()?;
    let y = u32::try_from(ny).ok()?;
    depth_map.get_valid(x, y).map(|depth| DepthSample::Valid {
        depth,
        pixel: [x, y],
    })
}

/// Resolves the depth at the box center.
///
/// Uses the center pixel directly when it is valid, and falls back to the
/// expanding search otherwise.
#[must_use]
pub fn resolve_center(depth_map: &DepthMap, bbox: &BoundingBox, window: SearchWindow) -> DepthSample {
    let (cx, cy) = bbox.center();
    match depth_map.get_valid(cx, cy) {
        Some(depth) => DepthSample::Valid {
            depth,
            pixel: [cx, cy],
        },
        None => sample(depth_map, cx, cy, bbox, window),
    }
}

/// Averages every valid depth inside the box.
///
/// Covers `x1 <= x < x2`, `y1 <= y < y2`. The returned sample is attributed
/// to the box center. Invalid when the box holds no valid depth.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn box_mean_depth(depth_map: &DepthMap, bbox: &BoundingBox) -> DepthSample {
    let x_end = bbox.x2.min(depth_map.width());
    let y_end = bbox.y2.min(depth_map.height());

    let mut sum = 0.0f64;
    let mut count = 0usize;
    for y in bbox.y1..y_end {
        for x in bbox.x1..x_end {
            if let Some(d) = depth_map.get_valid(x, y) {
                sum += f64::from(d);
                count += 1;
            }
        }
    }

    if count == 0 {
        return DepthSample::Invalid;
    }
    let (cx, cy) = bbox.center();
    DepthSample::Valid {
        depth: (sum / count as f64) as f32,
        pixel: [cx, cy],
    }
}
