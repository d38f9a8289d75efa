//! Bounding box types for object detection.

use serde::{Deserialize, Serialize};

/// A pixel-space bounding box.
///
/// Coordinates are integer pixels in the source image, top-left `(x1, y1)`
/// to bottom-right `(x2, y2)`. The detector clips boxes to the image before
/// they reach this crate, so a box may touch the image edge but should not
/// extend beyond it.
///
/// # Example
///
/// ```
/// use ml_types::BoundingBox;
///
/// let bbox = BoundingBox::new(10, 10, 30, 20);
///
/// assert_eq!(bbox.pixel_width(), 20);
/// assert_eq!(bbox.pixel_height(), 10);
/// assert_eq!(bbox.center(), (20, 15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x1: u32,
    /// Top edge.
    pub y1: u32,
    /// Right edge.
    pub x2: u32,
    /// Bottom edge.
    pub y2: u32,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[must_use]
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns `true` if `x1 < x2` and `y1 < y2`.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        self.x1 < self.x2 && self.y1 < self.y2
    }

    /// Returns the box width in pixels (`x2 - x1`, zero if inverted).
    #[must_use]
    pub const fn pixel_width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    /// Returns the box height in pixels (`y2 - y1`, zero if inverted).
    #[must_use]
    pub const fn pixel_height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Returns the center pixel `(cx, cy)`, rounded down.
    #[must_use]
    pub const fn center(&self) -> (u32, u32) {
        (
            self.x1.midpoint(self.x2),
            self.y1.midpoint(self.y2),
        )
    }

    /// Midpoint of the left edge, `(x1, cy)`.
    #[must_use]
    pub const fn left_mid(&self) -> (u32, u32) {
        (self.x1, self.center().1)
    }

    /// Midpoint of the right edge, `(x2, cy)`.
    #[must_use]
    pub const fn right_mid(&self) -> (u32, u32) {
        (self.x2, self.center().1)
    }

    /// Midpoint of the top edge, `(cx, y1)`.
    #[must_use]
    pub const fn top_mid(&self) -> (u32, u32) {
        (self.center().0, self.y1)
    }

    /// Midpoint of the bottom edge, `(cx, y2)`.
    #[must_use]
    pub const fn bottom_mid(&self) -> (u32, u32) {
        (self.center().0, self.y2)
    }

    /// Checks if this box contains a pixel. All four edges are inclusive.
    ///
    /// Takes signed coordinates so callers can test offsets that have
    /// walked off the top or left of the image.
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= i64::from(self.x1)
            && x <= i64::from(self.x2)
            && y >= i64::from(self.y1)
            && y <= i64::from(self.y2)
    }
}
