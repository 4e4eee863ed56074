use super::{Point2, LOGICAL_HALF_EXTENT};

/// Square device-space viewport of side `size`.
///
/// The logical window `[-10, 10] x [-10, 10]` maps onto `[0, size] x [0, size]`
/// with the y axis flipped, since device coordinates grow downward:
///
/// `x' = ((x + 10) / 20) * size`, `y' = ((10 - y) / 20) * size`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    size: f64,
}

impl Viewport {
    /// Side length used when none is given.
    pub const DEFAULT_SIZE: f64 = 1000.0;

    /// Creates a viewport with the given side length.
    ///
    /// The size is not validated here; sampling parameters are checked before use.
    #[must_use]
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    /// Returns the side length.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Maps a raw curve point into device coordinates.
    #[must_use]
    pub fn project(&self, raw: &Point2) -> Point2 {
        let span = 2.0 * LOGICAL_HALF_EXTENT;
        Point2::new(
            ((raw.x + LOGICAL_HALF_EXTENT) / span) * self.size,
            ((LOGICAL_HALF_EXTENT - raw.y) / span) * self.size,
        )
    }

    /// Returns whether a projected point lies strictly inside the viewport.
    ///
    /// Points exactly on an edge are outside.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x > 0.0 && p.x < self.size && p.y > 0.0 && p.y < self.size
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}
