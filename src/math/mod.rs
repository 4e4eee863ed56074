pub mod viewport;

pub use viewport::Viewport;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// Half-extent of the logical window `[-10, 10] x [-10, 10]` that curves are drawn in.
pub const LOGICAL_HALF_EXTENT: f64 = 10.0;
