//! Renderer-side collaborators: vector serialization and stroke styling.
//!
//! Nothing here feeds back into sampling; these consume a finished
//! [`ProjectedPath`](crate::geometry::ProjectedPath).

pub mod style;
pub mod svg;

pub use style::{DrawAnimation, FrameShape, StrokeStyle};
pub use svg::{
    path_data, points_attribute, round_significant, write_path_data, write_points, SvgDocument,
    SvgOptions,
};
