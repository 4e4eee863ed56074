pub mod catalog;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod render;

pub use catalog::{CurveCatalog, CurveKey};
pub use error::{LociError, Result};
pub use geometry::{CurveDefinition, CurveKind, PathCommand, ProjectedPath};
pub use operations::{SampleCurve, SampleParams};
