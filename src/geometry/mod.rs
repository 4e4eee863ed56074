pub mod curve;
pub mod path;

pub use curve::{CurveDefinition, CurveDomain, CurveKind, Evaluator};
pub use path::{Bounds, PathCommand, ProjectedPath};
