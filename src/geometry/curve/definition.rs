use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use crate::math::Point2;

use super::{CurveDomain, CurveKind};

/// Shared evaluation function mapping a parameter to a raw point.
pub type Evaluator = Arc<dyn Fn(f64) -> Point2 + Send + Sync>;

/// An immutable curve entry: display metadata plus a pure evaluation function.
///
/// Raw points are in the curve's natural coordinate system, which by convention
/// stays roughly within ±10 of the origin.
#[derive(Clone)]
pub struct CurveDefinition {
    title: String,
    equation: String,
    kind: CurveKind,
    domain: CurveDomain,
    evaluate: Evaluator,
    path_length: Option<f64>,
}

impl CurveDefinition {
    fn with_kind<F>(
        kind: CurveKind,
        title: impl Into<String>,
        equation: impl Into<String>,
        evaluate: F,
    ) -> Self
    where
        F: Fn(f64) -> Point2 + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            equation: equation.into(),
            kind,
            domain: kind.default_domain(),
            evaluate: Arc::new(evaluate),
            path_length: None,
        }
    }

    /// Creates a parametric curve over the default domain `[-10, 10]`.
    pub fn parametric<F>(title: impl Into<String>, equation: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(f64) -> Point2 + Send + Sync + 'static,
    {
        Self::with_kind(CurveKind::Parametric, title, equation, evaluate)
    }

    /// Creates a polar curve over the default domain `[0, 2π]`.
    ///
    /// `evaluate` already returns Cartesian coordinates; see
    /// [`CurveDefinition::polar_radius`] to build one from `r(θ)`.
    pub fn polar<F>(title: impl Into<String>, equation: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(f64) -> Point2 + Send + Sync + 'static,
    {
        Self::with_kind(CurveKind::Polar, title, equation, evaluate)
    }

    /// Creates a polar curve from a radius function `r(θ)`.
    pub fn polar_radius<F>(title: impl Into<String>, equation: impl Into<String>, radius: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::polar(title, equation, move |theta| {
            let r = radius(theta);
            Point2::new(r * theta.cos(), r * theta.sin())
        })
    }

    /// Replaces both domain bounds.
    #[must_use]
    pub fn with_domain(mut self, t_min: f64, t_max: f64) -> Self {
        self.domain = CurveDomain::new(t_min, t_max);
        self
    }

    /// Replaces the lower domain bound.
    #[must_use]
    pub fn with_min(mut self, t_min: f64) -> Self {
        self.domain.t_min = t_min;
        self
    }

    /// Replaces the upper domain bound.
    #[must_use]
    pub fn with_max(mut self, t_max: f64) -> Self {
        self.domain.t_max = t_max;
        self
    }

    /// Sets the upper domain bound to `multiple * π`.
    #[must_use]
    pub fn with_max_pi_multiple(mut self, multiple: f64) -> Self {
        self.domain.t_max = multiple * PI;
        self
    }

    /// Attaches a precomputed approximate rendered length.
    #[must_use]
    pub fn with_path_length(mut self, length: f64) -> Self {
        self.path_length = Some(length);
        self
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the equation markup. Opaque to this crate.
    #[must_use]
    pub fn equation(&self) -> &str {
        &self.equation
    }

    #[must_use]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    #[must_use]
    pub fn domain(&self) -> CurveDomain {
        self.domain
    }

    /// Returns the precomputed path length, if the entry carries one.
    #[must_use]
    pub fn path_length(&self) -> Option<f64> {
        self.path_length
    }

    /// Evaluates the curve at parameter `t`, returning the raw point.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> Point2 {
        (self.evaluate)(t)
    }
}

impl fmt::Debug for CurveDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveDefinition")
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("domain", &self.domain)
            .field("path_length", &self.path_length)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, TAU};

    #[test]
    fn parametric_defaults() {
        let def = CurveDefinition::parametric("Line", "y = x", |t| Point2::new(t, t));
        assert_eq!(def.kind(), CurveKind::Parametric);
        assert_eq!(def.domain(), CurveDomain::new(-10.0, 10.0));
        assert_eq!(def.path_length(), None);
        assert_eq!(def.evaluate(2.5), Point2::new(2.5, 2.5));
    }

    #[test]
    fn polar_max_is_multiple_of_pi() {
        let def = CurveDefinition::polar_radius("Circle", "r = 1", |_| 1.0)
            .with_max_pi_multiple(2.1)
            .with_min(0.5);
        assert_eq!(def.kind(), CurveKind::Polar);
        assert_relative_eq!(def.domain().t_max, 2.1 * PI);
        assert_relative_eq!(def.domain().t_min, 0.5);
    }

    #[test]
    fn polar_default_domain_is_full_turn() {
        let def = CurveDefinition::polar_radius("Circle", "r = 1", |_| 1.0);
        assert_relative_eq!(def.domain().t_min, 0.0);
        assert_relative_eq!(def.domain().t_max, TAU);
    }

    #[test]
    fn polar_radius_converts_to_cartesian() {
        let def = CurveDefinition::polar_radius("Circle", "r = 3", |_| 3.0);
        let p = def.evaluate(FRAC_PI_2);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 3.0);
    }

    #[test]
    fn metadata_is_passed_through() {
        let def = CurveDefinition::parametric("Parabola", "y = ax^2", |t| Point2::new(t, t * t))
            .with_domain(-4.5, 4.5)
            .with_path_length(1400.0);
        assert_eq!(def.title(), "Parabola");
        assert_eq!(def.equation(), "y = ax^2");
        assert_eq!(def.path_length(), Some(1400.0));
        assert_eq!(def.domain(), CurveDomain::new(-4.5, 4.5));
    }

    #[test]
    fn debug_omits_evaluator() {
        let def = CurveDefinition::parametric("Line", "", |t| Point2::new(t, 0.0));
        let s = format!("{def:?}");
        assert!(s.contains("Line"));
        assert!(s.contains(".."));
    }
}
