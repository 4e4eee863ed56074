mod definition;

pub use definition::{CurveDefinition, Evaluator};

use std::f64::consts::TAU;
use std::fmt;

/// Parameter domain for a curve.
///
/// Both bounds are inclusive. A well-formed domain has `t_min <= t_max`;
/// this is checked when the curve is sampled, not on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns `t_max - t_min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Returns whether both bounds are finite and ordered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.t_min.is_finite() && self.t_max.is_finite() && self.t_min <= self.t_max
    }
}

/// How a curve is defined.
///
/// The kind only selects default domain bounds and downstream stroke styling.
/// Sampling treats both kinds identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// `x(t), y(t)` over a scalar parameter.
    Parametric,
    /// `r(θ)` over an angle, converted with `x = r cos θ, y = r sin θ`.
    Polar,
}

impl CurveKind {
    /// Returns the default parameter domain for this kind.
    ///
    /// Parametric curves default to `[-10, 10]`, polar curves to `[0, 2π]`.
    #[must_use]
    pub fn default_domain(self) -> CurveDomain {
        match self {
            Self::Parametric => CurveDomain::new(-10.0, 10.0),
            Self::Polar => CurveDomain::new(0.0, TAU),
        }
    }

    /// Returns a lowercase name for display.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Parametric => "parametric",
            Self::Polar => "polar",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domains() {
        assert_eq!(
            CurveKind::Parametric.default_domain(),
            CurveDomain::new(-10.0, 10.0)
        );
        assert_eq!(CurveKind::Polar.default_domain(), CurveDomain::new(0.0, TAU));
    }

    #[test]
    fn domain_validity() {
        assert!(CurveDomain::new(0.0, 0.0).is_valid());
        assert!(CurveDomain::new(-1.0, 1.0).is_valid());
        assert!(!CurveDomain::new(5.0, -5.0).is_valid());
        assert!(!CurveDomain::new(f64::NAN, 1.0).is_valid());
        assert!(!CurveDomain::new(0.0, f64::INFINITY).is_valid());
    }
}
