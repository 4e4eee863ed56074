//! Built-in gallery of classic plane curves.
//!
//! Every entry is scaled to fit the logical `[-10, 10]` window. Some are
//! deliberately allowed to leave it (asymptotic branches, unbounded graphs);
//! the sampler segments those instead of drawing chords across the canvas.

use std::f64::consts::PI;

use crate::geometry::CurveDefinition;
use crate::math::Point2;

use super::CurveCatalog;

/// Id of the entry selected when nothing else is requested.
pub const DEFAULT_CURVE: &str = "astroid";

/// Gallery entries in menu order.
fn curves() -> Vec<(&'static str, CurveDefinition)> {
    vec![
        (
            "astroid",
            CurveDefinition::parametric(
                "Astroid",
                r"\begin{aligned} x &= a \cos^3(t) \\[1.5ex] y &= a \sin^3(t)\end{aligned}",
                |t| Point2::new(9.0 * t.cos().powi(3), 9.0 * t.sin().powi(3)),
            )
            .with_domain(0.0, 2.0 * PI)
            .with_path_length(2700.0),
        ),
        (
            "bicorn",
            CurveDefinition::parametric(
                "Bicorn",
                r"\begin{aligned} x &= a \cos(t) \\[1.5ex] y &= \frac{\sin^2(t)}{2 + \sin(t)}\end{aligned}",
                |t| Point2::new(9.0 * t.cos(), 9.0 * t.sin().powi(2) / (2.0 + t.sin())),
            )
            .with_domain(0.0, 2.0 * PI)
            .with_path_length(2275.0),
        ),
        (
            "cardiod",
            CurveDefinition::polar_radius("Cardiod", r"r = 2a(1+\cos\theta)", |t| {
                4.0 * (1.0 + t.cos())
            })
            .with_max_pi_multiple(2.1)
            .with_path_length(1722.0),
        ),
        (
            "catenary",
            CurveDefinition::parametric("Catenary", r"y = a\cosh(\frac{x}{a})", |t| {
                Point2::new(t, (t / 3.0).cosh())
            })
            .with_domain(-9.0, 9.0)
            .with_path_length(1387.0),
        ),
        (
            "cayleysSextic",
            CurveDefinition::polar_radius(
                "Cayley's Sextic",
                r"r = 4a\cos^3(\frac{\theta}{3})",
                |t| 8.0 * (t / 3.0).cos().powi(3),
            )
            .with_max_pi_multiple(3.1)
            .with_path_length(2007.0),
        ),
        (
            "cissoidOfDiocles",
            CurveDefinition::parametric(
                "Cissoid of Diocles",
                r"r = 2a \tan\theta\sin\theta",
                |t| {
                    let r = 2.0 * t.tan() * t.sin();
                    Point2::new(r * t.cos(), r * t.sin())
                },
            )
            .with_domain(-PI * 0.44, PI * 0.5)
            .with_path_length(1075.0),
        ),
        (
            "cochleoid",
            CurveDefinition::polar_radius(
                "Cochleoid",
                r"\displaystyle r = \frac{a \sin\theta}{\theta}",
                |t| 9.0 * t.sin() / t,
            )
            .with_max_pi_multiple(6.0)
            .with_min(0.0004)
            .with_path_length(1819.0),
        ),
        (
            "conchoidOfDeSluze",
            CurveDefinition::polar_radius(
                "Conchoid of DeSluze",
                r"a(r\cos\theta + a) = k^2\cos^2\theta",
                |t| {
                    let k: f64 = 2.5;
                    let c = t.cos();
                    (k.powi(2) * c.powi(2) - 1.0) / c
                },
            )
            .with_max_pi_multiple(1.5)
            .with_min(PI * 0.53)
            .with_path_length(1800.0),
        ),
        (
            "cycloid",
            CurveDefinition::parametric(
                "Cycloid",
                r"\begin{aligned} x &= t - \sin t \\[1.5ex] y &= 1 - \cos t\end{aligned}",
                |t| Point2::new(t - t.sin(), 1.0 - t.cos()),
            )
            .with_domain(-9.72, 9.75)
            .with_path_length(1262.0),
        ),
        (
            "curateCycloid",
            CurveDefinition::parametric(
                "Cycloid (curate)",
                r"\begin{aligned} x &= 2t - \sin t \\[1.5ex] y &= 2 - \cos t\end{aligned}",
                |t| Point2::new(2.0 * t - t.sin(), 2.0 - t.cos()),
            )
            .with_domain(-4.5, 4.5)
            .with_path_length(1050.0),
        ),
        (
            "prolateCycloid",
            CurveDefinition::parametric(
                "Cycloid (prolate)",
                r"\begin{aligned} x &= t - 2\sin t \\[1.5ex] y &= 1 - 2\cos t\end{aligned}",
                |t| Point2::new(t - 2.0 * t.sin(), 1.0 - 2.0 * t.cos()),
            )
            .with_domain(-9.6, 9.7)
            .with_path_length(2060.0),
        ),
        (
            "doubleFolium",
            CurveDefinition::polar_radius(
                "Double Folium",
                r"r = 4a\cos\theta\sin^2\theta",
                |t| 24.0 * t.cos() * t.sin().powi(2),
            )
            .with_max_pi_multiple(1.0)
            .with_path_length(2147.0),
        ),
        (
            "ellipse",
            CurveDefinition::parametric(
                "Ellipse",
                r"\begin{aligned} x &= a \cos(t) \\[1.5ex] y &= b \sin(t)\end{aligned}",
                |t| Point2::new(9.0 * t.cos(), 5.0 * t.sin()),
            )
            .with_domain(0.0, PI * 2.0 + 0.1)
            .with_path_length(2270.0),
        ),
        (
            "epicycloid",
            CurveDefinition::parametric(
                "Epicycloid",
                r"\begin{aligned} x &= (a+b) \cos t - b \cos((\frac{a}{b} + 1)t) \\[1.5ex] y &= (a+b) \sin t - b \sin((\frac{a}{b}+1)t)\end{aligned}",
                |t| trochoid(4.5, 2.0, 2.0, t),
            )
            .with_domain(0.0, PI * 8.0)
            .with_path_length(10400.0),
        ),
        (
            "epitrochoid",
            CurveDefinition::parametric(
                "Epitrochoid",
                r"\begin{aligned} x &= (a+b) \cos t - c \cos((\frac{a}{b} + 1)t) \\[1.5ex] y &= (a+b) \sin t - c \sin((\frac{a}{b}+1)t)\end{aligned}",
                |t| trochoid(4.5, 2.0, 3.0, t),
            )
            .with_domain(0.0, PI * 8.0 + 0.1)
            .with_path_length(13673.0),
        ),
        (
            "equiangularSpiral",
            CurveDefinition::polar_radius(
                "Equiangular Spiral",
                r"r = a\exp(\theta \cot b)",
                |t| 0.1 * (t * 0.198_912_367).exp(),
            )
            .with_max_pi_multiple(7.37)
            .with_path_length(2536.0),
        ),
        (
            "foliumOfDescartes",
            CurveDefinition::parametric("Folium of Descartes", "x^3 + y^3 = 3axy", |t| {
                let a = 3.0;
                let (s, c) = t.sin_cos();
                let r = (3.0 * a * s * c) / (s.powi(3) + c.powi(3));
                Point2::new(r * c, r * s)
            })
            .with_domain(2.5, 5.35)
            .with_path_length(2184.0),
        ),
        (
            "freethsNephroid",
            CurveDefinition::polar_radius(
                "Freeth's Nephroid",
                r"r = a(1 + 2\sin(\frac{\theta}{2}))",
                |t| 3.0 * (1.0 + 2.0 * (t / 2.0).sin()),
            )
            .with_max_pi_multiple(4.0)
            .with_path_length(3179.0),
        ),
        (
            "frequencyCurve",
            CurveDefinition::parametric(
                "Frequency Curve",
                r"y = \sqrt(2\pi\exp(\frac{-x^2}{2}))",
                |t| Point2::new(t, (2.0 * PI * ((t * t) / -2.0).exp()).sqrt()),
            )
            .with_path_length(1084.0),
        ),
        (
            "hypocycloid",
            CurveDefinition::parametric(
                "Hypocycloid",
                r"\begin{aligned} x &= (a-b)\cos t + b\cos((\frac{a}{b}-1)t) \\[1.5ex] y &= (a-b)\sin t - b\sin((\frac{a}{b}-1)t)\end{aligned}",
                |t| hypotrochoid(9.0, 5.4, 5.4, t),
            )
            .with_domain(0.0, PI * 6.0)
            .with_path_length(4320.0),
        ),
        (
            "hypotrochoid",
            CurveDefinition::parametric(
                "Hypotrochoid",
                r"\begin{aligned} x &= (a-b)\cos t + c\cos((\frac{a}{b}-1)t) \\[1.5ex] y &= (a-b)\sin t - c\cos((\frac{a}{b}-1)t)\end{aligned}",
                |t| hypotrochoid(10.0, 14.0, 4.4, t),
            )
            .with_domain(0.0, PI * 14.0 + 0.1)
            .with_path_length(9028.0),
        ),
        (
            "limacon",
            CurveDefinition::polar_radius("Limaçon", r"r = a + b\cos t", |t| 3.0 + 6.0 * t.cos())
                .with_max_pi_multiple(2.1)
                .with_path_length(2142.0),
        ),
        (
            "serpentine",
            CurveDefinition::parametric("Serpentine", "x^2y + aby - a^2x = 0, ab > 0", |x| {
                let (a, b) = (9.0, 3.0);
                Point2::new(x, (a * a * x) / (x * x + a * b))
            })
            .with_path_length(1497.0),
        ),
        (
            "parabola",
            CurveDefinition::parametric("Parabola", "y = ax^2 + bx + c", |t| {
                Point2::new(t, 0.5 * t * t)
            })
            .with_domain(-4.5, 4.5)
            .with_path_length(1400.0),
        ),
    ]
}

/// Epicycloid family: a circle of radius `b` rolling outside one of radius `a`,
/// tracing a point at distance `c` from the rolling centre.
fn trochoid(a: f64, b: f64, c: f64, t: f64) -> Point2 {
    let k = a / b + 1.0;
    Point2::new(
        (a + b) * t.cos() - c * (k * t).cos(),
        (a + b) * t.sin() - c * (k * t).sin(),
    )
}

/// Hypocycloid family: the rolling circle runs inside the fixed one.
fn hypotrochoid(a: f64, b: f64, c: f64, t: f64) -> Point2 {
    let k = a / b - 1.0;
    Point2::new(
        (a - b) * t.cos() + c * (k * t).cos(),
        (a - b) * t.sin() - c * (k * t).sin(),
    )
}

pub(super) fn build() -> CurveCatalog {
    let mut builder = CurveCatalog::builder();
    for (id, definition) in curves() {
        if let Err(err) = builder.insert(id, definition) {
            tracing::warn!(%err, "skipping gallery entry");
        }
    }
    builder.build()
}
