use crate::error::{Result, SamplingError};
use crate::geometry::{CurveDefinition, PathCommand, ProjectedPath};
use crate::math::Viewport;

/// Upper bound on the number of samples a single call may take.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Viewport size and parameter step for a sampling request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleParams {
    /// Side length of the square device viewport.
    pub viewport: f64,
    /// Parameter increment, in the curve's native parameter units.
    pub step: f64,
}

impl SampleParams {
    /// Step used when none is given.
    pub const DEFAULT_STEP: f64 = 0.01;

    /// Creates sampling parameters.
    #[must_use]
    pub fn new(viewport: f64, step: f64) -> Self {
        Self { viewport, step }
    }

    /// Checks that both values are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidParameters`] otherwise.
    pub fn validate(&self) -> std::result::Result<(), SamplingError> {
        if !self.viewport.is_finite() || self.viewport <= 0.0 {
            return Err(SamplingError::InvalidParameters(format!(
                "viewport size must be positive, got {}",
                self.viewport
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SamplingError::InvalidParameters(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        Ok(())
    }
}

impl Default for SampleParams {
    fn default() -> Self {
        Self::new(Viewport::DEFAULT_SIZE, Self::DEFAULT_STEP)
    }
}

/// Samples a curve at a fixed parameter step and projects it into a viewport.
///
/// Sample `i` is taken at `t_min + i * step` for every `i` with
/// `i <= floor((t_max - t_min) / step)`. The last sample may fall short of
/// `t_max`; the upper bound is never forced in.
///
/// The first sample always emits `MoveTo`. Every later sample emits `LineTo`
/// when it or the previous sample is strictly inside the viewport, and a
/// pen-lifting `MoveTo` when both are outside. Segments that cross the
/// viewport edge are kept; chords between two invisible points are dropped.
pub struct SampleCurve<'a> {
    curve: &'a CurveDefinition,
    params: SampleParams,
}

impl<'a> SampleCurve<'a> {
    /// Creates a new `SampleCurve` operation.
    #[must_use]
    pub fn new(curve: &'a CurveDefinition, params: SampleParams) -> Self {
        Self { curve, params }
    }

    /// Returns the number of samples the operation will take.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters or the curve's domain are invalid, or
    /// if the count would exceed [`MAX_SAMPLES`].
    pub fn sample_count(&self) -> Result<usize> {
        self.params.validate()?;
        let domain = self.curve.domain();
        if !domain.is_valid() {
            return Err(SamplingError::InvalidDomain {
                min: domain.t_min,
                max: domain.t_max,
            }
            .into());
        }

        let steps = (domain.span() / self.params.step).floor();
        #[allow(clippy::cast_precision_loss)]
        let limit = MAX_SAMPLES as f64;
        if steps >= limit {
            return Err(SamplingError::InvalidParameters(format!(
                "step {} over [{}, {}] exceeds {MAX_SAMPLES} samples",
                self.params.step, domain.t_min, domain.t_max
            ))
            .into());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = steps as usize + 1;
        Ok(count)
    }

    /// Executes the sampling, returning the projected path.
    ///
    /// Either the complete path is returned or nothing: output produced before
    /// a failing sample is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidParameters`] for a non-positive viewport
    /// or step, [`SamplingError::InvalidDomain`] for an inverted domain (before
    /// anything is evaluated), and [`SamplingError::Evaluation`] when a sample
    /// has a non-finite coordinate.
    pub fn execute(&self) -> Result<ProjectedPath> {
        let count = self.sample_count()?;
        let t_min = self.curve.domain().t_min;
        let step = self.params.step;
        let viewport = Viewport::new(self.params.viewport);

        let _span = tracing::debug_span!("sample_curve", curve = self.curve.title()).entered();
        tracing::debug!(count, step, viewport = viewport.size(), "sampling");

        let mut commands = Vec::with_capacity(count);
        let mut prev_visible = false;
        for i in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let t = t_min + i as f64 * step;
            let raw = self.curve.evaluate(t);
            if !(raw.x.is_finite() && raw.y.is_finite()) {
                tracing::debug!(parameter = t, "non-finite sample, discarding path");
                return Err(SamplingError::Evaluation {
                    parameter: t,
                    x: raw.x,
                    y: raw.y,
                }
                .into());
            }

            let p = viewport.project(&raw);
            let visible = viewport.contains(&p);
            let command = if i > 0 && (visible || prev_visible) {
                PathCommand::LineTo(p)
            } else {
                PathCommand::MoveTo(p)
            };
            commands.push(command);
            prev_visible = visible;
        }

        let path = ProjectedPath::new(commands);
        tracing::trace!(pen_lifts = path.pen_lifts(), "curve sampled");
        Ok(path)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
mod tests {
    use super::*;
    use crate::catalog::CurveCatalog;
    use crate::error::LociError;
    use crate::math::Point2;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn astroid() -> CurveDefinition {
        CurveDefinition::parametric("Astroid", "", |t| {
            Point2::new(9.0 * t.cos().powi(3), 9.0 * t.sin().powi(3))
        })
        .with_domain(0.0, 2.0 * PI)
    }

    /// Curve visiting a fixed list of raw points at t = 0, 1, 2, ...
    fn stepping(points: Vec<Point2>) -> CurveDefinition {
        let last = points.len() - 1;
        CurveDefinition::parametric("Steps", "", move |t| points[(t.round() as usize).min(last)])
            .with_domain(0.0, last as f64)
    }

    fn sample(curve: &CurveDefinition, viewport: f64, step: f64) -> Result<ProjectedPath> {
        SampleCurve::new(curve, SampleParams::new(viewport, step)).execute()
    }

    #[test]
    fn astroid_starts_at_right_cusp() {
        let path = sample(&astroid(), 1000.0, 0.01).unwrap();
        let PathCommand::MoveTo(p) = path.commands()[0] else {
            panic!("first command must be MoveTo");
        };
        assert_relative_eq!(p.x, 950.0);
        assert_relative_eq!(p.y, 500.0);
    }

    #[test]
    fn astroid_sample_count() {
        let path = sample(&astroid(), 1000.0, 0.01).unwrap();
        // floor(2π / 0.01) + 1
        assert_eq!(path.len(), 629);
    }

    #[test]
    fn sample_count_matches_floor_formula() {
        let cases = [
            (0.0, 1.0, 0.25),
            (-10.0, 10.0, 0.01),
            (0.0, 2.0 * PI, 0.01),
            (-9.72, 9.75, 0.01),
            (3.0, 3.0, 0.5),
            (0.0, 1.0, 3.0),
        ];
        for (min, max, step) in cases {
            let curve = CurveDefinition::parametric("c", "", |t| Point2::new(t * 0.1, 0.0))
                .with_domain(min, max);
            let path = sample(&curve, 1000.0, step).unwrap();
            let expected = ((max - min) / step).floor() as usize + 1;
            assert_eq!(path.len(), expected, "[{min}, {max}] step {step}");
        }
    }

    #[test]
    fn final_sample_does_not_exceed_max() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let curve = CurveDefinition::parametric("c", "", move |t| {
            log.lock().unwrap().push(t);
            Point2::origin()
        })
        .with_domain(0.0, 1.0);
        sample(&curve, 1000.0, 0.3).unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_relative_eq!(seen[3], 0.9, epsilon = 1e-12);
    }

    #[test]
    fn first_instruction_is_always_move() {
        for curve in [astroid(), stepping(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)])] {
            let path = sample(&curve, 1000.0, 0.5).unwrap();
            assert!(path.commands()[0].is_move());
        }
    }

    #[test]
    fn segmentation_law() {
        let curve = stepping(vec![
            Point2::new(0.0, 0.0),   // in
            Point2::new(20.0, 0.0),  // out
            Point2::new(20.0, 20.0), // out
            Point2::new(1.0, 1.0),   // in
            Point2::new(10.0, 0.0),  // on the right edge: out
            Point2::new(-15.0, 0.0), // out
        ]);
        let path = sample(&curve, 1000.0, 1.0).unwrap();
        let moves: Vec<bool> = path.iter().map(PathCommand::is_move).collect();
        assert_eq!(moves, vec![true, false, true, false, false, true]);
    }

    #[test]
    fn fully_outside_curve_is_all_pen_lifts() {
        let curve = CurveDefinition::parametric("far", "", |t| Point2::new(50.0 + t, 50.0))
            .with_domain(0.0, 1.0);
        let path = sample(&curve, 1000.0, 0.1).unwrap();
        assert!(path.iter().all(PathCommand::is_move));
        assert_relative_eq!(path.length(), 0.0);
    }

    #[test]
    fn boundary_points_count_as_outside() {
        // Four consecutive points exactly on each viewport edge.
        let curve = stepping(vec![
            Point2::new(-10.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(0.0, -10.0),
        ]);
        let path = sample(&curve, 1000.0, 1.0).unwrap();
        assert!(path.iter().all(PathCommand::is_move));
    }

    #[test]
    fn entering_and_leaving_segments_are_drawn() {
        let curve = stepping(vec![
            Point2::new(-20.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(20.0, 0.0),
        ]);
        let path = sample(&curve, 1000.0, 1.0).unwrap();
        assert!(path.commands()[0].is_move());
        assert!(!path.commands()[1].is_move());
        assert!(!path.commands()[2].is_move());
        // -20 -> 0 -> 20 in logical units is 2000 device units at V = 1000.
        assert_relative_eq!(path.length(), 2000.0);
    }

    #[test]
    fn origin_maps_to_center_for_any_viewport() {
        let curve = CurveDefinition::parametric("dot", "", |_| Point2::origin()).with_domain(0.0, 0.0);
        for v in [10.0, 640.0, 1000.0] {
            let path = sample(&curve, v, 0.01).unwrap();
            assert_eq!(path.len(), 1);
            let p = path.commands()[0].point();
            assert_relative_eq!(p.x, v / 2.0);
            assert_relative_eq!(p.y, v / 2.0);
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let curve = astroid();
        let a = sample(&curve, 1000.0, 0.01).unwrap();
        let b = sample(&curve, 1000.0, 0.01).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_domain_yields_single_move() {
        let curve = CurveDefinition::parametric("Dot", "", |_| Point2::new(1.0, 1.0))
            .with_domain(2.0, 2.0);
        let path = sample(&curve, 1000.0, 0.01).unwrap();
        assert_eq!(path.len(), 1);
        assert!(path.commands()[0].is_move());
    }

    #[test]
    fn inverted_domain_fails_before_evaluating() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let curve = CurveDefinition::parametric("bad", "", move |t| {
            counter.fetch_add(1, Ordering::SeqCst);
            Point2::new(t, t)
        })
        .with_domain(5.0, -5.0);

        let err = sample(&curve, 1000.0, 0.01).unwrap_err();
        assert!(matches!(
            err,
            LociError::Sampling(SamplingError::InvalidDomain { min, max }) if min == 5.0 && max == -5.0
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn non_finite_sample_fails_whole_call() {
        let curve = CurveDefinition::parametric("nan", "", |t| {
            if t > 0.5 {
                Point2::new(f64::NAN, 0.0)
            } else {
                Point2::new(t, 0.0)
            }
        })
        .with_domain(0.0, 1.0);

        let err = sample(&curve, 1000.0, 0.1).unwrap_err();
        match err {
            LociError::Sampling(SamplingError::Evaluation { parameter, x, y }) => {
                assert_relative_eq!(parameter, 0.6, epsilon = 1e-12);
                assert!(x.is_nan());
                assert_relative_eq!(y, 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn infinite_sample_fails() {
        let curve = CurveDefinition::parametric("inf", "", |t| Point2::new(0.0, 1.0 / t))
            .with_domain(0.0, 1.0);
        assert!(matches!(
            sample(&curve, 1000.0, 0.1),
            Err(LociError::Sampling(SamplingError::Evaluation { .. }))
        ));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let curve = astroid();
        for (v, step) in [
            (0.0, 0.01),
            (-1.0, 0.01),
            (f64::NAN, 0.01),
            (1000.0, 0.0),
            (1000.0, -0.01),
            (1000.0, f64::INFINITY),
        ] {
            assert!(
                matches!(
                    sample(&curve, v, step),
                    Err(LociError::Sampling(SamplingError::InvalidParameters(_)))
                ),
                "V={v} step={step}"
            );
        }
    }

    #[test]
    fn too_many_samples_are_rejected() {
        let curve = CurveDefinition::parametric("c", "", |t| Point2::new(t, t));
        assert!(matches!(
            sample(&curve, 1000.0, 1e-12),
            Err(LociError::Sampling(SamplingError::InvalidParameters(_)))
        ));
    }

    #[test]
    fn default_params() {
        let params = SampleParams::default();
        assert_relative_eq!(params.viewport, 1000.0);
        assert_relative_eq!(params.step, 0.01);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn every_gallery_curve_samples() {
        let catalog = CurveCatalog::gallery();
        for (id, curve) in catalog.entries() {
            let path = SampleCurve::new(curve, SampleParams::default())
                .execute()
                .unwrap_or_else(|e| panic!("{id}: {e}"));
            assert!(!path.is_empty(), "{id}");
            assert!(path.commands()[0].is_move(), "{id}");
        }
    }

    #[test]
    fn concurrent_sampling_is_consistent() {
        let catalog = CurveCatalog::gallery();
        let expected = catalog.sample("epicycloid", 1000.0, 0.01).unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| catalog.sample("epicycloid", 1000.0, 0.01).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
