use std::time::Duration;

use crate::geometry::CurveKind;

/// Shape of the frame a curve is presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameShape {
    /// Square frame, used for parametric curves.
    Square,
    /// Circular frame, used for polar curves.
    Circle,
}

/// Style parameters for stroking a projected path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    color: &'static str,
    width: f64,
    frame: FrameShape,
}

impl StrokeStyle {
    /// Width used by [`StrokeStyle::for_kind`].
    pub const DEFAULT_WIDTH: f64 = 2.0;

    /// Returns the conventional style for a curve kind: green in a square
    /// frame for parametric curves, red in a circular frame for polar ones.
    #[must_use]
    pub fn for_kind(kind: CurveKind) -> Self {
        let (color, frame) = match kind {
            CurveKind::Parametric => ("green", FrameShape::Square),
            CurveKind::Polar => ("red", FrameShape::Circle),
        };
        Self {
            color,
            width: Self::DEFAULT_WIDTH,
            frame,
        }
    }

    #[must_use]
    pub fn color(&self) -> &'static str {
        self.color
    }

    /// Returns the stroke width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn frame(&self) -> FrameShape {
        self.frame
    }
}

/// Draw-on animation of a stroke: the dash pattern equals the path length and
/// the dash offset runs from that length down to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawAnimation {
    /// Dash length, normally the path's geometric length.
    pub length: f64,
    /// Time for the offset to reach zero.
    pub duration: Duration,
}

impl DrawAnimation {
    /// Duration of the draw-on transition.
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

    /// Creates an animation over the default duration.
    #[must_use]
    pub fn new(length: f64) -> Self {
        Self {
            length,
            duration: Self::DEFAULT_DURATION,
        }
    }

    /// Returns the dash offset at `elapsed` under CSS `ease-in-out` timing,
    /// the same curve the SVG animation declares.
    ///
    /// Starts at `length` and reaches `0` once `elapsed >= duration`.
    #[must_use]
    pub fn dash_offset_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        self.length * (1.0 - ease_in_out(progress))
    }
}

/// `cubic-bezier(0.42, 0, 0.58, 1)`.
fn ease_in_out(progress: f64) -> f64 {
    // One coordinate of a cubic Bezier from 0 to 1.
    fn bezier(p1: f64, p2: f64, s: f64) -> f64 {
        let u = 1.0 - s;
        3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
    }

    // x(s) is monotonic on [0, 1].
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..64 {
        let mid = 0.5 * (lo + hi);
        if bezier(0.42, 0.58, mid) < progress {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier(0.0, 1.0, 0.5 * (lo + hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kind_conventions() {
        let p = StrokeStyle::for_kind(CurveKind::Parametric);
        assert_eq!(p.color(), "green");
        assert_eq!(p.frame(), FrameShape::Square);

        let q = StrokeStyle::for_kind(CurveKind::Polar);
        assert_eq!(q.color(), "red");
        assert_eq!(q.frame(), FrameShape::Circle);
        assert_relative_eq!(q.width(), StrokeStyle::DEFAULT_WIDTH);
    }

    #[test]
    fn animation_runs_from_length_to_zero() {
        let anim = DrawAnimation::new(2700.0);
        assert_relative_eq!(anim.dash_offset_at(Duration::ZERO), 2700.0);
        assert_relative_eq!(
            anim.dash_offset_at(Duration::from_millis(1500)),
            1350.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(anim.dash_offset_at(Duration::from_secs(3)), 0.0);
        assert_relative_eq!(anim.dash_offset_at(Duration::from_secs(10)), 0.0);
    }

    #[test]
    fn animation_follows_css_ease_in_out() {
        let anim = DrawAnimation::new(100.0);
        // cubic-bezier(0.42, 0, 0.58, 1) at x = 0.25 gives y = 0.12916...
        assert_relative_eq!(
            anim.dash_offset_at(Duration::from_millis(750)),
            87.083_806_895,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            anim.dash_offset_at(Duration::from_millis(2250)),
            12.916_193_105,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            anim.dash_offset_at(Duration::from_millis(300)),
            98.027_754_645,
            epsilon = 1e-6
        );
    }

    #[test]
    fn zero_duration_is_already_drawn() {
        let anim = DrawAnimation {
            length: 100.0,
            duration: Duration::ZERO,
        };
        assert_relative_eq!(anim.dash_offset_at(Duration::ZERO), 0.0);
    }
}
