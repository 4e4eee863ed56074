//! SVG serialization of projected paths.
//!
//! Coordinates are rounded to a fixed number of significant digits before
//! printing, the way browsers format `Number.toPrecision` output. Rounding is
//! a presentation step only; sampled paths keep full precision.

use std::fmt::{self, Write as _};
use std::io;

use crate::error::{RenderError, Result};
use crate::geometry::{PathCommand, ProjectedPath};

use super::style::{DrawAnimation, FrameShape, StrokeStyle};

/// Significant digits used when none are given.
pub const DEFAULT_PRECISION: u32 = 5;

/// Largest accepted precision, as with `Number.toPrecision`.
pub const MAX_PRECISION: u32 = 100;

/// Enough fractional digits to print any `f64` exactly.
const EXACT_DIGITS: usize = 767;

/// Rounds `value` to `digits` significant digits.
///
/// Rounding applies to the exact decimal value of the double, with ties going
/// away from zero, so results agree with `Number.toPrecision`. `digits` is
/// clamped to `1..=MAX_PRECISION`. Zero and non-finite values pass through
/// unchanged; negative zero is normalized to zero.
#[must_use]
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value + 0.0;
    }
    let digits = digits.clamp(1, MAX_PRECISION) as usize;
    let nearest = || format!("{:.*e}", digits - 1, value).parse().unwrap_or(value);

    // Only a trailing 5 one digit further down can be an exact tie, which the
    // formatter would break to even.
    let extended = format!("{:.*e}", digits, value.abs());
    let rounded = match extended.split_once('e') {
        Some((mantissa, _)) if !mantissa.ends_with('5') => nearest(),
        _ => round_half_away(value, digits).unwrap_or_else(nearest),
    };
    rounded + 0.0
}

/// Rounds the full decimal expansion of `value` by hand.
fn round_half_away(value: f64, digits: usize) -> Option<f64> {
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (mantissa, exponent) = exact.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let (kept, rest) = all.split_at(digits.min(all.len()));

    let mut kept = kept.to_vec();
    if rest.first().is_some_and(|&d| d >= b'5') {
        let mut i = kept.len();
        loop {
            if i == 0 {
                kept.insert(0, b'1');
                break;
            }
            i -= 1;
            if kept[i] == b'9' {
                kept[i] = b'0';
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let scale = exponent - (digits as i32 - 1);
    let magnitude: f64 = format!("{}e{scale}", std::str::from_utf8(&kept).ok()?)
        .parse()
        .ok()?;
    Some(magnitude.copysign(value))
}

/// Writes the SVG path `d` attribute for `path` (`M x y L x y ...`).
///
/// # Errors
///
/// Propagates formatter errors.
pub fn write_path_data<W: fmt::Write>(out: &mut W, path: &ProjectedPath, precision: u32) -> fmt::Result {
    for (i, command) in path.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        let (op, p) = match command {
            PathCommand::MoveTo(p) => ('M', p),
            PathCommand::LineTo(p) => ('L', p),
        };
        write!(
            out,
            "{op}{} {}",
            round_significant(p.x, precision),
            round_significant(p.y, precision)
        )?;
    }
    Ok(())
}

/// Writes a polyline `points` attribute (`x y,x y,...`).
///
/// A polyline cannot lift the pen, so every point is joined; use
/// [`write_path_data`] where segmentation matters.
///
/// # Errors
///
/// Propagates formatter errors.
pub fn write_points<W: fmt::Write>(out: &mut W, path: &ProjectedPath, precision: u32) -> fmt::Result {
    for (i, command) in path.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        let p = command.point();
        write!(
            out,
            "{} {}",
            round_significant(p.x, precision),
            round_significant(p.y, precision)
        )?;
    }
    Ok(())
}

/// Returns the SVG path `d` attribute for `path`. Pen-lifts become `M`.
#[must_use]
pub fn path_data(path: &ProjectedPath, precision: u32) -> String {
    let mut out = String::with_capacity(path.len() * 16);
    // Writing into a String cannot fail.
    let _ = write_path_data(&mut out, path, precision);
    out
}

/// Returns the polyline `points` attribute for `path`.
#[must_use]
pub fn points_attribute(path: &ProjectedPath, precision: u32) -> String {
    let mut out = String::with_capacity(path.len() * 14);
    // Writing into a String cannot fail.
    let _ = write_points(&mut out, path, precision);
    out
}

/// Options for [`SvgDocument`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Significant digits for coordinates.
    pub precision: u32,
    /// Emit a draw-on CSS animation using the path's geometric length.
    pub animate: bool,
}

impl SvgOptions {
    /// Checks that the precision is within `1..=MAX_PRECISION`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidOptions`] otherwise.
    pub fn validate(&self) -> std::result::Result<(), RenderError> {
        if !(1..=MAX_PRECISION).contains(&self.precision) {
            return Err(RenderError::InvalidOptions(format!(
                "precision must be between 1 and {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            animate: true,
        }
    }
}

/// A standalone SVG document containing one stroked curve.
#[derive(Debug, Clone)]
pub struct SvgDocument<'a> {
    path: &'a ProjectedPath,
    viewport: f64,
    style: StrokeStyle,
    title: Option<&'a str>,
    options: SvgOptions,
}

impl<'a> SvgDocument<'a> {
    /// Creates a document for `path` sampled into a viewport of side `viewport`.
    ///
    /// # Errors
    ///
    /// Returns an error if `viewport` is not positive and finite.
    pub fn new(path: &'a ProjectedPath, viewport: f64, style: StrokeStyle) -> Result<Self> {
        if !(viewport > 0.0 && viewport.is_finite()) {
            return Err(RenderError::InvalidOptions(format!(
                "viewport size must be positive, got {viewport}"
            ))
            .into());
        }
        Ok(Self {
            path,
            viewport,
            style,
            title: None,
            options: SvgOptions::default(),
        })
    }

    /// Adds a `<title>` element.
    #[must_use]
    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the serialization options.
    ///
    /// # Errors
    ///
    /// Returns an error if the precision is out of range.
    pub fn with_options(mut self, options: SvgOptions) -> Result<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    /// Writes the document to a `fmt::Write` sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_to<W: fmt::Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{self}").map_err(RenderError::from)?;
        Ok(())
    }

    /// Writes the document to an `io::Write` sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_io<W: io::Write>(&self, out: &mut W) -> Result<()> {
        let mut buf = String::new();
        self.write_to(&mut buf)?;
        out.write_all(buf.as_bytes()).map_err(RenderError::from)?;
        Ok(())
    }

    fn write_frame<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let v = self.viewport;
        match self.style.frame() {
            FrameShape::Square => writeln!(
                out,
                r#"  <rect x="0" y="0" width="{v}" height="{v}" fill="none" stroke="lightgray"/>"#
            ),
            FrameShape::Circle => {
                let r = v / 2.0;
                writeln!(
                    out,
                    r#"  <circle cx="{r}" cy="{r}" r="{r}" fill="none" stroke="lightgray"/>"#
                )
            }
        }
    }
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.viewport;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {v} {v}" width="{v}" height="{v}">"#
        )?;
        if let Some(title) = self.title {
            writeln!(f, "  <title>{}</title>", escape_text(title))?;
        }
        self.write_frame(f)?;

        write!(
            f,
            r#"  <path fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
            self.style.color(),
            self.style.width()
        )?;
        if self.options.animate {
            let anim = DrawAnimation::new(round_significant(self.path.length(), self.options.precision));
            write!(
                f,
                r#" stroke-dasharray="{len} {len}" stroke-dashoffset="{len}""#,
                len = anim.length
            )?;
            write!(
                f,
                r#" style="animation: draw {}s ease-in-out forwards""#,
                anim.duration.as_secs_f64()
            )?;
        }
        f.write_str(r#" d=""#)?;
        write_path_data(f, self.path, self.options.precision)?;
        f.write_str("\"/>\n")?;

        if self.options.animate {
            writeln!(
                f,
                "  <style>@keyframes draw {{ to {{ stroke-dashoffset: 0; }} }}</style>"
            )?;
        }
        writeln!(f, "</svg>")
    }
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::CurveKind;
    use crate::math::Point2;

    fn mv(x: f64, y: f64) -> PathCommand {
        PathCommand::MoveTo(Point2::new(x, y))
    }

    fn ln(x: f64, y: f64) -> PathCommand {
        PathCommand::LineTo(Point2::new(x, y))
    }

    #[test]
    fn significant_digit_rounding() {
        assert_eq!(round_significant(950.0, 5).to_string(), "950");
        assert_eq!(round_significant(123.456_789, 5).to_string(), "123.46");
        assert_eq!(round_significant(0.000_123_456, 5).to_string(), "0.00012346");
        assert_eq!(round_significant(12_345_678.0, 5).to_string(), "12346000");
        assert_eq!(round_significant(-987.654_32, 5).to_string(), "-987.65");
        assert_eq!(round_significant(9.999_96, 5).to_string(), "10");
    }

    #[test]
    fn rounding_passes_through_special_values() {
        assert_eq!(round_significant(0.0, 5).to_string(), "0");
        assert_eq!(round_significant(-0.0, 5).to_string(), "0");
        assert!(round_significant(f64::NAN, 5).is_nan());
        assert!(round_significant(f64::NEG_INFINITY, 5).is_infinite());
    }

    #[test]
    fn rounding_uses_exact_decimal_value() {
        // 123.455 is stored as 123.45499999...
        assert_eq!(round_significant(123.455, 5).to_string(), "123.45");
        // 500.005 is stored as 500.00499999...
        assert_eq!(round_significant(500.005, 5).to_string(), "500");
        assert_eq!(round_significant(-123.455, 5).to_string(), "-123.45");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(round_significant(0.125, 2).to_string(), "0.13");
        assert_eq!(round_significant(2.5, 1).to_string(), "3");
        assert_eq!(round_significant(-2.5, 1).to_string(), "-3");
        assert_eq!(round_significant(999.5, 3).to_string(), "1000");
    }

    #[test]
    #[allow(overflowing_literals)]
    fn rounding_stays_finite_at_extremes() {
        assert_eq!(round_significant(1e-310, 5).to_bits(), 1e-310_f64.to_bits());
        assert_eq!(round_significant(f64::MAX, 5).to_bits(), 1.797_7e308_f64.to_bits());
        assert_eq!(round_significant(950.0, 400).to_string(), "950");
        assert_eq!(round_significant(123.456_789, 100).to_string(), "123.456789");
        assert_eq!(round_significant(1.234_567, 0).to_string(), "1");
    }

    #[test]
    fn path_data_marks_pen_lifts() {
        let path = ProjectedPath::new(vec![
            mv(950.0, 500.0),
            ln(949.5, 500.001),
            mv(-20.0, 1200.0),
            ln(10.0, 10.0),
        ]);
        assert_eq!(
            path_data(&path, 5),
            "M950 500 L949.5 500 M-20 1200 L10 10"
        );
    }

    #[test]
    fn points_attribute_joins_everything() {
        let path = ProjectedPath::new(vec![mv(1.0, 2.0), ln(3.5, 4.0), mv(5.0, 6.0)]);
        assert_eq!(points_attribute(&path, 5), "1 2,3.5 4,5 6");
    }

    #[test]
    fn empty_path_serializes_to_empty_strings() {
        let path = ProjectedPath::default();
        assert_eq!(path_data(&path, 5), "");
        assert_eq!(points_attribute(&path, 5), "");
    }

    #[test]
    fn document_for_parametric_curve() {
        let path = ProjectedPath::new(vec![mv(0.0, 0.0), ln(300.0, 400.0)]);
        let doc = SvgDocument::new(&path, 1000.0, StrokeStyle::for_kind(CurveKind::Parametric))
            .unwrap()
            .with_title("A & B");
        let svg = doc.to_string();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 1000 1000""#));
        assert!(svg.contains("<title>A &amp; B</title>"));
        assert!(svg.contains("<rect "));
        assert!(svg.contains(r#"stroke="green""#));
        assert!(svg.contains(r#"stroke-dasharray="500 500""#));
        assert!(svg.contains(r#"d="M0 0 L300 400""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn document_for_polar_curve_without_animation() {
        let path = ProjectedPath::new(vec![mv(10.0, 10.0), ln(20.0, 10.0)]);
        let doc = SvgDocument::new(&path, 200.0, StrokeStyle::for_kind(CurveKind::Polar))
            .unwrap()
            .with_options(SvgOptions {
                precision: 3,
                animate: false,
            })
            .unwrap();
        let svg = doc.to_string();
        assert!(svg.contains(r#"<circle cx="100" cy="100" r="100""#));
        assert!(svg.contains(r#"stroke="red""#));
        assert!(!svg.contains("stroke-dasharray"));
        assert!(!svg.contains("@keyframes"));
    }

    #[test]
    fn document_rejects_bad_viewport() {
        let path = ProjectedPath::default();
        let style = StrokeStyle::for_kind(CurveKind::Polar);
        assert!(SvgDocument::new(&path, 0.0, style).is_err());
        assert!(SvgDocument::new(&path, f64::NAN, style).is_err());
    }

    #[test]
    fn document_rejects_out_of_range_precision() {
        let path = ProjectedPath::default();
        let style = StrokeStyle::for_kind(CurveKind::Parametric);
        for precision in [0, MAX_PRECISION + 1] {
            let result = SvgDocument::new(&path, 100.0, style)
                .unwrap()
                .with_options(SvgOptions {
                    precision,
                    animate: true,
                });
            assert!(result.is_err(), "precision {precision}");
        }
        assert!(SvgOptions {
            precision: MAX_PRECISION,
            animate: false
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn write_io_matches_display() {
        let path = ProjectedPath::new(vec![mv(1.0, 1.0), ln(2.0, 2.0)]);
        let doc = SvgDocument::new(&path, 10.0, StrokeStyle::for_kind(CurveKind::Parametric)).unwrap();
        let mut buf = Vec::new();
        doc.write_io(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), doc.to_string());
    }
}
