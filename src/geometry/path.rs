use std::slice;

use crate::math::Point2;

/// A single drawing instruction in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Lift the pen and start a new subpath at the point.
    MoveTo(Point2),
    /// Stroke a straight segment from the previous point.
    LineTo(Point2),
}

impl PathCommand {
    /// Returns the target point of the instruction.
    #[must_use]
    pub fn point(&self) -> Point2 {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => p,
        }
    }

    /// Returns whether this is a pen-lift.
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Self::MoveTo(_))
    }
}

/// Axis-aligned bounds of a projected path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

/// Ordered `MoveTo`/`LineTo` sequence produced by sampling a curve.
///
/// This is the contract between the sampler and any renderer: a canvas
/// backend replays it as stroke calls, a vector backend serializes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedPath {
    commands: Vec<PathCommand>,
}

impl ProjectedPath {
    /// Creates a path from an instruction sequence.
    #[must_use]
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, PathCommand> {
        self.commands.iter()
    }

    /// Splits the path into subpaths, each starting at a `MoveTo`.
    ///
    /// A leading `LineTo` (only possible for hand-built paths) opens the first
    /// subpath on its own.
    pub fn subpaths(&self) -> impl Iterator<Item = &[PathCommand]> + '_ {
        let mut rest = self.commands.as_slice();
        std::iter::from_fn(move || {
            if rest.is_empty() {
                return None;
            }
            let end = rest
                .iter()
                .skip(1)
                .position(PathCommand::is_move)
                .map_or(rest.len(), |i| i + 1);
            let (head, tail) = rest.split_at(end);
            rest = tail;
            Some(head)
        })
    }

    /// Returns the number of pen-lifts after the first instruction.
    #[must_use]
    pub fn pen_lifts(&self) -> usize {
        self.commands.iter().skip(1).filter(|c| c.is_move()).count()
    }

    /// Computes the stroked geometric length.
    ///
    /// Each `LineTo` contributes its distance from the previous point;
    /// pen-lifts contribute nothing.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.commands
            .windows(2)
            .filter_map(|pair| match pair[1] {
                PathCommand::LineTo(to) => Some((to - pair[0].point()).norm()),
                PathCommand::MoveTo(_) => None,
            })
            .sum()
    }

    /// Returns the bounds of every instruction point, or `None` for an empty path.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut iter = self.commands.iter().map(PathCommand::point);
        let first = iter.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }
}

impl<'a> IntoIterator for &'a ProjectedPath {
    type Item = &'a PathCommand;
    type IntoIter = slice::Iter<'a, PathCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mv(x: f64, y: f64) -> PathCommand {
        PathCommand::MoveTo(Point2::new(x, y))
    }

    fn ln(x: f64, y: f64) -> PathCommand {
        PathCommand::LineTo(Point2::new(x, y))
    }

    #[test]
    fn length_of_straight_run() {
        let path = ProjectedPath::new(vec![mv(0.0, 0.0), ln(3.0, 4.0), ln(3.0, 10.0)]);
        assert_relative_eq!(path.length(), 11.0);
    }

    #[test]
    fn pen_lifts_add_no_length() {
        let path = ProjectedPath::new(vec![
            mv(0.0, 0.0),
            ln(3.0, 4.0),
            mv(100.0, 100.0),
            ln(100.0, 101.0),
        ]);
        assert_relative_eq!(path.length(), 6.0);
        assert_eq!(path.pen_lifts(), 1);
    }

    #[test]
    fn empty_path() {
        let path = ProjectedPath::default();
        assert!(path.is_empty());
        assert_relative_eq!(path.length(), 0.0);
        assert!(path.bounds().is_none());
        assert_eq!(path.subpaths().count(), 0);
    }

    #[test]
    fn subpaths_split_at_moves() {
        let path = ProjectedPath::new(vec![
            mv(0.0, 0.0),
            ln(1.0, 0.0),
            mv(5.0, 5.0),
            mv(6.0, 6.0),
            ln(7.0, 6.0),
        ]);
        let lens: Vec<usize> = path.subpaths().map(<[PathCommand]>::len).collect();
        assert_eq!(lens, vec![2, 1, 2]);
        assert!(path.subpaths().all(|s| s[0].is_move()));
    }

    #[test]
    fn bounds_cover_all_points() {
        let path = ProjectedPath::new(vec![mv(2.0, -1.0), ln(-3.0, 4.0), mv(10.0, 0.5)]);
        let b = path.bounds().unwrap();
        assert_eq!(b.min, Point2::new(-3.0, -1.0));
        assert_eq!(b.max, Point2::new(10.0, 4.0));
    }
}
