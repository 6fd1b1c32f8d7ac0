use super::line::Line;
use super::point::Point;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A line as the signed distance `rho` from the origin and the angle
/// `theta` of its normal.
///
/// Neither field is range-restricted. In geometry `theta` is in radians; the
/// Hough stage stores accumulator coordinates (row index and column index in
/// degrees) in the same type before converting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarLine {
    pub rho: f32,
    pub theta: f32,
}

impl PolarLine {
    #[inline]
    pub const fn new(rho: f32, theta: f32) -> Self {
        Self { rho, theta }
    }

    /// Orders lines by `rho` alone; used to keep a line series sorted by
    /// position.
    #[inline]
    pub fn cmp_rho(&self, other: &Self) -> Ordering {
        self.rho.total_cmp(&other.rho)
    }
}

impl From<&Line> for PolarLine {
    fn from(line: &Line) -> Self {
        let foot = line.closest(Point::ORIGIN);
        Self::new(foot.length(), foot.angle())
    }
}

impl From<Line> for PolarLine {
    fn from(line: Line) -> Self {
        Self::from(&line)
    }
}

impl From<PolarLine> for Line {
    /// `a` is the foot of the normal from the origin; `b` is one unit along
    /// the line from it.
    fn from(line: PolarLine) -> Self {
        let normal = Point::new(line.theta.cos(), line.theta.sin());
        let a = normal.scaled(line.rho);
        Line::new(a, a + normal.rotated90())
    }
}
