use super::point::Point;
use super::trace::LineTrace;
use serde::{Deserialize, Serialize};

/// A line given by two points on it.
///
/// Most operations treat the line as infinite (`intersection`, `closest`,
/// `reflect`); `length` and `trace` use the segment between `a` and `b`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[inline]
    pub const fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.b - self.a).length()
    }

    /// Unnormalized direction `b - a`.
    #[inline]
    pub fn tangent(&self) -> Point {
        self.b - self.a
    }

    /// Unnormalized normal, the tangent rotated by 90 degrees.
    #[inline]
    pub fn normal(&self) -> Point {
        self.tangent().rotated90()
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        (self.a + self.b).scaled(0.5)
    }

    /// Intersection of the two (infinite) lines.
    ///
    /// Parallel lines have no intersection; the caller must not ask for one.
    /// Doing so divides by zero and yields non-finite coordinates.
    #[inline]
    pub fn intersection(&self, other: &Line) -> Point {
        let other_normal = other.normal();
        let tangent = self.tangent();
        let k = (other.a - self.a).dot(other_normal) / tangent.dot(other_normal);
        self.a.translated(tangent, k)
    }

    /// Moves both end points by `scale * p`.
    #[inline]
    pub fn translate(&mut self, p: Point, scale: f32) -> &mut Self {
        self.a.translate(p, scale);
        self.b.translate(p, scale);
        self
    }

    #[inline]
    pub fn translated(mut self, p: Point, scale: f32) -> Self {
        self.translate(p, scale);
        self
    }

    /// Cuts the line between two other lines: `a` becomes the intersection
    /// with `first`, `b` the intersection with `last`.
    #[inline]
    pub fn trim_to(&mut self, first: &Line, last: &Line) -> &mut Self {
        *self = self.trimmed_to(first, last);
        self
    }

    #[inline]
    pub fn trimmed_to(&self, first: &Line, last: &Line) -> Self {
        Self::new(self.intersection(first), self.intersection(last))
    }

    /// Point on the line closest to `point`.
    #[inline]
    pub fn closest(&self, point: Point) -> Point {
        let probe = Line::new(point, point + self.normal());
        self.intersection(&probe)
    }

    /// Reflects `point` across the line. `scale = 1` gives the mirror image,
    /// `scale = 0` projects onto the line.
    #[inline]
    pub fn reflect_scaled(&self, point: Point, scale: f32) -> Point {
        let foot = self.closest(point);
        point.translated(foot - point, 1.0 + scale)
    }

    #[inline]
    pub fn reflect(&self, point: Point) -> Point {
        self.reflect_scaled(point, 1.0)
    }

    /// Mirrors both end points across `mirror` in place.
    #[inline]
    pub fn mirror_across(&mut self, mirror: &Line) -> &mut Self {
        self.a = mirror.reflect(self.a);
        self.b = mirror.reflect(self.b);
        self
    }

    #[inline]
    pub fn mirrored_across(&self, mirror: &Line) -> Self {
        Self::new(mirror.reflect(self.a), mirror.reflect(self.b))
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }

    /// Integer pixels visited when stepping from `a` to `b`.
    #[inline]
    pub fn trace(&self) -> LineTrace {
        LineTrace::new(self)
    }
}
