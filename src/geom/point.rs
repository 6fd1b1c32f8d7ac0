use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A point (or free vector) in image pixel space.
///
/// The same type doubles as a 2-D vector: differences of points, normals and
/// tangents are all `Point`s. Every in-place method has a value-returning
/// twin (`scale`/`scaled`, `normalize`/`normalized`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rotates the vector by 90 degrees in place: `(x, y) -> (y, -x)`.
    #[inline]
    pub fn rotate90(&mut self) -> &mut Self {
        *self = self.rotated90();
        self
    }

    #[inline]
    pub fn rotated90(self) -> Self {
        Self::new(self.y, -self.x)
    }

    #[inline]
    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Adds `scale * p` in place.
    #[inline]
    pub fn translate(&mut self, p: Point, scale: f32) -> &mut Self {
        self.x += scale * p.x;
        self.y += scale * p.y;
        self
    }

    #[inline]
    pub fn translated(self, p: Point, scale: f32) -> Self {
        Self::new(self.x + scale * p.x, self.y + scale * p.y)
    }

    #[inline]
    pub fn scale(&mut self, s: f32) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    #[inline]
    pub fn scaled(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// Angle of the vector in radians, as returned by `atan2(y, x)`.
    ///
    /// The angle of `(0, 0)` is whatever `f32::atan2` yields for it.
    #[inline]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Scales the vector to unit length in place.
    ///
    /// The zero vector has no direction; its coordinates become NaN.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        self.x /= len;
        self.y /= len;
        self
    }

    #[inline]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Weighted mean `weight * p1 + (1 - weight) * p2`.
///
/// `mean(p1, p2, 0.3)` lies 70% of the way from `p1` towards `p2`.
#[inline]
pub fn mean(p1: Point, p2: Point, weight: f32) -> Point {
    p1.translated(p2 - p1, 1.0 - weight)
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.translate(rhs, 1.0);
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Point) {
        self.translate(rhs, -1.0);
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f32) -> Point {
        self.scaled(rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<Point2<f32>> for Point {
    fn from(p: Point2<f32>) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for Point2<f32> {
    fn from(p: Point) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl From<Vector2<f32>> for Point {
    fn from(v: Vector2<f32>) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for Vector2<f32> {
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl From<[f32; 2]> for Point {
    fn from(p: [f32; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}
