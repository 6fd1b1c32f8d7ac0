//! Integer pixel trace of a line segment.
//!
//! The trace steps along the longer of the two axis deltas in unit
//! increments and rounds each sample to the nearest pixel (`floor(v + 0.5)`),
//! giving `floor(max(|dx|, |dy|)) + 1` samples. A segment whose end points
//! round to the same pixel yields that single pixel; a segment with a
//! non-finite end point yields nothing.
//!
//! [`LineTrace::within`] restricts the step range to the samples that fall
//! inside a `w × h` raster. The visited pixels are exactly the in-bounds
//! samples of the unrestricted trace, but the cost is bounded by the raster
//! size even for the enormous segments that near-parallel intersections
//! produce.
use super::line::Line;
use super::point::Point;

#[inline]
fn round_px(v: f32) -> i64 {
    (v + 0.5).floor() as i64
}

#[derive(Clone, Debug)]
pub struct LineTrace {
    origin: Point,
    step: Point,
    next: u64,
    end: u64,
    bounds: Option<(i64, i64)>,
}

impl LineTrace {
    pub fn new(line: &Line) -> Self {
        let (a, b) = (line.a, line.b);
        if !a.is_finite() || !b.is_finite() {
            return Self::with_steps(a, Point::ORIGIN, 0);
        }
        if round_px(a.x) == round_px(b.x) && round_px(a.y) == round_px(b.y) {
            return Self::with_steps(a, Point::ORIGIN, 1);
        }
        let delta = b - a;
        let div = delta.x.abs().max(delta.y.abs());
        let steps = (div.floor() as u64).saturating_add(1);
        Self::with_steps(a, delta.scaled(1.0 / div), steps)
    }

    fn with_steps(origin: Point, step: Point, end: u64) -> Self {
        Self {
            origin,
            step,
            next: 0,
            end,
            bounds: None,
        }
    }

    /// Number of samples not yet visited, in-bounds or not.
    #[inline]
    pub fn sample_count(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }

    /// Keeps only the samples inside `[0, w) × [0, h)`.
    pub fn within(mut self, w: usize, h: usize) -> Self {
        let rx = axis_steps(self.origin.x, self.step.x, w);
        let ry = axis_steps(self.origin.y, self.step.y, h);
        match (rx, ry) {
            (Some((x0, x1)), Some((y0, y1))) => {
                let lo = x0.max(y0);
                let hi = x1.min(y1);
                if hi < lo || hi < 0.0 {
                    self.end = self.next;
                } else {
                    let lo = lo.max(0.0) as u64;
                    let hi = if hi >= u64::MAX as f64 {
                        u64::MAX
                    } else {
                        (hi as u64).saturating_add(1)
                    };
                    self.next = self.next.max(lo);
                    self.end = self.end.min(hi);
                }
            }
            _ => self.end = self.next,
        }
        self.bounds = Some((w as i64, h as i64));
        self
    }

    #[inline]
    fn sample(&self, i: u64) -> (i64, i64) {
        let t = i as f32;
        (
            round_px(self.origin.x + t * self.step.x),
            round_px(self.origin.y + t * self.step.y),
        )
    }
}

/// Conservative range of step indices whose coordinate along one axis can
/// round into `[0, size)`. One extra step of slack on each side absorbs
/// floating-point error; the iterator still checks every sample.
fn axis_steps(origin: f32, step: f32, size: usize) -> Option<(f64, f64)> {
    if size == 0 {
        return None;
    }
    let lo_v = -0.5f64;
    let hi_v = size as f64 - 0.5;
    let (o, d) = (origin as f64, step as f64);
    if d == 0.0 {
        return (o >= lo_v && o < hi_v).then_some((f64::NEG_INFINITY, f64::INFINITY));
    }
    let t1 = (lo_v - o) / d;
    let t2 = (hi_v - o) / d;
    Some((t1.min(t2).floor() - 1.0, t1.max(t2).ceil() + 1.0))
}

impl Iterator for LineTrace {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.end {
            let i = self.next;
            self.next += 1;
            let (x, y) = self.sample(i);
            if let Some((w, h)) = self.bounds {
                if x < 0 || y < 0 || x >= w || y >= h {
                    continue;
                }
            }
            return Some((x, y));
        }
        None
    }
}
