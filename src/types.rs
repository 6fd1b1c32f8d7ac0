use crate::geom::{Line, Point};
use serde::{Deserialize, Serialize};

/// One of the two families of parallel board lines.
///
/// `First` is the family whose Hough peak is found first (the stronger one).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Series {
    First,
    Second,
}

impl Series {
    pub const BOTH: [Series; 2] = [Series::First, Series::Second];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Series::First => 0,
            Series::Second => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Series {
        match self {
            Series::First => Series::Second,
            Series::Second => Series::First,
        }
    }
}

/// Final line sets of both series, in positional order and trimmed to each
/// other.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BoardLines {
    pub series: [Vec<Line>; 2],
}

impl BoardLines {
    pub fn lines(&self, series: Series) -> &[Line] {
        &self.series[series.index()]
    }

    /// First and last line of a series, `None` if it holds fewer than two.
    pub fn boundary(&self, series: Series) -> Option<(Line, Line)> {
        let lines = self.lines(series);
        match lines {
            [first, .., last] => Some((*first, *last)),
            _ => None,
        }
    }

    /// Grid corners, clockwise from the first end point of the first line of
    /// [`Series::First`]: `first.a`, `first.b`, `last.b`, `last.a`.
    pub fn corners(&self) -> Option<[Point; 4]> {
        let (first, last) = self.boundary(Series::First)?;
        Some([first.a, first.b, last.b, last.a])
    }

    /// End points of the first and last line of [`Series::First`] rounded to
    /// pixels: `[x1, y1, x2, y2, x3, y3, x4, y4]`. `None` when either line
    /// has non-finite end points.
    pub fn boundary_coords(&self) -> Option<[i32; 8]> {
        let (first, last) = self.boundary(Series::First)?;
        if !first.is_finite() || !last.is_finite() {
            return None;
        }
        let px = |v: f32| (v + 0.5).floor() as i32;
        Some([
            px(first.a.x),
            px(first.a.y),
            px(first.b.x),
            px(first.b.y),
            px(last.a.x),
            px(last.a.y),
            px(last.b.x),
            px(last.b.y),
        ])
    }

    pub fn is_complete(&self, board_size: usize) -> bool {
        self.series.iter().all(|s| s.len() == board_size)
    }
}
