use super::line::Line;
use super::point::Point;
use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};

/// Intersection points of two line series.
///
/// Row `i` holds the intersections of `rows[i]` with every line of `cols`,
/// so the grid is `rows.len() × cols.len()`. The grid is derived data and is
/// rebuilt whenever the lines change.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    points: DMatrix<Point>,
}

impl Grid {
    /// A `nrows × ncols` grid filled with the origin.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            points: DMatrix::from_element(nrows, ncols, Point::ORIGIN),
        }
    }

    pub fn from_series(rows: &[Line], cols: &[Line]) -> Self {
        Self {
            points: DMatrix::from_fn(rows.len(), cols.len(), |i, j| {
                rows[i].intersection(&cols[j])
            }),
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.points.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.points.ncols()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounds-checked access; `None` outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Point> {
        self.points.get((row, col))
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Point> {
        self.points.get_mut((row, col))
    }

    pub fn as_matrix(&self) -> &DMatrix<Point> {
        &self.points
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Point;

    /// Panics when the cell is outside the grid.
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Point {
        &self.points[(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Point {
        &mut self.points[(row, col)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(y: f32) -> Line {
        Line::from_coords(0.0, y, 1.0, y)
    }

    fn vertical(x: f32) -> Line {
        Line::from_coords(x, 0.0, x, 1.0)
    }

    #[test]
    fn grid_has_one_cell_per_line_pair() {
        let rows = [horizontal(1.0), horizontal(4.0), horizontal(9.0)];
        let cols = [vertical(2.0), vertical(5.0)];
        let grid = Grid::from_series(&rows, &cols);
        assert_eq!(grid.nrows(), 3);
        assert_eq!(grid.ncols(), 2);
        assert_eq!(grid.len(), 6);
        for (i, r) in rows.iter().enumerate() {
            for (j, c) in cols.iter().enumerate() {
                assert_eq!(grid[(i, j)], r.intersection(c));
            }
        }
        assert_eq!(grid[(2, 1)], Point::new(5.0, 9.0));
    }

    #[test]
    fn get_is_bounds_checked() {
        let grid = Grid::from_series(&[horizontal(1.0)], &[vertical(1.0)]);
        assert!(grid.get(0, 0).is_some());
        assert!(grid.get(1, 0).is_none());
        assert!(grid.get(0, 1).is_none());
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds_panics() {
        let grid = Grid::new(2, 2);
        let _ = grid[(2, 0)];
    }
}
