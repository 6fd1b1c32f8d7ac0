//! Growing the initial grid one line at a time until both series reach the
//! board size.
use super::pipeline::Analyser;
use crate::error::AnalysisResult;
use crate::geom::{mean, Grid, Line};
use crate::raster::PixelSum;
use crate::types::Series;
use log::{debug, info, warn};
use std::time::Instant;

impl Analyser {
    /// Mean line-image value on the crossing lines just outside `next_line`,
    /// on the side of `new_line`.
    ///
    /// For every line of `crossing`, the sampled segment runs from halfway
    /// between `new_line` and `next_line` to `next_line`.
    pub fn score_new_line(&self, new_line: &Line, next_line: &Line, crossing: &[Line]) -> f32 {
        let grid = Grid::from_series(&[*new_line, *next_line], crossing);
        let mut sum = PixelSum::default();
        for j in 0..grid.ncols() {
            let edge = grid[(1, j)];
            let half = mean(grid[(0, j)], edge, 0.5);
            sum.add_line(&self.line_image, &Line::new(half, edge));
        }
        sum.mean()
    }

    /// Extend `series` by one line on whichever side looks more like board.
    ///
    /// The candidates mirror the second line from each end across the end
    /// line. Returns whether a line was added; a full series, or a series
    /// with fewer than two lines on either side, is left alone.
    pub fn add_best_line(&mut self, series: Series) -> AnalysisResult<bool> {
        if self.line_image.is_empty() {
            self.compute_line_images()?;
        }
        let (s, o) = (series.index(), series.other().index());
        let (own, crossing) = (&self.lines[s], &self.lines[o]);
        if own.len() >= self.params.board_size {
            return Ok(false);
        }
        if own.len() < 2 || crossing.len() < 2 {
            warn!(
                "series {series:?}: cannot grow {} lines against {} crossing lines",
                own.len(),
                crossing.len()
            );
            return Ok(false);
        }

        let last = own.len() - 1;
        let front = own[1].mirrored_across(&own[0]);
        let back = own[last - 1].mirrored_across(&own[last]);
        let score_front = self.score_new_line(&front, &own[0], crossing);
        let score_back = self.score_new_line(&back, &own[last], crossing);
        debug!("series {series:?}: front score {score_front:.4}, back score {score_back:.4}");

        let lines = &mut self.lines[s];
        if score_front > score_back {
            lines.insert(0, front);
        } else {
            lines.push(back);
        }
        Ok(true)
    }

    /// Alternate tuning and growth until both series hold `board_size`
    /// lines, then tune once more. With `only_once` a single growth step is
    /// taken, which lets callers watch the grid grow.
    pub fn grow_grid(&mut self, only_once: bool) -> AnalysisResult<()> {
        self.require_image()?;
        if self.lines.iter().any(Vec::is_empty) {
            self.compute_initial_grid()?;
        }
        info!("growing the grid");
        let start = Instant::now();
        let size = self.params.board_size;

        while self.lines.iter().any(|l| l.len() < size) {
            self.tune_grid()?;
            let mut grew = false;
            for series in Series::BOTH {
                if self.lines[series.index()].len() < size {
                    grew |= self.add_best_line(series)?;
                }
            }
            if !grew {
                warn!(
                    "grid stopped growing at {}+{} lines",
                    self.lines[0].len(),
                    self.lines[1].len()
                );
                break;
            }
            if only_once {
                break;
            }
        }
        self.tune_grid()?;

        self.record("grow_grid", start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyser::AnalyserParams;
    use crate::image::ImageF32;
    use crate::raster::draw_line;

    /// Light 100×100 image with dark lines at x, y = 40, 50, .., 80 drawn
    /// only inside that square.
    fn board_corner() -> Analyser {
        let mut img = ImageF32::filled(100, 100, 1.0);
        for c in [40.0f32, 50.0, 60.0, 70.0, 80.0] {
            draw_line(&mut img, &Line::from_coords(c, 40.0, c, 80.0), 0.0);
            draw_line(&mut img, &Line::from_coords(40.0, c, 80.0, c), 0.0);
        }
        let mut a = Analyser::new(AnalyserParams::default());
        a.reset(img).unwrap();
        a.compute_line_images().unwrap();
        a
    }

    fn vertical(x: f32) -> Line {
        Line::from_coords(x, 0.0, x, 99.0)
    }

    fn horizontal(y: f32) -> Line {
        Line::from_coords(0.0, y, 99.0, y)
    }

    #[test]
    fn add_best_line_grows_by_exactly_one() {
        let mut a = board_corner();
        a.set_lines(Series::First, vec![vertical(40.0), vertical(50.0)]);
        a.set_lines(Series::Second, vec![horizontal(40.0), horizontal(50.0)]);
        assert!(a.add_best_line(Series::First).unwrap());
        assert_eq!(a.lines(Series::First).len(), 3);
        assert_eq!(a.lines(Series::Second).len(), 2);
    }

    #[test]
    fn add_best_line_prefers_the_board_side() {
        let mut a = board_corner();
        a.set_lines(Series::First, vec![vertical(40.0), vertical(50.0)]);
        a.set_lines(Series::Second, vec![horizontal(40.0), horizontal(50.0)]);
        a.add_best_line(Series::First).unwrap();
        let added = a.lines(Series::First)[2];
        assert!((added.a.x - 60.0).abs() < 1e-3, "added={added:?}");

        // The board lies below the second series, so growth goes to the back.
        let front = horizontal(30.0);
        let back = horizontal(60.0);
        let crossing = a.lines(Series::First).to_vec();
        let next_front = a.lines(Series::Second)[0];
        let next_back = a.lines(Series::Second)[1];
        assert!(
            a.score_new_line(&back, &next_back, &crossing)
                > a.score_new_line(&front, &next_front, &crossing)
        );
    }

    #[test]
    fn full_or_short_series_are_left_alone() {
        let mut a = board_corner();
        a.params.board_size = 2;
        a.set_lines(Series::First, vec![vertical(40.0), vertical(50.0)]);
        a.set_lines(Series::Second, vec![horizontal(40.0)]);
        assert!(!a.add_best_line(Series::First).unwrap());
        a.params.board_size = 19;
        assert!(!a.add_best_line(Series::First).unwrap());
        assert_eq!(a.lines(Series::First).len(), 2);
    }

    #[test]
    fn single_growth_step() {
        let mut a = board_corner();
        a.params.board_size = 5;
        a.set_lines(Series::First, vec![vertical(50.0), vertical(60.0), vertical(70.0)]);
        a.set_lines(
            Series::Second,
            vec![horizontal(50.0), horizontal(60.0), horizontal(70.0)],
        );
        a.grow_grid(true).unwrap();
        assert_eq!(a.lines(Series::First).len(), 4);
        assert_eq!(a.lines(Series::Second).len(), 4);

        a.grow_grid(false).unwrap();
        let mut xs: Vec<f32> = a.lines(Series::First).iter().map(|l| l.a.x).collect();
        xs.sort_by(|p, q| p.total_cmp(q));
        for (x, want) in xs.iter().zip([40.0, 50.0, 60.0, 70.0, 80.0]) {
            assert!((x - want).abs() < 1.0, "xs={xs:?}");
        }
    }
}
