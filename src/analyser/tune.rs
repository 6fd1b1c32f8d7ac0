//! Local refinement of the working lines against the line image.
use super::pipeline::Analyser;
use crate::error::AnalysisResult;
use crate::geom::{mean, Line};
use crate::image::ImageF32;
use crate::raster::line_sum;
use crate::types::Series;
use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Weight of the current line when placing the search segments between it
/// and its neighbours.
const NEIGHBOUR_WEIGHT: f32 = 0.3;

/// Candidate end points sampled along a search segment: two per pixel of
/// length, at least 2 and at most `max_points`.
fn candidate_count(segment: &Line, max_points: usize) -> usize {
    let len = segment.length();
    let cap = max_points.max(2);
    if !len.is_finite() {
        return 2;
    }
    ((len * 2.0).round() as usize).clamp(2, cap)
}

/// Brute-force search for the line with the largest pixel sum whose first
/// end point lies on `d1` and second end point on `d2`.
///
/// Ties keep the first candidate in `(i1, i2)` order. `None` only when no
/// candidate produced a comparable sum.
pub fn tune_line(img: &ImageF32, d1: &Line, d2: &Line, max_points: usize) -> Option<Line> {
    let n1 = candidate_count(d1, max_points);
    let n2 = candidate_count(d2, max_points);
    let (den1, den2) = ((n1 - 1) as f32, (n2 - 1) as f32);

    let best_for = |i1: usize| -> Option<(f32, Line)> {
        let a = mean(d1.a, d1.b, i1 as f32 / den1);
        let mut best: Option<(f32, Line)> = None;
        for i2 in 0..n2 {
            let test = Line::new(a, mean(d2.a, d2.b, i2 as f32 / den2));
            let value = line_sum(img, &test);
            if value > best.map_or(-1.0, |(v, _)| v) {
                best = Some((value, test));
            }
        }
        best
    };

    #[cfg(feature = "parallel")]
    let per_row: Vec<Option<(f32, Line)>> = (0..n1).into_par_iter().map(best_for).collect();
    #[cfg(not(feature = "parallel"))]
    let per_row: Vec<Option<(f32, Line)>> = (0..n1).map(best_for).collect();

    let mut best: Option<(f32, Line)> = None;
    for (value, line) in per_row.into_iter().flatten() {
        if value > best.map_or(-1.0, |(v, _)| v) {
            best = Some((value, line));
        }
    }
    best.map(|(_, line)| line)
}

impl Analyser {
    /// Cut every line at the first and last line of the other series.
    pub fn fix_end_points(&mut self) {
        for series in Series::BOTH {
            let (s, o) = (series.index(), series.other().index());
            let (Some(&first), Some(&last)) = (self.lines[o].first(), self.lines[o].last()) else {
                continue;
            };
            for line in self.lines[s].iter_mut() {
                line.trim_to(&first, &last);
            }
        }
    }

    /// Tune a single line, searching end points along `d1` and `d2`. The line
    /// is left untouched when the search yields nothing.
    pub fn tune_line(&self, line: &mut Line, d1: &Line, d2: &Line) {
        if let Some(best) = tune_line(&self.line_image, d1, d2, self.params.max_tune_points) {
            *line = best;
        }
    }

    /// One refinement sweep over both series.
    ///
    /// Each line may move 30% of the way towards either neighbour; the outer
    /// lines use their inner neighbour mirrored across them as the missing
    /// one. Lines are tuned in order and later lines see the already tuned
    /// ones.
    pub fn tune_grid(&mut self) -> AnalysisResult<()> {
        if self.line_image.is_empty() {
            self.compute_line_images()?;
        }
        self.fix_end_points();

        for series in Series::BOTH {
            let (s, o) = (series.index(), series.other().index());
            let n = self.lines[s].len();
            let others = &self.lines[o];
            if n < 2 || others.len() < 2 {
                warn!(
                    "series {series:?}: cannot tune {n} lines against {} crossing lines",
                    others.len()
                );
                continue;
            }
            let (first, last) = (others[0], others[others.len() - 1]);

            for l in 0..n {
                let cur = self.lines[s][l];
                let prev = if l > 0 {
                    self.lines[s][l - 1]
                } else {
                    self.lines[s][1]
                        .mirrored_across(&cur)
                        .trimmed_to(&first, &last)
                };
                let next = if l + 1 < n {
                    self.lines[s][l + 1]
                } else {
                    self.lines[s][l - 1]
                        .mirrored_across(&cur)
                        .trimmed_to(&first, &last)
                };
                let d1 = Line::new(
                    mean(prev.a, cur.a, NEIGHBOUR_WEIGHT),
                    mean(next.a, cur.a, NEIGHBOUR_WEIGHT),
                );
                let d2 = Line::new(
                    mean(prev.b, cur.b, NEIGHBOUR_WEIGHT),
                    mean(next.b, cur.b, NEIGHBOUR_WEIGHT),
                );
                let mut tuned = cur;
                self.tune_line(&mut tuned, &d1, &d2);
                self.lines[s][l] = tuned;
            }
            debug!("series {series:?}: tuned {n} lines");
        }

        self.fix_end_points();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyser::AnalyserParams;
    use crate::raster::draw_line;

    #[test]
    fn candidate_count_is_bounded() {
        let short = Line::from_coords(0.0, 0.0, 0.2, 0.0);
        assert_eq!(candidate_count(&short, 512), 2);
        let long = Line::from_coords(0.0, 0.0, 10.0, 0.0);
        assert_eq!(candidate_count(&long, 512), 20);
        assert_eq!(candidate_count(&long, 8), 8);
        let huge = Line::from_coords(0.0, 0.0, f32::INFINITY, 0.0);
        assert_eq!(candidate_count(&huge, 512), 2);
    }

    #[test]
    fn tune_line_snaps_to_the_ridge() {
        let mut img = ImageF32::new(40, 40);
        draw_line(&mut img, &Line::from_coords(22.0, 0.0, 22.0, 39.0), 1.0);
        let d1 = Line::from_coords(16.0, 0.0, 26.0, 0.0);
        let d2 = Line::from_coords(16.0, 39.0, 26.0, 39.0);
        let best = tune_line(&img, &d1, &d2, 512).unwrap();
        assert!((best.a.x - 22.0).abs() < 0.5, "best={best:?}");
        assert!((best.b.x - 22.0).abs() < 0.5, "best={best:?}");
    }

    #[test]
    fn tune_line_on_blank_image_keeps_first_candidate() {
        let img = ImageF32::new(10, 10);
        let d1 = Line::from_coords(1.0, 0.0, 5.0, 0.0);
        let d2 = Line::from_coords(1.0, 9.0, 5.0, 9.0);
        let best = tune_line(&img, &d1, &d2, 512).unwrap();
        // mean(.., .., 0) is the second end point of each search segment.
        assert_eq!(best, Line::from_coords(5.0, 0.0, 5.0, 9.0));
    }

    #[test]
    fn tune_grid_recentres_shifted_lines() {
        let mut img = ImageF32::filled(60, 60, 1.0);
        for c in [10.0f32, 20.0, 30.0, 40.0, 50.0] {
            draw_line(&mut img, &Line::from_coords(c, 0.0, c, 59.0), 0.0);
            draw_line(&mut img, &Line::from_coords(0.0, c, 59.0, c), 0.0);
        }
        let mut a = Analyser::new(AnalyserParams::default());
        a.reset(img).unwrap();
        let vertical = |x: f32| Line::from_coords(x, 0.0, x, 59.0);
        let horizontal = |y: f32| Line::from_coords(0.0, y, 59.0, y);
        a.set_lines(
            Series::First,
            vec![vertical(21.0), vertical(29.0), vertical(41.0)],
        );
        a.set_lines(
            Series::Second,
            vec![horizontal(20.0), horizontal(30.0), horizontal(40.0)],
        );
        a.tune_grid().unwrap();

        for (line, x) in a.lines(Series::First).iter().zip([20.0, 30.0, 40.0]) {
            assert!((line.a.x - x).abs() < 0.6, "line={line:?} expected x={x}");
            assert!((line.b.x - x).abs() < 0.6, "line={line:?} expected x={x}");
        }
        // End points are cut at the outer crossing lines.
        let first = a.lines(Series::First)[0];
        assert!((first.a.y - 20.0).abs() < 0.6 && (first.b.y - 40.0).abs() < 0.6);
    }
}
