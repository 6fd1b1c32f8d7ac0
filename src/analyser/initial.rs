//! Initial grid: a few strong, evenly spaced lines per series, read off the
//! accumulator.
//!
//! 1. The accumulator is blurred along theta and summed per column; the
//!    strongest column in `[90, 269]` is the first series direction. Its
//!    neighbourhood (and the same direction 180 degrees away) is cleared and
//!    the next strongest column gives the second direction.
//! 2. For each series, the row maxima over the direction band form a rho
//!    profile. Peaks are taken greedily, each flattened to its local median,
//!    until they fade below half of the previous one (at least
//!    `num_initial_lines`, at most `max_initial_lines`).
//! 3. Gaps of 1.5 median spacings or more are filled from the profile.
//! 4. The middle `num_initial_lines` lines are kept and converted to image
//!    space.
use super::pipeline::{check_accumulator, Analyser};
use crate::angle::same_direction;
use crate::error::{AnalysisError, AnalysisResult};
use crate::geom::{Line, Point, PolarLine};
use crate::raster::{
    box_filter, column_sums, correlate, find_max1, find_max_in_row, median_of,
    median_peak_remove, normalize_slice, row_max_in_band, set_range1,
};
use crate::types::Series;
use log::{debug, info, warn};
use std::time::Instant;

const DIRECTION_SEARCH: (isize, isize) = (90, 269);
const GAP_FACTOR: f32 = 1.5;
const PEAK_FADE: f32 = 0.5;

impl Analyser {
    pub fn compute_initial_grid(&mut self) -> AnalysisResult<()> {
        self.require_image()?;
        self.params.validate()?;
        if self.hough_image.is_empty() {
            self.compute_hough_image()?;
        }
        check_accumulator(&self.hough_image)?;
        info!("computing initial grid");
        let start = Instant::now();

        self.blurred_hough_image = correlate(&self.hough_image, &box_filter(5, 1));
        let mut profile = column_sums(&self.blurred_hough_image);
        normalize_slice(&mut profile, 0.0, 1.0);
        self.approx_theta = find_series_directions(
            &mut profile,
            self.params.approx_theta_remove_range as isize,
        );
        self.blurred_column_sum = profile;
        info!(
            "series directions: {} and {} degrees",
            self.approx_theta[0], self.approx_theta[1]
        );
        if same_direction(self.approx_theta[0], self.approx_theta[1]) {
            warn!(
                "both series point at {} degrees; the grid will be degenerate",
                self.approx_theta[0]
            );
        }

        for series in Series::BOTH {
            let s = series.index();
            let band = self.series_band(series);
            let mut rho_profile = row_max_in_band(&self.hough_image, band.0, band.1);
            let mut found = self.pick_peaks(series, &mut rho_profile)?;
            self.fill_gaps(series, &mut found, &mut rho_profile)?;
            let kept = middle(found, self.params.num_initial_lines);
            self.rho_profiles[s] = rho_profile;
            self.install_initial_lines(series, kept);
        }

        self.record("initial_grid", start);
        Ok(())
    }

    fn series_band(&self, series: Series) -> (isize, isize) {
        let theta = self.approx_theta[series.index()] as isize;
        let width = self.params.approx_series_width as isize;
        (theta - width, theta + width)
    }

    /// Greedy peak picking on a rho profile. Lines come back in accumulator
    /// coordinates (row, column).
    fn pick_peaks(
        &self,
        series: Series,
        profile: &mut [f32],
    ) -> AnalysisResult<Vec<PolarLine>> {
        let p = &self.params;
        let band = self.series_band(series);
        let approx = self.approx_theta[series.index()];
        let last = profile.len() as isize - 1;

        let mut found: Vec<PolarLine> = Vec::new();
        let mut previous_peak = 0.0f32;
        let mut real_peaks = 0usize;
        while let Some(rho) = find_max1(profile, 0, last) {
            let peak = profile[rho];
            if found.len() >= p.num_initial_lines && peak < PEAK_FADE * previous_peak {
                break;
            }
            if found.len() >= p.max_initial_lines {
                break;
            }
            median_peak_remove(profile, rho, p.median_peak_remove_width, 0.0);
            let theta =
                find_max_in_row(&self.hough_image, rho, band.0, band.1).unwrap_or(approx);
            found.push(PolarLine::new(rho as f32, theta as f32));
            if peak > 0.0 {
                real_peaks += 1;
            }
            previous_peak = peak;
        }

        if real_peaks < p.num_initial_lines {
            if p.strict_initial_grid {
                return Err(AnalysisError::InsufficientPeaks {
                    series,
                    found: real_peaks,
                    required: p.num_initial_lines,
                });
            }
            warn!(
                "series {series:?}: only {real_peaks} of {} peaks are positive",
                p.num_initial_lines
            );
        }
        Ok(found)
    }

    /// Sorts by rho and inserts a line into every gap of 1.5 median spacings
    /// or more. The new line sits at the profile maximum strictly inside the
    /// gap; a gap without interior rows stays as it is.
    fn fill_gaps(
        &self,
        series: Series,
        lines: &mut Vec<PolarLine>,
        profile: &mut [f32],
    ) -> AnalysisResult<()> {
        lines.sort_by(PolarLine::cmp_rho);
        let diffs: Vec<f32> = lines.windows(2).map(|w| w[1].rho - w[0].rho).collect();
        let spacing = median_of(diffs).abs();
        if spacing <= f32::EPSILON {
            warn!("series {series:?}: zero median spacing, not filling gaps");
        } else {
            self.insert_gap_lines(series, lines, profile, spacing);
        }

        if lines.len() > self.params.board_size {
            if self.params.strict_initial_grid {
                return Err(AnalysisError::TooManyInitialLines {
                    series,
                    count: lines.len(),
                    board_size: self.params.board_size,
                });
            }
            warn!(
                "series {series:?}: {} initial lines exceed the board size {}",
                lines.len(),
                self.params.board_size
            );
        }
        for line in lines.iter() {
            debug!(
                "series {series:?}: initial line rho={} theta={}",
                line.rho, line.theta
            );
        }
        Ok(())
    }

    fn insert_gap_lines(
        &self,
        series: Series,
        lines: &mut Vec<PolarLine>,
        profile: &mut [f32],
        spacing: f32,
    ) {
        let mut l = 0;
        while l + 1 < lines.len() {
            let (lo, hi) = (lines[l], lines[l + 1]);
            if (hi.rho - lo.rho).abs() < GAP_FACTOR * spacing {
                l += 1;
                continue;
            }
            let Some(rho) = find_max1(profile, lo.rho as isize + 1, hi.rho as isize - 1)
                .filter(|&r| (r as f32) > lo.rho && (r as f32) < hi.rho)
            else {
                l += 1;
                continue;
            };
            median_peak_remove(profile, rho, self.params.median_peak_remove_width, 0.0);
            let line = PolarLine::new(rho as f32, 0.5 * (lo.theta + hi.theta));
            debug!(
                "series {series:?}: filled gap at rho={} theta={:.2}",
                line.rho, line.theta
            );
            // Stay on `l`: the gap below the new line may still be too wide.
            lines.insert(l + 1, line);
        }
    }

    /// Accumulator coordinates to image-space lines.
    fn install_initial_lines(&mut self, series: Series, kept: Vec<PolarLine>) {
        let s = series.index();
        let rho_max = (self.hough_image.h / 2) as f32;
        let centre = Point::new((self.image.w / 2) as f32, (self.image.h / 2) as f32);
        self.initial_lines[s] = kept
            .into_iter()
            .map(|l| PolarLine::new(l.rho - rho_max, l.theta.to_radians()))
            .collect();
        self.lines[s] = self.initial_lines[s]
            .iter()
            .map(|&polar| Line::from(polar).translated(centre, 1.0))
            .collect();
    }
}

/// Two strongest directions in `[90, 269]`. The profile is modified: the
/// first direction is cleared `± remove_range` around it and 180 degrees
/// either side.
fn find_series_directions(profile: &mut [f32], remove_range: isize) -> [usize; 2] {
    let (lo, hi) = DIRECTION_SEARCH;
    let first = find_max1(profile, lo, hi).unwrap_or(lo as usize);
    let t = first as isize;
    for shift in [0, 180, -180] {
        set_range1(profile, t - remove_range + shift, t + remove_range + shift, 0.0);
    }
    let second = find_max1(profile, lo, hi).unwrap_or(lo as usize);
    [first, second]
}

/// The `count` lines in the middle of `lines` (offset `(len - count) / 2`).
fn middle(lines: Vec<PolarLine>, count: usize) -> Vec<PolarLine> {
    let offset = lines.len().saturating_sub(count) / 2;
    lines.into_iter().skip(offset).take(count).collect()
}
