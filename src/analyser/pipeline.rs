//! The stateful analysis session.
//!
//! ```no_run
//! use board_grid::{Analyser, AnalyserParams, Series};
//! use board_grid::image::ImageF32;
//!
//! # fn example(image: ImageF32) -> Result<(), board_grid::AnalysisError> {
//! let mut analyser = Analyser::new(AnalyserParams::default());
//! analyser.reset(image)?;
//! analyser.analyse()?;
//! for line in analyser.lines(Series::First) {
//!     println!("{:?} -> {:?}", line.a, line.b);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::AnalyserParams;
use crate::diagnostics::{AnalysisReport, InputDescriptor, TimingBreakdown};
use crate::error::{AnalysisError, AnalysisResult};
use crate::geom::{Line, PolarLine};
use crate::hough::hough_full_circle;
use crate::image::ImageF32;
use crate::raster::{correlate, normalize, peak_filter, weight_gaussian, zero_negatives};
use crate::types::{BoardLines, Series};
use log::{debug, info};
use std::time::Instant;

/// Narrowest accumulator the initial grid search can work on: the direction
/// search scans columns 90..=269.
pub(crate) const MIN_ACCUMULATOR_WIDTH: usize = 270;

/// One analysis session per image.
///
/// Every stage keeps its output so callers can inspect the intermediate
/// rasters. Stages may be called one by one; each runs the stages it depends
/// on when their output is missing.
#[derive(Clone, Debug, Default)]
pub struct Analyser {
    pub params: AnalyserParams,
    pub(crate) image: ImageF32,
    pub(crate) line_image: ImageF32,
    pub(crate) weighted_line_image: ImageF32,
    pub(crate) hough_image: ImageF32,
    pub(crate) blurred_hough_image: ImageF32,
    pub(crate) blurred_column_sum: Vec<f32>,
    pub(crate) rho_profiles: [Vec<f32>; 2],
    pub(crate) approx_theta: [usize; 2],
    pub(crate) initial_lines: [Vec<PolarLine>; 2],
    pub(crate) lines: [Vec<Line>; 2],
    pub(crate) timings: TimingBreakdown,
}

impl Analyser {
    pub fn new(params: AnalyserParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Start a new session on `image`, dropping every result of the previous one.
    pub fn reset(&mut self, image: ImageF32) -> AnalysisResult<()> {
        if image.is_empty() {
            return Err(AnalysisError::EmptyImage);
        }
        debug!("Analyser::reset {}x{}", image.w, image.h);
        *self = Self {
            params: std::mem::take(&mut self.params),
            image,
            ..Default::default()
        };
        Ok(())
    }

    /// Run every stage: line images, accumulator, initial grid, growth.
    pub fn analyse(&mut self) -> AnalysisResult<()> {
        self.params.validate()?;
        self.require_image()?;
        self.compute_line_images()?;
        self.compute_hough_image()?;
        self.compute_initial_grid()?;
        self.grow_grid(false)?;
        info!(
            "analysis complete: {}+{} lines in {:.1} ms",
            self.lines[0].len(),
            self.lines[1].len(),
            self.timings.total_ms
        );
        Ok(())
    }

    /// Enhance dark grid lines into a `[0, 1]` ridge image, plus a copy
    /// weighted towards the image centre.
    pub fn compute_line_images(&mut self) -> AnalysisResult<()> {
        self.require_image()?;
        self.params.validate()?;
        info!("computing line images");
        let start = Instant::now();

        let filter = peak_filter(self.params.line_peak_filter_width, -1.0);
        let mut line_image = correlate(&self.image, &filter);
        zero_negatives(&mut line_image);
        normalize(&mut line_image, 0.0, 1.0);

        let mut weighted = line_image.clone();
        let (w, h) = (line_image.w as f32, line_image.h as f32);
        let sigma = self.params.line_image_sigma;
        weight_gaussian(
            &mut weighted,
            w / 2.0,
            h / 2.0,
            (w * sigma).powi(2),
            (h * sigma).powi(2),
        );
        normalize(&mut weighted, 0.0, 1.0);

        self.line_image = line_image;
        self.weighted_line_image = weighted;
        self.record("line_images", start);
        Ok(())
    }

    /// Build the peak-filtered `[0, 359]` degree accumulator of the weighted
    /// line image. Does nothing when an accumulator is already present.
    pub fn compute_hough_image(&mut self) -> AnalysisResult<()> {
        if !self.hough_image.is_empty() {
            info!(
                "using precomputed hough image {}x{}",
                self.hough_image.w, self.hough_image.h
            );
            return Ok(());
        }
        if self.weighted_line_image.is_empty() {
            self.compute_line_images()?;
        }
        info!("computing hough image");
        let start = Instant::now();

        let src = &self.weighted_line_image;
        let max_rho = src.w.max(src.h) / 2;
        let mut acc = hough_full_circle(src, max_rho);
        let filter = peak_filter(self.params.hough_peak_filter_width, 1.0);
        acc = correlate(&acc, &filter);
        zero_negatives(&mut acc);
        normalize(&mut acc, 0.0, 1.0);

        debug!("hough image {}x{} (max_rho={max_rho})", acc.w, acc.h);
        self.hough_image = acc;
        self.record("hough", start);
        Ok(())
    }

    /// Inject a precomputed accumulator so [`Self::compute_hough_image`] skips
    /// the transform. Must follow [`Self::reset`], which clears it.
    pub fn set_hough_image(&mut self, acc: ImageF32) -> AnalysisResult<()> {
        check_accumulator(&acc)?;
        self.hough_image = acc;
        Ok(())
    }

    /// Replace the working lines of a series, e.g. to resume growth from a
    /// saved state.
    pub fn set_lines(&mut self, series: Series, lines: Vec<Line>) {
        self.lines[series.index()] = lines;
    }

    pub fn image(&self) -> &ImageF32 {
        &self.image
    }

    pub fn line_image(&self) -> &ImageF32 {
        &self.line_image
    }

    pub fn weighted_line_image(&self) -> &ImageF32 {
        &self.weighted_line_image
    }

    pub fn hough_image(&self) -> &ImageF32 {
        &self.hough_image
    }

    pub fn blurred_hough_image(&self) -> &ImageF32 {
        &self.blurred_hough_image
    }

    /// Normalized column sums of the blurred accumulator, with the first
    /// series direction already cleared.
    pub fn blurred_column_sum(&self) -> &[f32] {
        &self.blurred_column_sum
    }

    /// Per-row maxima over the series' angle band, after peak removal.
    pub fn rho_profile(&self, series: Series) -> &[f32] {
        &self.rho_profiles[series.index()]
    }

    /// Approximate direction (accumulator column, degrees) of each series.
    pub fn approx_theta(&self) -> [usize; 2] {
        self.approx_theta
    }

    /// Initial lines, rho relative to the image centre and theta in radians.
    pub fn initial_lines(&self, series: Series) -> &[PolarLine] {
        &self.initial_lines[series.index()]
    }

    pub fn lines(&self, series: Series) -> &[Line] {
        &self.lines[series.index()]
    }

    pub fn board_lines(&self) -> BoardLines {
        BoardLines {
            series: self.lines.clone(),
        }
    }

    pub fn timings(&self) -> &TimingBreakdown {
        &self.timings
    }

    pub fn report(&self) -> AnalysisReport {
        let lines = self.board_lines();
        AnalysisReport {
            input: InputDescriptor {
                width: self.image.w,
                height: self.image.h,
            },
            params: self.params.clone(),
            approx_theta_deg: self.approx_theta,
            initial_lines: self.initial_lines.clone(),
            complete: lines.is_complete(self.params.board_size),
            boundary_coords: lines.boundary_coords(),
            lines,
            timings: self.timings.clone(),
        }
    }

    pub(crate) fn require_image(&self) -> AnalysisResult<()> {
        if self.image.is_empty() {
            Err(AnalysisError::NoImage)
        } else {
            Ok(())
        }
    }

    pub(crate) fn record(&mut self, label: &str, start: Instant) {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!("stage {label} took {elapsed_ms:.3} ms");
        self.timings.push(label, elapsed_ms);
        self.timings.total_ms += elapsed_ms;
    }
}

pub(crate) fn check_accumulator(acc: &ImageF32) -> AnalysisResult<()> {
    if acc.w < MIN_ACCUMULATOR_WIDTH || acc.h == 0 {
        return Err(AnalysisError::InvalidAccumulator {
            width: acc.w,
            height: acc.h,
        });
    }
    Ok(())
}
