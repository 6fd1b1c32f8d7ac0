//! Knobs of the board analyser.
//!
//! Defaults are tuned for photos of a 19×19 board taking up most of the frame.
//! Widths are in pixels of the input image, except `approx_series_width` and
//! `approx_theta_remove_range` which are in accumulator columns (degrees).
use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyserParams {
    /// Lines per direction of a complete board.
    pub board_size: usize,
    /// Width of the peak filter that turns dark grid lines into ridges (odd).
    pub line_peak_filter_width: usize,
    /// Width of the peak filter applied to the accumulator (odd).
    pub hough_peak_filter_width: usize,
    /// Gaussian weighting of the line image, as a fraction of the image size.
    pub line_image_sigma: f32,
    /// Half width of the angle band searched around each series direction.
    pub approx_series_width: usize,
    /// Columns cleared around the first series direction before looking for
    /// the second one.
    pub approx_theta_remove_range: usize,
    /// Window of the median peak removal in the rho profiles.
    pub median_peak_remove_width: usize,
    /// Lines per series the grid starts growing from.
    pub num_initial_lines: usize,
    /// Upper bound on peaks taken from a rho profile.
    pub max_initial_lines: usize,
    /// Cap on candidate end points per side when tuning a line.
    pub max_tune_points: usize,
    /// Fail instead of continuing with a best-effort initial grid when the
    /// profiles do not hold enough peaks or hold more lines than the board.
    pub strict_initial_grid: bool,
}

impl Default for AnalyserParams {
    fn default() -> Self {
        Self {
            board_size: 19,
            line_peak_filter_width: 5,
            hough_peak_filter_width: 5,
            line_image_sigma: 0.2,
            approx_series_width: 10,
            approx_theta_remove_range: 25,
            median_peak_remove_width: 10,
            num_initial_lines: 5,
            max_initial_lines: 10,
            max_tune_points: 512,
            strict_initial_grid: false,
        }
    }
}

impl AnalyserParams {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let fail = |msg: String| Err(AnalysisError::InvalidParams(msg));
        for (name, width) in [
            ("line_peak_filter_width", self.line_peak_filter_width),
            ("hough_peak_filter_width", self.hough_peak_filter_width),
        ] {
            if width % 2 == 0 {
                return fail(format!("{name} must be odd, got {width}"));
            }
        }
        if !self.line_image_sigma.is_finite() || self.line_image_sigma < 0.0 {
            return fail(format!(
                "line_image_sigma must be finite and non-negative, got {}",
                self.line_image_sigma
            ));
        }
        if self.num_initial_lines < 2 {
            return fail(format!(
                "num_initial_lines must be at least 2, got {}",
                self.num_initial_lines
            ));
        }
        if self.max_initial_lines < self.num_initial_lines {
            return fail(format!(
                "max_initial_lines ({}) is below num_initial_lines ({})",
                self.max_initial_lines, self.num_initial_lines
            ));
        }
        if self.board_size < self.num_initial_lines {
            return fail(format!(
                "board_size ({}) is below num_initial_lines ({})",
                self.board_size, self.num_initial_lines
            ));
        }
        if self.median_peak_remove_width == 0 {
            return fail("median_peak_remove_width must be positive".to_string());
        }
        if self.max_tune_points < 2 {
            return fail(format!(
                "max_tune_points must be at least 2, got {}",
                self.max_tune_points
            ));
        }
        Ok(())
    }
}
