//! Raster primitives shared by the Hough transform and the analyser.
//!
//! - [`kernel`]: peak and box kernels, clamp-to-edge correlation.
//! - [`ops`]: normalization, Gaussian weighting, flips, band maxima.
//! - [`profile`]: 1-D median and peak utilities over `&[f32]`.
//! - [`sample`]: summing and drawing along traced lines.
pub mod kernel;
pub mod ops;
pub mod profile;
pub mod sample;

pub use kernel::{box_filter, correlate, peak_filter};
pub use ops::{
    column_sums, find_max_in_row, flip_vertical, normalize, normalize_slice, paste,
    row_max_in_band, weight_gaussian, zero_negatives,
};
pub use profile::{find_max1, median, median_of, median_peak_remove, set_range1};
pub use sample::{draw_line, line_sum, PixelSum};
