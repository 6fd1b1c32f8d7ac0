//! Linear Hough transform over an `f32` raster.
//!
//! The accumulator has one column per angle (degrees) and `2 * max_rho + 1`
//! rows; row `max_rho` is the line through the image centre. Pixel positions
//! are taken relative to `(w / 2, h / 2)` using integer halves. Each positive
//! pixel votes with its value, split linearly between the two rows around
//! its fractional rho.
//!
//! With the `parallel` feature the columns are filled concurrently. Every
//! column adds the votes in the same pixel order either way, so both paths
//! produce identical accumulators.
use crate::image::{ImageF32, ImageViewMut};
use crate::raster::{flip_vertical, paste};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Columns of the half accumulator built by [`hough_full_circle`].
pub const HALF_CIRCLE_THETAS: usize = 180;

#[derive(Clone, Copy, Debug)]
struct Vote {
    rho0: f32,
    theta0: f32,
    value: f32,
}

fn collect_votes(src: &ImageF32) -> Vec<Vote> {
    let cx = (src.w / 2) as f32;
    let cy = (src.h / 2) as f32;
    let mut votes = Vec::new();
    for y in 0..src.h {
        for x in 0..src.w {
            let value = src.get(x, y);
            if value <= 0.0 {
                continue;
            }
            let rx = x as f32 - cx;
            let ry = y as f32 - cy;
            let mut rho0 = (rx * rx + ry * ry).sqrt();
            let mut theta0 = ry.atan2(rx).to_degrees();
            if theta0 < 0.0 {
                theta0 += 180.0;
                rho0 = -rho0;
            }
            votes.push(Vote { rho0, theta0, value });
        }
    }
    votes
}

fn accumulate_column(votes: &[Vote], theta: f32, centre: f32, column: &mut [f32]) {
    let rows = column.len();
    for v in votes {
        let r = v.rho0 * (v.theta0 - theta).to_radians().cos() + centre;
        if !(r >= 0.0 && r < rows as f32) {
            continue;
        }
        let ir = r.floor() as usize;
        let frac = r - ir as f32;
        column[ir] += v.value * (1.0 - frac);
        if ir + 1 < rows {
            column[ir + 1] += v.value * frac;
        }
    }
}

/// Accumulate `num_thetas` angles evenly spaced over `[theta1, theta2]` degrees.
pub fn hough(
    src: &ImageF32,
    theta1: f32,
    theta2: f32,
    num_thetas: usize,
    max_rho: usize,
) -> ImageF32 {
    let rows = 2 * max_rho + 1;
    let mut out = ImageF32::new(num_thetas, rows);
    if num_thetas == 0 {
        return out;
    }
    let delta = if num_thetas > 1 {
        (theta2 - theta1) / (num_thetas - 1) as f32
    } else {
        0.0
    };
    let votes = collect_votes(src);
    let centre = max_rho as f32;
    let column_for = |t: usize| {
        let mut column = vec![0.0f32; rows];
        accumulate_column(&votes, theta1 + t as f32 * delta, centre, &mut column);
        column
    };

    #[cfg(feature = "parallel")]
    let columns: Vec<Vec<f32>> = (0..num_thetas).into_par_iter().map(column_for).collect();
    #[cfg(not(feature = "parallel"))]
    let columns: Vec<Vec<f32>> = (0..num_thetas).map(column_for).collect();

    for (t, column) in columns.iter().enumerate() {
        for (y, &v) in column.iter().enumerate() {
            out.row_mut(y)[t] = v;
        }
    }
    out
}

/// Accumulator over `[0, 359]` degrees: the `[0, 179]` half followed by the
/// same half flipped upside down (a line at `θ + 180` has rho `-rho`).
pub fn hough_full_circle(src: &ImageF32, max_rho: usize) -> ImageF32 {
    let half = hough(src, 0.0, 179.0, HALF_CIRCLE_THETAS, max_rho);
    let mut full = ImageF32::new(2 * half.w, half.h);
    paste(&mut full, &half, 0, 0);
    paste(&mut full, &flip_vertical(&half), half.w, 0);
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;
    use crate::raster::find_max_in_row;

    fn argmax(img: &ImageF32) -> (usize, usize) {
        let mut best = (0, 0);
        for y in 0..img.h {
            for x in 0..img.w {
                if img.get(x, y) > img.get(best.0, best.1) {
                    best = (x, y);
                }
            }
        }
        best
    }

    #[test]
    fn vertical_line_peaks_at_zero_degrees() {
        let mut src = ImageF32::new(41, 41);
        for y in 0..41 {
            src.set(30, y, 1.0);
        }
        let acc = hough(&src, 0.0, 179.0, 180, 20);
        assert_eq!((acc.w, acc.h), (180, 41));
        // x = 30 is 10 px right of the centre column 20.
        assert_eq!(argmax(&acc), (0, 30));
    }

    #[test]
    fn horizontal_line_peaks_at_ninety_degrees() {
        let mut src = ImageF32::new(41, 41);
        for x in 0..41 {
            src.set(x, 12, 1.0);
        }
        let acc = hough(&src, 0.0, 179.0, 180, 20);
        assert_eq!(argmax(&acc), (90, 12));
    }

    #[test]
    fn votes_are_conserved_when_in_range() {
        let mut src = ImageF32::new(9, 9);
        src.set(4, 4, 1.0);
        src.set(6, 3, 0.5);
        src.set(1, 1, -3.0);
        let acc = hough(&src, 0.0, 90.0, 4, 10);
        for t in 0..acc.w {
            let col: f32 = (0..acc.h).map(|y| acc.get(t, y)).sum();
            assert!((col - 1.5).abs() < 1e-5, "t={t} col={col}");
        }
    }

    #[test]
    fn single_theta_has_zero_step() {
        let mut src = ImageF32::new(5, 5);
        src.set(4, 2, 1.0);
        let acc = hough(&src, 0.0, 179.0, 1, 4);
        assert_eq!(acc.w, 1);
        assert_eq!(acc.get(0, 6), 1.0);
    }

    #[test]
    fn full_circle_mirrors_the_half() {
        let mut src = ImageF32::new(21, 21);
        for y in 0..21 {
            src.set(15, y, 1.0);
        }
        let full = hough_full_circle(&src, 10);
        assert_eq!((full.w, full.h), (360, 21));
        for y in 0..full.h {
            let mirrored = full.h - 1 - y;
            assert_eq!(full.row(y)[10], full.row(mirrored)[190]);
        }
        assert_eq!(find_max_in_row(&full, 15, 0, 179), Some(0));
        assert_eq!(find_max_in_row(&full, 5, 180, 359), Some(180));
    }
}
