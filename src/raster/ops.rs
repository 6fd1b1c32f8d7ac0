//! Whole-raster operations used between the pipeline stages.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Replace every negative value with 0.
pub fn zero_negatives(img: &mut ImageF32) {
    for v in img.data.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
}

/// Linearly map the raster's `[min, max]` onto `[lo, hi]`.
///
/// A flat raster (min == max) is filled with `lo`.
pub fn normalize(img: &mut ImageF32, lo: f32, hi: f32) {
    normalize_slice(&mut img.data, lo, hi);
}

/// Slice version of [`normalize`], used for 1-D profiles.
pub fn normalize_slice(values: &mut [f32], lo: f32, hi: f32) {
    let Some(first) = values.first().copied() else {
        return;
    };
    let (min, max) = values
        .iter()
        .fold((first, first), |(a, b), &v| (a.min(v), b.max(v)));
    if max == min {
        values.fill(lo);
        return;
    }
    let range = max - min;
    for v in values.iter_mut() {
        *v = (*v - min) / range * (hi - lo) + lo;
    }
}

/// Multiply each pixel by `exp(-(dx²/(2σx²) + dy²/(2σy²)))` around `(xc, yc)`.
/// A non-positive variance disables weighting along that axis.
pub fn weight_gaussian(img: &mut ImageF32, xc: f32, yc: f32, var_x: f32, var_y: f32) {
    let axis = |d: f32, var: f32| if var > 0.0 { d * d / (2.0 * var) } else { 0.0 };
    for y in 0..img.h {
        let ey = axis(y as f32 - yc, var_y);
        for (x, v) in img.row_mut(y).iter_mut().enumerate() {
            let ex = axis(x as f32 - xc, var_x);
            *v *= (-(ex + ey)).exp();
        }
    }
}

/// Copy with the row order reversed.
pub fn flip_vertical(img: &ImageF32) -> ImageF32 {
    let mut out = ImageF32::new(img.w, img.h);
    for y in 0..img.h {
        out.row_mut(img.h - 1 - y).copy_from_slice(img.row(y));
    }
    out
}

/// Copy `src` into `dst` with its top-left corner at `(x0, y0)`, clipped to `dst`.
pub fn paste(dst: &mut ImageF32, src: &ImageF32, x0: usize, y0: usize) {
    if x0 >= dst.w || y0 >= dst.h {
        return;
    }
    let cols = src.w.min(dst.w - x0);
    let rows = src.h.min(dst.h - y0);
    for y in 0..rows {
        dst.row_mut(y0 + y)[x0..x0 + cols].copy_from_slice(&src.row(y)[..cols]);
    }
}

/// Sum of every column, one value per x.
pub fn column_sums(img: &ImageF32) -> Vec<f32> {
    let mut sums = vec![0.0f32; img.w];
    for y in 0..img.h {
        for (s, &v) in sums.iter_mut().zip(img.row(y)) {
            *s += v;
        }
    }
    sums
}

fn clamp_band(w: usize, x1: isize, x2: isize) -> Option<(usize, usize)> {
    if w == 0 {
        return None;
    }
    let lo = x1.max(0);
    let hi = x2.min(w as isize - 1);
    (lo <= hi).then_some((lo as usize, hi as usize))
}

/// For every row, the maximum over columns `[x1, x2]` (clamped to the raster).
/// Rows get 0 when the band misses the raster entirely.
pub fn row_max_in_band(img: &ImageF32, x1: isize, x2: isize) -> Vec<f32> {
    let Some((lo, hi)) = clamp_band(img.w, x1, x2) else {
        return vec![0.0; img.h];
    };
    (0..img.h)
        .map(|y| {
            img.row(y)[lo..=hi]
                .iter()
                .copied()
                .fold(f32::NEG_INFINITY, f32::max)
        })
        .collect()
}

/// Column of the maximum of row `y` within `[x1, x2]`; the leftmost wins ties.
pub fn find_max_in_row(img: &ImageF32, y: usize, x1: isize, x2: isize) -> Option<usize> {
    if y >= img.h {
        return None;
    }
    let (lo, hi) = clamp_band(img.w, x1, x2)?;
    let row = img.row(y);
    let mut best = lo;
    for x in lo + 1..=hi {
        if row[x] > row[best] {
            best = x;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_to_range_and_flat_to_lo() {
        let mut img = ImageF32::from_vec(3, 1, vec![2.0, 4.0, 6.0]).unwrap();
        normalize(&mut img, 0.0, 1.0);
        assert_eq!(img.data, vec![0.0, 0.5, 1.0]);

        let mut flat = ImageF32::filled(2, 2, 0.3);
        normalize(&mut flat, 0.25, 1.0);
        assert!(flat.data.iter().all(|&v| v == 0.25));
    }

    #[test]
    fn zero_negatives_keeps_positive_values() {
        let mut img = ImageF32::from_vec(3, 1, vec![-1.0, 0.0, 2.0]).unwrap();
        zero_negatives(&mut img);
        assert_eq!(img.data, vec![0.0, 0.0, 2.0]);
    }

    #[test]
    fn gaussian_weight_is_one_at_centre() {
        let mut img = ImageF32::filled(5, 5, 1.0);
        weight_gaussian(&mut img, 2.0, 2.0, 1.0, 1.0);
        assert_eq!(img.get(2, 2), 1.0);
        assert!((img.get(3, 2) - (-0.5f32).exp()).abs() < 1e-6);
        assert!(img.get(0, 0) < img.get(1, 1));

        let mut only_x = ImageF32::filled(3, 3, 1.0);
        weight_gaussian(&mut only_x, 1.0, 1.0, 1.0, 0.0);
        assert_eq!(only_x.get(1, 0), 1.0);
    }

    #[test]
    fn flip_and_paste_build_side_by_side_raster() {
        let half = ImageF32::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let flipped = flip_vertical(&half);
        assert_eq!(flipped.data, vec![3.0, 4.0, 1.0, 2.0]);

        let mut full = ImageF32::new(4, 2);
        paste(&mut full, &half, 0, 0);
        paste(&mut full, &flipped, 2, 0);
        assert_eq!(full.data, vec![1.0, 2.0, 3.0, 4.0, 3.0, 4.0, 1.0, 2.0]);

        // Clipped at the right edge.
        paste(&mut full, &half, 3, 1);
        assert_eq!(full.get(3, 1), 1.0);
    }

    #[test]
    fn band_queries_clamp_and_prefer_leftmost() {
        let img =
            ImageF32::from_vec(4, 2, vec![1.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0, 9.0]).unwrap();
        assert_eq!(column_sums(&img), vec![1.0, 5.0, 5.0, 9.0]);
        assert_eq!(row_max_in_band(&img, -3, 2), vec![5.0, 0.0]);
        assert_eq!(row_max_in_band(&img, 10, 12), vec![0.0, 0.0]);
        assert_eq!(find_max_in_row(&img, 0, 0, 3), Some(1));
        assert_eq!(find_max_in_row(&img, 1, 0, 2), Some(0));
        assert_eq!(find_max_in_row(&img, 1, 2, 99), Some(3));
        assert_eq!(find_max_in_row(&img, 1, 5, 9), None);
    }
}
