//! Small correlation kernels and the correlation itself.
//!
//! Kernels are plain [`ImageF32`]s. Correlation keeps the source size, centres
//! the kernel at `(kw / 2, kh / 2)` and replicates border pixels for samples
//! that fall outside the source.
use crate::image::{ImageF32, ImageView};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Square zero-sum peak filter of odd `width`.
///
/// Every cell is `-sign` except the centre, which is set so that the kernel
/// sums to zero. With `sign = 1` correlation amplifies local maxima, with
/// `sign = -1` it amplifies local minima (dark ridges).
pub fn peak_filter(width: usize, sign: f32) -> ImageF32 {
    assert!(width % 2 == 1, "peak filter width must be odd, got {width}");
    let mut filter = ImageF32::filled(width, width, -sign);
    let total = filter.sum();
    let c = width / 2;
    let centre = filter.get(c, c) - total;
    filter.set(c, c, centre);
    filter
}

/// Uniform `w × h` box of ones (not normalized).
pub fn box_filter(w: usize, h: usize) -> ImageF32 {
    ImageF32::filled(w, h, 1.0)
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Correlate `src` with `kernel`; the output has the size of `src`.
pub fn correlate(src: &ImageF32, kernel: &ImageF32) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut out = ImageF32::new(w, h);
    if src.is_empty() || kernel.is_empty() {
        return out;
    }
    let cx = (kernel.w / 2) as isize;
    let cy = (kernel.h / 2) as isize;

    let fill_row = |y: usize, dst: &mut [f32]| {
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for ky in 0..kernel.h {
                let sy = clamp_index(y as isize + ky as isize - cy, h);
                let src_row = src.row(sy);
                for (kx, &k) in kernel.row(ky).iter().enumerate() {
                    let sx = clamp_index(x as isize + kx as isize - cx, w);
                    acc += k * src_row[sx];
                }
            }
            *d = acc;
        }
    };

    #[cfg(feature = "parallel")]
    out.data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));
    #[cfg(not(feature = "parallel"))]
    out.data
        .chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_filter_sums_to_zero() {
        for width in [1usize, 3, 5, 7, 9, 15] {
            for sign in [1.0f32, -1.0] {
                let f = peak_filter(width, sign);
                assert_eq!(f.sum(), 0.0, "width={width} sign={sign}");
                let c = width / 2;
                assert_eq!(f.get(c, c), sign * (width * width - 1) as f32);
                if width > 1 {
                    assert_eq!(f.get(0, 0), -sign);
                }
            }
        }
    }

    #[test]
    #[should_panic]
    fn even_peak_filter_is_rejected() {
        let _ = peak_filter(4, 1.0);
    }

    #[test]
    fn correlation_with_identity_kernel_is_a_copy() {
        let mut src = ImageF32::new(4, 3);
        for (i, v) in src.data.iter_mut().enumerate() {
            *v = i as f32;
        }
        let mut k = ImageF32::new(3, 3);
        k.set(1, 1, 1.0);
        assert_eq!(correlate(&src, &k), src);
    }

    #[test]
    fn correlation_replicates_borders() {
        let mut src = ImageF32::new(3, 1);
        src.data = vec![1.0, 2.0, 3.0];
        let out = correlate(&src, &box_filter(3, 1));
        assert_eq!(out.data, vec![4.0, 6.0, 8.0]);
    }

    #[test]
    fn dark_line_responds_to_negative_peak_filter() {
        let mut src = ImageF32::filled(9, 9, 1.0);
        for y in 0..9 {
            src.set(4, y, 0.0);
        }
        let out = correlate(&src, &peak_filter(5, -1.0));
        assert_eq!(out.get(4, 4), 20.0);
        assert!(out.get(3, 4) < 0.0);
    }
}
