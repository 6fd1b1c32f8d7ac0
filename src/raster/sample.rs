//! Sampling and drawing along traced lines.
use crate::geom::Line;
use crate::image::{ImageView, ImageViewMut};

/// Sum of the raster values under the trace of `line`. Samples outside the
/// raster contribute nothing.
pub fn line_sum<I: ImageView<Pixel = f32>>(img: &I, line: &Line) -> f32 {
    let (w, h) = img.dims();
    line.trace()
        .within(w, h)
        .filter_map(|(x, y)| img.sample(x, y))
        .sum()
}

/// Running sum over several traced lines.
///
/// `count` includes the samples that fell outside the raster, so they act as
/// zero-valued pixels in [`PixelSum::mean`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelSum {
    pub sum: f32,
    pub count: u64,
}

impl PixelSum {
    pub fn add_line<I: ImageView<Pixel = f32>>(&mut self, img: &I, line: &Line) {
        self.count += line.trace().sample_count();
        self.sum += line_sum(img, line);
    }

    /// Mean value per sample; 0 when nothing was sampled.
    pub fn mean(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f32
        }
    }
}

/// Writes `value` on every in-bounds pixel of the trace; returns how many.
pub fn draw_line<I: ImageViewMut<Pixel = f32>>(img: &mut I, line: &Line, value: f32) -> usize {
    let (w, h) = img.dims();
    line.trace()
        .within(w, h)
        .filter(|&(x, y)| img.put(x, y, value))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageF32;

    #[test]
    fn line_sum_ignores_outside_samples() {
        let img = ImageF32::filled(10, 10, 1.0);
        let inside = Line::from_coords(0.0, 4.0, 9.0, 4.0);
        assert_eq!(line_sum(&img, &inside), 10.0);
        let partly = Line::from_coords(-5.0, 4.0, 4.0, 4.0);
        assert_eq!(line_sum(&img, &partly), 5.0);
    }

    #[test]
    fn pixel_sum_counts_outside_as_zero() {
        let img = ImageF32::filled(10, 10, 1.0);
        let mut acc = PixelSum::default();
        assert_eq!(acc.mean(), 0.0);
        acc.add_line(&img, &Line::from_coords(-5.0, 4.0, 4.0, 4.0));
        assert_eq!(acc.count, 10);
        assert_eq!(acc.sum, 5.0);
        assert_eq!(acc.mean(), 0.5);
    }

    #[test]
    fn draw_then_sum() {
        let mut img = ImageF32::new(8, 8);
        let l = Line::from_coords(0.0, 0.0, 7.0, 7.0);
        assert_eq!(draw_line(&mut img, &l, 1.0), 8);
        assert_eq!(line_sum(&img, &l), 8.0);
        assert_eq!(img.get(3, 3), 1.0);
        assert_eq!(img.get(3, 4), 0.0);
    }
}
