/// Read access to a single-channel raster, one row slice at a time.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Pixel at signed coordinates; `None` outside the raster.
    fn sample(&self, x: i64, y: i64) -> Option<Self::Pixel> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.row(y)[x])
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    /// Writes `value` when `(x, y)` is inside the raster; returns whether it did.
    fn put(&mut self, x: i64, y: i64, value: Self::Pixel) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width() || y >= self.height() {
            return false;
        }
        self.row_mut(y)[x] = value;
        true
    }
}
