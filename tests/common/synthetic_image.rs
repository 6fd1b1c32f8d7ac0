use board_grid::geom::Line;
use board_grid::image::ImageF32;
use board_grid::raster::draw_line;

/// Light `size × size` image (1.0) with a dark (0.0) one-pixel grid of
/// `count × count` lines, `spacing` pixels apart, starting at `first`.
///
/// Lines are drawn only across the board itself, so the area outside the
/// outermost lines stays blank like the border of a real board.
pub fn board_image(size: usize, first: usize, spacing: usize, count: usize) -> ImageF32 {
    assert!(count >= 2, "a board needs at least two lines");
    let last = first + spacing * (count - 1);
    assert!(last < size, "board does not fit into the image");

    let mut img = ImageF32::filled(size, size, 1.0);
    let (lo, hi) = (first as f32, last as f32);
    for i in 0..count {
        let c = (first + i * spacing) as f32;
        draw_line(&mut img, &Line::from_coords(c, lo, c, hi), 0.0);
        draw_line(&mut img, &Line::from_coords(lo, c, hi, c), 0.0);
    }
    img
}

/// Positions of the board lines drawn by [`board_image`].
pub fn board_positions(first: usize, spacing: usize, count: usize) -> Vec<f32> {
    (0..count).map(|i| (first + i * spacing) as f32).collect()
}
