#![allow(dead_code)]

pub mod synthetic_image;

use board_grid::geom::Line;

pub fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Position of an axis-aligned line across its direction: x for a mostly
/// vertical line, y for a mostly horizontal one. The flag tells which.
pub fn axis_position(line: &Line) -> (bool, f32) {
    let t = line.tangent();
    let mid = line.midpoint();
    if t.y.abs() > t.x.abs() {
        (true, mid.x)
    } else {
        (false, mid.y)
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
