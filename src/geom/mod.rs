//! Geometry kernel: points, lines in end-point and polar form, the
//! intersection grid of two line series, and the integer pixel trace of a
//! segment.
//!
//! All types are small `Copy` values (except [`Grid`]). Operations are pure;
//! where an operation mutates, a value-returning twin exists as well.

pub mod grid;
pub mod line;
pub mod point;
pub mod polar;
pub mod trace;

pub use grid::Grid;
pub use line::Line;
pub use point::{mean, Point};
pub use polar::PolarLine;
pub use trace::LineTrace;
