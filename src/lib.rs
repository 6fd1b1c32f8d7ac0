#![doc = include_str!("../README.md")]

// Public modules
pub mod analyser;
pub mod diagnostics;
pub mod error;
pub mod geom;
pub mod hough;
pub mod image;
pub mod types;

// Building blocks used by the analyser and the demo.
pub mod angle;
pub mod config;
pub mod raster;

// --- High-level re-exports -------------------------------------------------

pub use crate::analyser::{Analyser, AnalyserParams};
pub use crate::diagnostics::AnalysisReport;
pub use crate::error::{AnalysisError, AnalysisResult};
pub use crate::types::{BoardLines, Series};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use board_grid::prelude::*;
///
/// # fn main() -> Result<(), AnalysisError> {
/// let (w, h) = (640usize, 480usize);
/// let image = ImageF32::filled(w, h, 1.0);
///
/// let mut analyser = Analyser::new(AnalyserParams::default());
/// analyser.reset(image)?;
/// analyser.analyse()?;
/// if let Some(coords) = analyser.board_lines().boundary_coords() {
///     println!("{coords:?}");
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::geom::{Line, Point, PolarLine};
    pub use crate::image::ImageF32;
    pub use crate::{AnalysisError, Analyser, AnalyserParams, BoardLines, Series};
}
