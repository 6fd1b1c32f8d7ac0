use crate::types::Series;
use thiserror::Error;

/// Failures reported by the [`Analyser`](crate::analyser::Analyser).
///
/// Numeric degeneracies (parallel lines, flat profiles) are not errors; the
/// pipeline carries on with best-effort values and logs a warning.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("no input image; call reset() first")]
    NoImage,
    #[error("input image is empty")]
    EmptyImage,
    #[error("invalid analyser parameters: {0}")]
    InvalidParams(String),
    #[error("hough accumulator is {width}x{height}; expected at least 270 columns and one row")]
    InvalidAccumulator { width: usize, height: usize },
    #[error("series {series:?}: found {found} line peaks, {required} required")]
    InsufficientPeaks {
        series: Series,
        found: usize,
        required: usize,
    },
    #[error("series {series:?}: {count} initial lines exceed the board size {board_size}")]
    TooManyInitialLines {
        series: Series,
        count: usize,
        board_size: usize,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
