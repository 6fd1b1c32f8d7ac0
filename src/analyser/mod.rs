//! Board grid analyser.
//!
//! Overview
//! - Line images: a negative peak filter turns the dark grid lines of the
//!   normalized photo into bright ridges; a Gaussian-weighted copy favours
//!   the centre of the frame.
//! - Hough: the weighted line image is transformed over `[0, 359]` degrees and
//!   peak filtered so each grid line becomes a compact spot.
//! - Initial grid: the two strongest directions are located from the
//!   accumulator column sums; along each one a handful of evenly spaced lines
//!   is picked from the rho profile, with gaps filled.
//! - Growth: lines are tuned against the line image by brute-force end point
//!   search, and each series is extended by mirroring its outer lines until
//!   it holds `board_size` lines.
//!
//! Modules
//! - [`params`] – the [`AnalyserParams`] knobs.
//! - `pipeline` – the [`Analyser`] session, line images and accumulator.
//! - `initial` – direction search, peak picking, gap filling.
//! - `tune` – end point tuning of single lines and whole grids.
//! - `grow` – scoring and adding lines.
mod grow;
mod initial;
pub mod params;
mod pipeline;
mod tune;

pub use params::AnalyserParams;
pub use pipeline::Analyser;
pub use tune::tune_line;
