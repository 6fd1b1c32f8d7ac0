//! Serializable diagnostics of an analysis session.
//!
//! `AnalysisReport` bundles the input size, the parameters, the intermediate
//! line sets and the per-stage timings, and is what the demo writes as JSON.

pub mod report;
pub mod timing;

pub use report::{AnalysisReport, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
