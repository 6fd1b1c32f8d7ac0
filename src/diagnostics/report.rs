use super::timing::TimingBreakdown;
use crate::analyser::AnalyserParams;
use crate::geom::PolarLine;
use crate::types::BoardLines;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Everything one analysis produced, ready for JSON output.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub input: InputDescriptor,
    pub params: AnalyserParams,
    pub approx_theta_deg: [usize; 2],
    /// Rho relative to the image centre, theta in radians.
    pub initial_lines: [Vec<PolarLine>; 2],
    pub lines: BoardLines,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_coords: Option<[i32; 8]>,
    pub timings: TimingBreakdown,
}
