use serde::{Deserialize, Serialize};

/// Wall time of one analyser stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Stage timings of a session in execution order. Stages that run more than
/// once (tuning, growth steps) appear once per run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Summed time of every entry with `label`.
    pub fn stage_ms(&self, label: &str) -> f64 {
        self.stages
            .iter()
            .filter(|s| s.label == label)
            .map(|s| s.elapsed_ms)
            .sum()
    }
}
