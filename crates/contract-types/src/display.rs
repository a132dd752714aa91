//! Presentation helpers shared by the dashboard and detail views

use serde::{Deserialize, Serialize};

/// Colour band for an AI confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// Bands are exclusive at the boundary: 0.85 is Medium, 0.7 is Low
    pub fn from_score(score: f64) -> Self {
        if score > 0.85 {
            ConfidenceBand::High
        } else if score > 0.7 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Score in [0, 1] as a whole percentage, e.g. 0.926 -> 93
pub fn percent(score: f64) -> u32 {
    if !score.is_finite() {
        return 0;
    }
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}
