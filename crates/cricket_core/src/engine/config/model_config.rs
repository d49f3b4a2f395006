//! Rate model parameters (confidence shrinkage and baseline fallbacks).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Balls at which observed and baseline rates get equal weight (default: 500)
    pub confidence: f64,
    /// Runs/ball for a role with no baseline (default: 0.7)
    pub fallback_runs_per_ball: f64,
    /// Wickets/ball for a role with no baseline (default: 0.02)
    pub fallback_wickets_per_ball: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { confidence: 500.0, fallback_runs_per_ball: 0.7, fallback_wickets_per_ball: 0.02 }
    }
}
