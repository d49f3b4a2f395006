//! Ball outcome probabilities and pitch modifier weights.

use serde::{Deserialize, Serialize};

/// Inclusive clamp range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeConfig {
    // === Rate clamps ===
    /// Runs/ball after pitch modifiers (default: 0.2..=2.0)
    pub runs_per_ball_range: Range,
    /// Wickets/ball after pitch modifiers (default: 0.01..=0.20)
    pub wickets_per_ball_range: Range,

    // === Wicket/run modifiers ===
    /// Seam condition weight on fast bowlers' wicket rate (default: 0.2)
    pub fast_wicket_influence: f64,
    /// Dryness weight on spinners' wicket rate (default: 0.3)
    pub spin_wicket_influence: f64,
    /// Flatness weight on wicket and run rates (default: 0.4)
    pub flatness_influence: f64,

    // === Run distribution ===
    /// Dot ball base probability (default: 0.57)
    pub dot_base: f64,
    pub one_prob: f64,
    pub two_prob: f64,
    /// Four probability at 1.0 runs/ball (default: 0.09)
    pub four_base: f64,
    /// Six probability at `six_rpb_scale` runs/ball (default: 0.02)
    pub six_base: f64,
    pub six_rpb_scale: f64,
    /// Dot probability after modifiers (default: 0.30..=0.75)
    pub dot_range: Range,
    /// Seam condition weight on dot balls for fast bowling (default: 0.25)
    pub dot_seam_influence: f64,
    /// Dryness weight on dot balls for spin (default: 0.08)
    pub dot_dryness_influence: f64,
    /// Flatness weight reducing dot balls (default: 0.3)
    pub dot_flatness_influence: f64,
    /// Outfield speed weight on boundaries (default: 0.4)
    pub boundary_speed_influence: f64,
    /// Seam condition weight reducing boundaries off fast bowling (default: 0.1)
    pub boundary_seam_influence: f64,
    /// Dryness weight reducing fours off spin (default: 0.2)
    pub spin_four_dryness_influence: f64,
    /// Dryness weight reducing sixes off spin (default: 0.3)
    pub spin_six_dryness_influence: f64,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            runs_per_ball_range: Range::new(0.2, 2.0),
            wickets_per_ball_range: Range::new(0.01, 0.20),

            fast_wicket_influence: 0.2,
            spin_wicket_influence: 0.3,
            flatness_influence: 0.4,

            dot_base: 0.57,
            one_prob: 0.25,
            two_prob: 0.08,
            four_base: 0.09,
            six_base: 0.02,
            six_rpb_scale: 1.2,
            dot_range: Range::new(0.30, 0.75),
            dot_seam_influence: 0.25,
            dot_dryness_influence: 0.08,
            dot_flatness_influence: 0.3,
            boundary_speed_influence: 0.4,
            boundary_seam_influence: 0.1,
            spin_four_dryness_influence: 0.2,
            spin_six_dryness_influence: 0.3,
        }
    }
}
