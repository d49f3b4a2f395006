//! Innings flavour rules, match rules and pitch wear.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InningsConfig {
    /// Balls a bowler sends down before mechanical rotation (default: 30)
    pub spell_balls: u32,
    /// 0-based batting position from which a batter counts as tail (default: 7)
    pub tail_start_index: usize,
    /// Chance a tail-ender's boundary becomes a single (default: 0.25)
    pub tail_boundary_nerf_prob: f64,
    /// Chance the innings folds when the 9th wicket falls (default: 0.15)
    pub last_wicket_collapse_prob: f64,
    /// Role assumed for a bowler missing from the role table (default: "RF")
    pub default_bowling_role: String,
    /// Hand assumed for a batter missing from the role table (default: "RHB")
    pub default_batting_hand: String,
}

impl Default for InningsConfig {
    fn default() -> Self {
        Self {
            spell_balls: 30,
            tail_start_index: 7,
            tail_boundary_nerf_prob: 0.25,
            last_wicket_collapse_prob: 0.15,
            default_bowling_role: "RF".to_string(),
            default_batting_hand: "RHB".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Match length in overs (default: 450, five days of 90)
    pub max_overs: u32,
    /// First-innings lead at which the follow-on is enforced (default: 200)
    pub follow_on_lead: i32,
}

impl MatchRules {
    /// Upper bound accepted for `max_overs` (about a hundred five-day Tests).
    pub const MAX_OVERS_LIMIT: u32 = 50_000;

    pub fn max_balls(&self) -> u32 {
        self.max_overs.saturating_mul(6)
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self { max_overs: 450, follow_on_lead: 200 }
    }
}

/// Multipliers applied to the pitch after every innings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchWearConfig {
    pub seam: f64,
    pub dryness: f64,
    pub bounce: f64,
    pub flatness: f64,
    pub boundary_speed: f64,
}

impl Default for PitchWearConfig {
    fn default() -> Self {
        Self { seam: 0.92, dryness: 1.08, bounce: 0.97, flatness: 0.97, boundary_speed: 0.98 }
    }
}
