//! Captaincy thresholds for declarations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclarationConfig {
    /// Overs that must be bowled before any declaration (default: 1.0)
    pub min_overs: f64,
    /// Chance a batter in the 90s holds the declaration back (default: 0.9)
    pub courtesy_hold_prob: f64,

    // === 1st innings ===
    pub first_runs_threshold: u32,
    pub first_overs_threshold: f64,
    /// Declaration chance per ball is `runs / first_runs_divisor` (default: 50000)
    pub first_runs_divisor: f64,

    // === 2nd innings ===
    /// Per-ball chance for each 2nd-innings scenario (default: 0.01)
    pub second_scenario_prob: f64,
    pub second_big_total: u32,
    pub second_big_total_min_lead: i32,
    pub second_long_innings_overs: f64,
    pub second_long_innings_runs: u32,
    /// Lead must exceed this fraction of the innings total (default: 0.5)
    pub second_long_innings_lead_ratio: f64,
    pub second_healthy_lead: i32,
    pub second_healthy_runs: u32,

    // === 3rd innings ===
    /// Opposition scoring rate assumed for the remaining overs (default: 3.0)
    pub expected_opposition_rpo: f64,
    pub third_lead_buffer: f64,
    pub third_min_remaining_overs: f64,
}

impl Default for DeclarationConfig {
    fn default() -> Self {
        Self {
            min_overs: 1.0,
            courtesy_hold_prob: 0.9,

            first_runs_threshold: 500,
            first_overs_threshold: 150.0,
            first_runs_divisor: 50_000.0,

            second_scenario_prob: 0.01,
            second_big_total: 500,
            second_big_total_min_lead: -50,
            second_long_innings_overs: 100.0,
            second_long_innings_runs: 350,
            second_long_innings_lead_ratio: 0.5,
            second_healthy_lead: 200,
            second_healthy_runs: 400,

            expected_opposition_rpo: 3.0,
            third_lead_buffer: 100.0,
            third_min_remaining_overs: 35.0,
        }
    }
}
