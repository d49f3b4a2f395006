//! Pitch-adjusted ball probabilities.
//!
//! All functions are pure: they take blended rates, the bowler's category and
//! the pitch, and return probabilities. The sampler is the only caller that
//! touches an RNG.

use super::ball::BallOutcome;
use super::config::OutcomeConfig;
use super::pitch::PitchState;
use crate::models::player::BowlerCategory;
use serde::{Deserialize, Serialize};

// ============================================================================
// Rates
// ============================================================================

/// Blended matchup rates after pitch modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedRates {
    pub runs_per_ball: f64,
    pub wickets_per_ball: f64,
    /// Multiplier on the base dot-ball probability
    pub dot_adjustment: f64,
}

/// Apply pitch modifiers to blended rates, without clamping.
///
/// Fast bowlers gain wickets with seam condition, spinners with dryness, and a
/// flat deck takes wickets away and adds runs for everyone.
pub fn apply_pitch_modifiers(
    runs_per_ball: f64,
    wickets_per_ball: f64,
    category: BowlerCategory,
    pitch: &PitchState,
    cfg: &OutcomeConfig,
) -> AdjustedRates {
    let mut rpb = runs_per_ball;
    let mut wpb = wickets_per_ball;
    let mut dot_adjustment = 1.0;

    if category.is_fast() {
        wpb *= 1.0 + (pitch.seam_condition() - 1.0) * cfg.fast_wicket_influence;
        dot_adjustment *= pitch.seam;
    }
    if category.is_spin() {
        wpb *= 1.0 + (pitch.dryness - 1.0) * cfg.spin_wicket_influence;
        dot_adjustment *= pitch.dryness;
    }

    wpb *= 1.0 - (pitch.flatness - 1.0) * cfg.flatness_influence;
    rpb *= 1.0 + (pitch.flatness - 1.0) * cfg.flatness_influence;

    AdjustedRates { runs_per_ball: rpb, wickets_per_ball: wpb, dot_adjustment }
}

/// Pitch modifiers followed by the rate clamps.
pub fn pitch_adjusted_rates(
    runs_per_ball: f64,
    wickets_per_ball: f64,
    category: BowlerCategory,
    pitch: &PitchState,
    cfg: &OutcomeConfig,
) -> AdjustedRates {
    let raw = apply_pitch_modifiers(runs_per_ball, wickets_per_ball, category, pitch, cfg);
    AdjustedRates {
        runs_per_ball: cfg.runs_per_ball_range.clamp(raw.runs_per_ball),
        wickets_per_ball: cfg.wickets_per_ball_range.clamp(raw.wickets_per_ball),
        dot_adjustment: raw.dot_adjustment,
    }
}

// ============================================================================
// Run distribution
// ============================================================================

/// Probabilities of each scoring outcome, given the ball was not a wicket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunDistribution {
    pub dot: f64,
    pub one: f64,
    pub two: f64,
    pub four: f64,
    pub six: f64,
}

impl RunDistribution {
    pub fn total(&self) -> f64 {
        self.dot + self.one + self.two + self.four + self.six
    }

    /// Scale so the five probabilities sum to 1.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 || !total.is_finite() {
            return Self { dot: 1.0, one: 0.0, two: 0.0, four: 0.0, six: 0.0 };
        }
        Self {
            dot: self.dot / total,
            one: self.one / total,
            two: self.two / total,
            four: self.four / total,
            six: self.six / total,
        }
    }

    /// Walk the cumulative distribution (dot, one, two, four, six) with a
    /// uniform draw in `[0, 1)`. Falls back to a dot ball on rounding slack.
    pub fn pick(&self, r: f64) -> BallOutcome {
        let buckets = [
            (self.dot, BallOutcome::Dot),
            (self.one, BallOutcome::One),
            (self.two, BallOutcome::Two),
            (self.four, BallOutcome::Four),
            (self.six, BallOutcome::Six),
        ];
        let mut cumulative = 0.0;
        for (p, outcome) in buckets {
            cumulative += p;
            if r < cumulative {
                return outcome;
            }
        }
        BallOutcome::Dot
    }
}

/// Normalized run distribution for a delivery.
pub fn run_distribution(
    rates: &AdjustedRates,
    category: BowlerCategory,
    pitch: &PitchState,
    cfg: &OutcomeConfig,
) -> RunDistribution {
    let seam_condition = pitch.seam_condition();

    let mut dot = cfg.dot_base * rates.dot_adjustment;
    if category.is_fast() {
        dot *= 1.0 + (seam_condition - 1.0) * cfg.dot_seam_influence;
    }
    if category.is_spin() {
        dot *= 1.0 + (pitch.dryness - 1.0) * cfg.dot_dryness_influence;
    }
    dot *= 1.0 - (pitch.flatness - 1.0) * cfg.dot_flatness_influence;
    let dot = cfg.dot_range.clamp(dot);

    let mut boundary = 1.0 + (pitch.boundary_speed - 1.0) * cfg.boundary_speed_influence;
    if category.is_fast() {
        boundary *= 1.0 - (seam_condition - 1.0) * cfg.boundary_seam_influence;
    }

    let mut four = cfg.four_base * rates.runs_per_ball * boundary;
    let mut six = cfg.six_base * (rates.runs_per_ball / cfg.six_rpb_scale) * boundary;
    if category.is_spin() {
        four *= 1.0 - (pitch.dryness - 1.0) * cfg.spin_four_dryness_influence;
        six *= 1.0 - (pitch.dryness - 1.0) * cfg.spin_six_dryness_influence;
    }

    RunDistribution { dot, one: cfg.one_prob, two: cfg.two_prob, four, six }.normalized()
}
