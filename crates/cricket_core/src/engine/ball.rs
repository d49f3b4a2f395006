//! Single-delivery outcomes and the sampler that draws them.

use super::config::EngineConfig;
use super::pitch::PitchState;
use super::probability::{self, AdjustedRates, RunDistribution};
use super::rate_model::RateModel;
use crate::models::player::{BattingHand, BowlingRole};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one legal delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallOutcome {
    Dot,
    One,
    Two,
    /// Scored in real cricket but never drawn by the sampler.
    Three,
    Four,
    Six,
    Wicket,
}

impl BallOutcome {
    pub const ALL: [BallOutcome; 7] = [
        BallOutcome::Dot,
        BallOutcome::One,
        BallOutcome::Two,
        BallOutcome::Three,
        BallOutcome::Four,
        BallOutcome::Six,
        BallOutcome::Wicket,
    ];

    /// Runs off the bat; `None` for a wicket.
    pub fn runs(&self) -> Option<u32> {
        match self {
            BallOutcome::Dot => Some(0),
            BallOutcome::One => Some(1),
            BallOutcome::Two => Some(2),
            BallOutcome::Three => Some(3),
            BallOutcome::Four => Some(4),
            BallOutcome::Six => Some(6),
            BallOutcome::Wicket => None,
        }
    }

    pub fn is_wicket(&self) -> bool {
        matches!(self, BallOutcome::Wicket)
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, BallOutcome::Four | BallOutcome::Six)
    }
}

impl fmt::Display for BallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.runs() {
            Some(0) => write!(f, "."),
            Some(runs) => write!(f, "{runs}"),
            None => write!(f, "W"),
        }
    }
}

/// Everything the sampler decided before drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallProbabilities {
    pub rates: AdjustedRates,
    /// Normalized, conditional on no wicket
    pub runs: RunDistribution,
}

impl BallProbabilities {
    pub fn wicket(&self) -> f64 {
        self.rates.wickets_per_ball
    }
}

/// Draws ball outcomes from the rate model.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeSampler<'a> {
    model: &'a RateModel,
    config: &'a EngineConfig,
}

impl<'a> OutcomeSampler<'a> {
    pub fn new(model: &'a RateModel, config: &'a EngineConfig) -> Self {
        Self { model, config }
    }

    /// Calibrated probabilities for one matchup on `pitch`.
    ///
    /// The batter's record against the bowling role and the bowler's record
    /// against the batting hand are both shrunk towards the role baseline and
    /// averaged.
    pub fn probabilities(
        &self,
        batter: &str,
        bowler: &str,
        role: &BowlingRole,
        hand: BattingHand,
        pitch: &PitchState,
    ) -> BallProbabilities {
        let model_cfg = &self.config.model;
        let baseline = self.model.baseline().role_rate(role.code(), model_cfg);

        let bat = self.model.batting(batter, role.code());
        let bowl = self.model.bowling(bowler, hand);

        let batter_rpb = bat.adjusted_runs_per_ball(baseline.runs_per_ball, model_cfg.confidence);
        let batter_wpb =
            bat.adjusted_wickets_per_ball(baseline.wickets_per_ball, model_cfg.confidence);
        let bowler_rpb = bowl.adjusted_runs_per_ball(baseline.runs_per_ball, model_cfg.confidence);
        let bowler_wpb =
            bowl.adjusted_wickets_per_ball(baseline.wickets_per_ball, model_cfg.confidence);

        let category = role.category();
        let outcome_cfg = &self.config.outcome;
        let rates = probability::pitch_adjusted_rates(
            (batter_rpb + bowler_rpb) / 2.0,
            (batter_wpb + bowler_wpb) / 2.0,
            category,
            pitch,
            outcome_cfg,
        );
        let runs = probability::run_distribution(&rates, category, pitch, outcome_cfg);

        BallProbabilities { rates, runs }
    }

    /// Draw one delivery. Uses exactly two uniform draws when no wicket falls.
    pub fn sample_ball<R: Rng + ?Sized>(
        &self,
        batter: &str,
        bowler: &str,
        role: &BowlingRole,
        hand: BattingHand,
        pitch: &PitchState,
        rng: &mut R,
    ) -> BallOutcome {
        let probs = self.probabilities(batter, bowler, role, hand, pitch);
        if rng.gen::<f64>() < probs.wicket() {
            return BallOutcome::Wicket;
        }
        probs.runs.pick(rng.gen::<f64>())
    }
}
