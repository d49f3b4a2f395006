//! Corpus-wide baselines and the read-only rate model the sampler draws from.

use super::config::ModelConfig;
use crate::data::stats_book::StatsBook;
use crate::models::player::BattingHand;
use crate::models::stats::MatchupStats;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Runs and wickets per ball for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleRate {
    pub runs_per_ball: f64,
    pub wickets_per_ball: f64,
}

impl RoleRate {
    pub fn new(runs_per_ball: f64, wickets_per_ball: f64) -> Self {
        Self { runs_per_ball, wickets_per_ball }
    }

    fn from_totals(totals: &MatchupStats) -> Self {
        Self::new(totals.runs_per_ball(), totals.wickets_per_ball())
    }
}

/// Regression targets for confidence shrinkage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    roles: FxHashMap<String, RoleRate>,
    lhb: RoleRate,
    rhb: RoleRate,
}

impl Baseline {
    /// Rate for a bowling role; unknown roles get the configured fallback.
    pub fn role_rate(&self, role_code: &str, config: &ModelConfig) -> RoleRate {
        self.roles.get(role_code).copied().unwrap_or(RoleRate {
            runs_per_ball: config.fallback_runs_per_ball,
            wickets_per_ball: config.fallback_wickets_per_ball,
        })
    }

    /// Observed role rate, without fallback.
    pub fn observed_role_rate(&self, role_code: &str) -> Option<RoleRate> {
        self.roles.get(role_code).copied()
    }

    /// Runs and wickets conceded per ball to batters of `hand`.
    pub fn hand_rate(&self, hand: BattingHand) -> RoleRate {
        match hand {
            BattingHand::Left => self.lhb,
            BattingHand::Right => self.rhb,
        }
    }

    pub fn role_codes(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }
}

/// Aggregate both books into baselines.
///
/// Role rates sum every batter's record against that role code; hand rates sum
/// every bowler's record against left and right handers. A bucket with no
/// balls gets 0.0 rates.
pub fn compute_baselines(batting: &StatsBook, bowling: &StatsBook) -> Baseline {
    let mut role_totals: FxHashMap<&str, MatchupStats> = FxHashMap::default();
    for (_, role, stats) in batting.iter() {
        role_totals.entry(role).or_default().merge(stats);
    }

    let mut lhb = MatchupStats::default();
    let mut rhb = MatchupStats::default();
    for (_, hand, stats) in bowling.iter() {
        match BattingHand::from_code(hand) {
            Some(BattingHand::Left) => lhb.merge(stats),
            Some(BattingHand::Right) => rhb.merge(stats),
            None => {}
        }
    }

    Baseline {
        roles: role_totals
            .into_iter()
            .map(|(role, totals)| (role.to_string(), RoleRate::from_totals(&totals)))
            .collect(),
        lhb: RoleRate::from_totals(&lhb),
        rhb: RoleRate::from_totals(&rhb),
    }
}

/// Both stats books plus their baselines. Built once, shared read-only.
#[derive(Debug, Clone, Default)]
pub struct RateModel {
    batting: StatsBook,
    bowling: StatsBook,
    baseline: Baseline,
}

impl RateModel {
    pub fn new(batting: StatsBook, bowling: StatsBook) -> Self {
        let baseline = compute_baselines(&batting, &bowling);
        Self { batting, bowling, baseline }
    }

    /// Batter's record against a bowling role (zero when never faced).
    pub fn batting(&self, batter: &str, role_code: &str) -> MatchupStats {
        self.batting.get(batter, role_code)
    }

    /// Bowler's record against a batting hand (zero when never bowled to).
    pub fn bowling(&self, bowler: &str, hand: BattingHand) -> MatchupStats {
        self.bowling.get(bowler, hand.code())
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn batting_book(&self) -> &StatsBook {
        &self.batting
    }

    pub fn bowling_book(&self) -> &StatsBook {
        &self.bowling
    }
}
