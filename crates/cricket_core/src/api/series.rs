//! Seeded series: many independent matches between the same two sides.

use super::json_api::SimulationContext;
use crate::engine::MatchPlan;
use crate::error::Result;
use crate::models::{MatchOutcome, MatchResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub team_a: String,
    pub team_b: String,
    pub matches: usize,
    pub team_a_wins: usize,
    pub team_b_wins: usize,
    pub draws: usize,
    pub ties: usize,
    pub innings_victories: usize,
    pub follow_ons: usize,
    pub average_balls: f64,
    /// `(seed, outcome)` in seed order
    pub outcomes: Vec<(u64, MatchOutcome)>,
}

impl SeriesSummary {
    fn from_results(team_a: &str, team_b: &str, results: &[MatchResult]) -> Self {
        let mut summary = SeriesSummary {
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            matches: results.len(),
            team_a_wins: 0,
            team_b_wins: 0,
            draws: 0,
            ties: 0,
            innings_victories: 0,
            follow_ons: 0,
            average_balls: 0.0,
            outcomes: Vec::with_capacity(results.len()),
        };

        let mut total_balls = 0u64;
        for result in results {
            match &result.outcome {
                MatchOutcome::Draw => summary.draws += 1,
                MatchOutcome::Tie => summary.ties += 1,
                outcome => {
                    if outcome.winner() == Some(team_a) {
                        summary.team_a_wins += 1;
                    } else {
                        summary.team_b_wins += 1;
                    }
                    if matches!(outcome, MatchOutcome::WinByInningsAndRuns { .. }) {
                        summary.innings_victories += 1;
                    }
                }
            }
            if result.follow_on_enforced {
                summary.follow_ons += 1;
            }
            total_balls += result.total_balls as u64;
            summary.outcomes.push((result.seed, result.outcome.clone()));
        }
        if !results.is_empty() {
            summary.average_balls = total_balls as f64 / results.len() as f64;
        }
        summary
    }
}

/// Play `plan` once per seed, in parallel. Every match owns its RNG, so the
/// summary matches a sequential run over the same seeds.
pub fn simulate_series(ctx: &SimulationContext, plan: &MatchPlan, seeds: &[u64]) -> Result<SeriesSummary> {
    plan.validate()?;
    let results = seeds
        .par_iter()
        .map(|&seed| ctx.simulate(plan.clone().with_seed(seed)))
        .collect::<Result<Vec<_>>>()?;
    Ok(SeriesSummary::from_results(&plan.team_a.name, &plan.team_b.name, &results))
}
