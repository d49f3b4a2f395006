//! Captaincy: when a batting side calls its innings closed.

use super::config::DeclarationConfig;
use rand::Rng;

/// Match situation seen by the captain before a ball.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationContext<'a> {
    /// 1..=4
    pub innings_number: u8,
    pub innings_runs: u32,
    /// Overs bowled this innings, fractional (`balls / 6`)
    pub innings_overs: f64,
    /// Runs this innings plus the lead carried in. Equals `innings_runs` in the 1st innings.
    pub lead: i32,
    pub remaining_overs: f64,
    /// Running score of every batter who has batted this innings
    pub batter_scores: &'a [u32],
}

/// Score within ten of a hundred (90–99, 190–199, ...).
#[inline]
fn in_the_nineties(score: u32) -> bool {
    (90..=99).contains(&(score % 100))
}

/// Stateless declaration rules; randomness comes from the caller's RNG.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationPolicy<'a> {
    config: &'a DeclarationConfig,
}

impl<'a> DeclarationPolicy<'a> {
    pub fn new(config: &'a DeclarationConfig) -> Self {
        Self { config }
    }

    pub fn should_declare<R: Rng + ?Sized>(&self, ctx: &DeclarationContext<'_>, rng: &mut R) -> bool {
        let cfg = self.config;

        if ctx.innings_number >= 4 || ctx.innings_overs < cfg.min_overs {
            return false;
        }

        // Nobody declares on a batter in the nineties, usually.
        for &score in ctx.batter_scores {
            if in_the_nineties(score) && rng.gen::<f64>() < cfg.courtesy_hold_prob {
                return false;
            }
        }

        match ctx.innings_number {
            1 => self.first_innings(ctx, rng),
            2 => self.second_innings(ctx, rng),
            3 => self.third_innings(ctx),
            _ => false,
        }
    }

    fn first_innings<R: Rng + ?Sized>(&self, ctx: &DeclarationContext<'_>, rng: &mut R) -> bool {
        let cfg = self.config;
        let big_innings = ctx.innings_runs > cfg.first_runs_threshold
            || ctx.innings_overs > cfg.first_overs_threshold;
        big_innings && rng.gen::<f64>() < ctx.innings_runs as f64 / cfg.first_runs_divisor
    }

    fn second_innings<R: Rng + ?Sized>(&self, ctx: &DeclarationContext<'_>, rng: &mut R) -> bool {
        let cfg = self.config;
        let runs = ctx.innings_runs;
        let lead = ctx.lead;

        let big_total = runs > cfg.second_big_total && lead > cfg.second_big_total_min_lead;
        if big_total && rng.gen::<f64>() < cfg.second_scenario_prob {
            return true;
        }

        let long_innings = lead as f64 > runs as f64 * cfg.second_long_innings_lead_ratio
            && ctx.innings_overs > cfg.second_long_innings_overs
            && runs > cfg.second_long_innings_runs;
        if long_innings && rng.gen::<f64>() < cfg.second_scenario_prob {
            return true;
        }

        let healthy_lead = lead > cfg.second_healthy_lead && runs > cfg.second_healthy_runs;
        healthy_lead && rng.gen::<f64>() < cfg.second_scenario_prob
    }

    /// Set a target the opposition can't reach in the time left.
    fn third_innings(&self, ctx: &DeclarationContext<'_>) -> bool {
        let cfg = self.config;
        let reachable = ctx.remaining_overs * cfg.expected_opposition_rpo + cfg.third_lead_buffer;
        ctx.remaining_overs > cfg.third_min_remaining_overs && ctx.lead as f64 > reachable
    }
}
