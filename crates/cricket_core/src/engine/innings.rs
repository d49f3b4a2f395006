//! One innings, ball by ball.

use super::ball::{BallOutcome, OutcomeSampler};
use super::config::EngineConfig;
use super::declaration::{DeclarationContext, DeclarationPolicy};
use super::pitch::PitchState;
use super::rate_model::RateModel;
use crate::data::roles::RoleTable;
use crate::models::innings::{BatterScore, InningsResult};
use crate::models::player::{BattingHand, BowlingRole};
use rand::Rng;
use tracing::{debug, info, trace};

const MAX_WICKETS: u32 = 10;
const BALLS_PER_OVER: u32 = 6;

/// Who bowls.
#[derive(Debug, Clone)]
pub enum BowlingOrder<'a> {
    /// Fixed-length spells through a lineup.
    Rotation(&'a [String]),
    /// Bowler of each over, cycled when the innings outlasts the list.
    PerOver(Vec<&'a str>),
}

impl<'a> BowlingOrder<'a> {
    fn is_empty(&self) -> bool {
        match self {
            BowlingOrder::Rotation(lineup) => lineup.is_empty(),
            BowlingOrder::PerOver(overs) => overs.is_empty(),
        }
    }
}

/// Lets the batting side declare.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationSetup {
    /// 1..=4
    pub innings_number: u8,
    /// Added to this innings' runs to give the live lead.
    /// 0 in the 1st innings, minus the opposition's 1st innings in the 2nd.
    pub lead_offset: i32,
}

#[derive(Debug, Clone)]
pub struct InningsSetup<'a> {
    pub batting_order: &'a [String],
    pub bowling: BowlingOrder<'a>,
    /// Balls left in the match
    pub max_balls: u32,
    pub target: Option<u32>,
    pub declaration: Option<DeclarationSetup>,
}

/// One delivery as it happened.
#[derive(Debug, Clone, Copy)]
pub struct BallEvent<'a> {
    /// 1-based ball of the innings
    pub ball: u32,
    pub batter: &'a str,
    pub bowler: &'a str,
    pub outcome: BallOutcome,
    /// Runs added after the tail rule
    pub runs: u32,
    pub total_runs: u32,
    pub wickets: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InningsOutcome {
    pub result: InningsResult,
    /// Everyone who came to the crease, in batting order.
    pub batters: Vec<BatterScore>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Crease {
    runs: u32,
    balls_faced: u32,
    out: bool,
}

/// Plays innings against a shared rate model.
#[derive(Debug, Clone, Copy)]
pub struct InningsRunner<'a> {
    sampler: OutcomeSampler<'a>,
    roles: &'a RoleTable,
    config: &'a EngineConfig,
}

impl<'a> InningsRunner<'a> {
    pub fn new(model: &'a RateModel, roles: &'a RoleTable, config: &'a EngineConfig) -> Self {
        Self { sampler: OutcomeSampler::new(model, config), roles, config }
    }

    pub fn run<R: Rng + ?Sized>(
        &self,
        setup: &InningsSetup<'_>,
        pitch: PitchState,
        rng: &mut R,
    ) -> InningsOutcome {
        self.run_observed(setup, pitch, rng, |_| {})
    }

    /// Play the innings, reporting every delivery to `observer`.
    pub fn run_observed<R, F>(
        &self,
        setup: &InningsSetup<'_>,
        pitch: PitchState,
        rng: &mut R,
        mut observer: F,
    ) -> InningsOutcome
    where
        R: Rng + ?Sized,
        F: FnMut(&BallEvent<'_>),
    {
        let rules = &self.config.innings;
        let order = setup.batting_order;

        if order.len() < 2 || setup.bowling.is_empty() {
            return InningsOutcome { result: InningsResult::new(0, 0, 0, false), batters: Vec::new() };
        }

        let default_role = BowlingRole::new(&rules.default_bowling_role);
        let default_hand =
            BattingHand::from_code(&rules.default_batting_hand).unwrap_or(BattingHand::Right);
        let policy = DeclarationPolicy::new(&self.config.declaration);

        let mut crease = vec![Crease::default(); order.len()];
        let mut striker = 0usize;
        let mut non_striker = 1usize;
        let mut next_batter = 2usize;

        let mut bowler_idx = 0usize;
        let mut spell_balls = 0u32;

        let mut total_runs = 0u32;
        let mut wickets = 0u32;
        let mut balls = 0u32;
        let mut declared = false;

        let mut runs_so_far: Vec<u32> = Vec::with_capacity(order.len());

        while wickets < MAX_WICKETS && balls < setup.max_balls {
            if let (Some(dec), None) = (setup.declaration, setup.target) {
                runs_so_far.clear();
                runs_so_far.extend(crease[..next_batter].iter().map(|c| c.runs));
                let ctx = DeclarationContext {
                    innings_number: dec.innings_number,
                    innings_runs: total_runs,
                    innings_overs: balls as f64 / BALLS_PER_OVER as f64,
                    lead: total_runs as i32 + dec.lead_offset,
                    remaining_overs: (setup.max_balls - balls) as f64 / BALLS_PER_OVER as f64,
                    batter_scores: &runs_so_far,
                };
                if policy.should_declare(&ctx, rng) {
                    info!(
                        innings = dec.innings_number,
                        runs = total_runs,
                        wickets,
                        lead = ctx.lead,
                        "declared"
                    );
                    declared = true;
                    break;
                }
            }

            let batter = order[striker].as_str();
            let bowler = match &setup.bowling {
                BowlingOrder::Rotation(lineup) => lineup[bowler_idx].as_str(),
                BowlingOrder::PerOver(overs) => overs[(balls / BALLS_PER_OVER) as usize % overs.len()],
            };
            let role = self
                .roles
                .bowling_role(bowler)
                .filter(|r| !r.is_empty())
                .unwrap_or(&default_role);
            let hand = self.roles.batting_hand(batter).unwrap_or(default_hand);

            let outcome = self.sampler.sample_ball(batter, bowler, role, hand, &pitch, rng);
            balls += 1;
            spell_balls += 1;
            crease[striker].balls_faced += 1;

            let mut scored = 0;
            let mut innings_over = false;
            match outcome.runs() {
                None => {
                    wickets += 1;
                    crease[striker].out = true;
                    trace!(batter, bowler, wickets, runs = total_runs, "wicket");

                    if wickets == MAX_WICKETS - 1 && rng.gen::<f64>() < rules.last_wicket_collapse_prob {
                        innings_over = true;
                    } else if next_batter < order.len() {
                        striker = next_batter;
                        next_batter += 1;
                    } else {
                        innings_over = true;
                    }
                }
                Some(runs) => {
                    scored = runs;
                    let is_tail = striker >= rules.tail_start_index;
                    if is_tail && scored >= 4 && rng.gen::<f64>() < rules.tail_boundary_nerf_prob {
                        scored = 1;
                    }
                    total_runs += scored;
                    crease[striker].runs += scored;

                    if setup.target.is_some_and(|t| total_runs >= t) {
                        innings_over = true;
                    } else if scored % 2 == 1 {
                        std::mem::swap(&mut striker, &mut non_striker);
                    }
                }
            }

            observer(&BallEvent { ball: balls, batter, bowler, outcome, runs: scored, total_runs, wickets });

            if innings_over {
                break;
            }

            if balls % BALLS_PER_OVER == 0 {
                std::mem::swap(&mut striker, &mut non_striker);
                if let BowlingOrder::Rotation(lineup) = &setup.bowling {
                    if spell_balls >= rules.spell_balls {
                        bowler_idx = (bowler_idx + 1) % lineup.len();
                        spell_balls = 0;
                    }
                }
            }
        }

        let result = InningsResult::new(total_runs, wickets, balls, declared);
        debug!(%result, target = ?setup.target, "innings complete");

        let batters = order[..next_batter]
            .iter()
            .zip(&crease)
            .map(|(name, c)| BatterScore {
                name: name.clone(),
                runs: c.runs,
                balls_faced: c.balls_faced,
                out: c.out,
            })
            .collect();

        InningsOutcome { result, batters }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::Range;
    use crate::models::player::PlayerRecord;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{prefix}{i}")).collect()
    }

    fn rotation<'a>(batting: &'a [String], bowling: &'a [String], max_balls: u32) -> InningsSetup<'a> {
        InningsSetup {
            batting_order: batting,
            bowling: BowlingOrder::Rotation(bowling),
            max_balls,
            target: None,
            declaration: None,
        }
    }

    fn always_out() -> EngineConfig {
        let mut cfg = EngineConfig::default();
        cfg.outcome.wickets_per_ball_range = Range::new(1.0, 1.0);
        cfg.innings.last_wicket_collapse_prob = 0.0;
        cfg
    }

    fn never_out() -> EngineConfig {
        let mut cfg = EngineConfig::default();
        cfg.outcome.wickets_per_ball_range = Range::new(0.0, 0.0);
        cfg
    }

    #[test]
    fn test_innings_invariants() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let config = EngineConfig::default();
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);
        let bowling = names("bowl", 5);

        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let setup = rotation(&batting, &bowling, 600);
            let mut last_total = 0;
            let mut events = 0;
            let outcome = runner.run_observed(&setup, PitchState::neutral(), &mut rng, |e| {
                assert!(e.total_runs >= last_total);
                assert!(e.wickets <= 10);
                last_total = e.total_runs;
                events += 1;
            });
            let r = outcome.result;
            assert!(r.wickets <= 10);
            assert!(r.balls <= 600);
            assert_eq!(r.balls, events);
            assert_eq!(r.runs, last_total);
            let batter_runs: u32 = outcome.batters.iter().map(|b| b.runs).sum();
            assert_eq!(batter_runs, r.runs);
        }
    }

    #[test]
    fn test_last_wicket_ends_innings() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let config = always_out();
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);
        let bowling = names("bowl", 1);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = runner.run(&rotation(&batting, &bowling, 2700), PitchState::neutral(), &mut rng);
        assert_eq!(outcome.result, InningsResult::new(0, 10, 10, false));
        assert_eq!(outcome.batters.len(), 11);
        assert!(outcome.batters.iter().filter(|b| b.out).count() == 10);
    }

    #[test]
    fn test_short_batting_order_runs_out_of_batters() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let config = always_out();
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 4);
        let bowling = names("bowl", 1);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = runner.run(&rotation(&batting, &bowling, 2700), PitchState::neutral(), &mut rng);
        assert_eq!(outcome.result.wickets, 3);
        assert_eq!(outcome.result.balls, 3);
    }

    #[test]
    fn test_ninth_wicket_collapse() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let mut config = always_out();
        config.innings.last_wicket_collapse_prob = 1.0;
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);
        let bowling = names("bowl", 1);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = runner.run(&rotation(&batting, &bowling, 2700), PitchState::neutral(), &mut rng);
        assert_eq!(outcome.result.wickets, 9);
        assert_eq!(outcome.result.balls, 9);
    }

    #[test]
    fn test_stops_on_target() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let config = never_out();
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);
        let bowling = names("bowl", 5);

        let mut setup = rotation(&batting, &bowling, 2700);
        setup.target = Some(120);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let r = runner.run(&setup, PitchState::neutral(), &mut rng).result;
        assert!(r.runs >= 120 && r.runs < 126);
        assert!(r.balls < 2700);
        assert!(!r.declared);
    }

    #[test]
    fn test_ball_limit() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let config = never_out();
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);
        let bowling = names("bowl", 5);

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let r = runner.run(&rotation(&batting, &bowling, 77), PitchState::neutral(), &mut rng).result;
        assert_eq!(r.balls, 77);
        assert_eq!(r.wickets, 0);
    }

    #[test]
    fn test_third_innings_declaration() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let config = never_out();
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);
        let bowling = names("bowl", 5);

        let mut setup = rotation(&batting, &bowling, 2000);
        setup.declaration = Some(DeclarationSetup { innings_number: 3, lead_offset: 1500 });
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let r = runner.run(&setup, PitchState::neutral(), &mut rng).result;
        assert!(r.declared);
        assert_eq!(r.balls, 6);
    }

    #[test]
    fn test_spell_rotation() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let config = never_out();
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);
        let bowling = names("bowl", 2);

        let mut bowlers = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        runner.run_observed(&rotation(&batting, &bowling, 66), PitchState::neutral(), &mut rng, |e| {
            bowlers.push(e.bowler.to_string());
        });
        assert!(bowlers[..30].iter().all(|b| b == "bowl1"));
        assert!(bowlers[30..60].iter().all(|b| b == "bowl2"));
        assert!(bowlers[60..].iter().all(|b| b == "bowl1"));
    }

    #[test]
    fn test_per_over_plan() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let config = never_out();
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);

        let setup = InningsSetup {
            batting_order: &batting,
            bowling: BowlingOrder::PerOver(vec!["A", "B", "C"]),
            max_balls: 24,
            target: None,
            declaration: None,
        };
        let mut bowlers = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        runner.run_observed(&setup, PitchState::neutral(), &mut rng, |e| bowlers.push(e.bowler.to_string()));
        let per_over: Vec<&str> = bowlers.chunks(6).map(|over| over[0].as_str()).collect();
        assert_eq!(per_over, vec!["A", "B", "C", "A"]);
        assert!(bowlers.chunks(6).all(|over| over.iter().all(|b| *b == over[0])));
    }

    #[test]
    fn test_tail_boundaries_become_singles() {
        let model = RateModel::default();
        let roles: RoleTable = [PlayerRecord::from_codes("bowl1", "RHB", "LF")].into_iter().collect();
        let mut config = never_out();
        config.innings.tail_start_index = 0;
        config.innings.tail_boundary_nerf_prob = 1.0;
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);
        let bowling = names("bowl", 1);

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut converted = 0;
        runner.run_observed(&rotation(&batting, &bowling, 600), PitchState::neutral(), &mut rng, |e| {
            if e.outcome.is_boundary() {
                assert_eq!(e.runs, 1);
                converted += 1;
            }
        });
        assert!(converted > 0);
    }

    #[test]
    fn test_seeded_innings_is_reproducible() {
        let model = RateModel::default();
        let roles = RoleTable::new();
        let config = EngineConfig::default();
        let runner = InningsRunner::new(&model, &roles, &config);
        let batting = names("bat", 11);
        let bowling = names("bowl", 5);
        let setup = rotation(&batting, &bowling, 2700);

        let play = |seed| runner.run(&setup, PitchState::new(1.2, 1.0, 1.1, 0.9, 1.0), &mut ChaCha8Rng::seed_from_u64(seed));
        assert_eq!(play(99), play(99));
    }
}
