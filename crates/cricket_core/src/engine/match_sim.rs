//! Test match orchestration: innings order, follow-on, targets and the result.

use super::bowling_plan::MAX_PLAN_OVERS;
use super::config::{EngineConfig, MatchRules};
use super::innings::{BowlingOrder, DeclarationSetup, InningsRunner, InningsSetup};
use super::pitch::PitchState;
use super::rate_model::RateModel;
use crate::data::roles::RoleTable;
use crate::error::Result;
use crate::models::innings::InningsResult;
use crate::models::match_result::{InningsRecord, MatchOutcome, MatchResult};
use crate::models::team::Team;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything needed to play one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPlan {
    /// Bats first
    pub team_a: Team,
    pub team_b: Team,
    #[serde(default)]
    pub pitch: PitchState,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub config: EngineConfig,
}

impl MatchPlan {
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self { team_a, team_b, pitch: PitchState::neutral(), seed: 0, config: EngineConfig::default() }
    }

    pub fn with_pitch(mut self, pitch: PitchState) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Reject anything that would make the match meaningless before a ball is bowled.
    pub fn validate(&self) -> Result<()> {
        self.team_a.validate()?;
        self.team_b.validate()?;
        self.pitch.validate()?;
        self.config.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// What happens after three innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourthInnings {
    Chase { chasing: Side, target: u32 },
    /// The side that batted twice is still behind.
    InningsWin { winner: Side, margin: u32 },
}

/// The follow-on is compulsory once the first-innings lead reaches the threshold.
#[inline]
pub fn follow_on_required(first_innings_lead: i32, rules: &MatchRules) -> bool {
    first_innings_lead >= rules.follow_on_lead
}

/// Target arithmetic after innings 3.
///
/// `a1` and `b1` are the first innings totals, `third` the 3rd innings total
/// (team B's if it followed on, otherwise team A's). The chasing side needs
/// one more than the lead it has to overcome; a level match leaves a target of 1.
///
/// When the side that batted twice is still behind after its second innings,
/// the other side wins by an innings instead of chasing. After a follow-on
/// that side is B, so `(a1 - b1 - third) + 1` is never set as a chase target;
/// its positive values are exactly the innings-win cases.
pub fn fourth_innings(a1: u32, b1: u32, third: u32, follow_on: bool) -> FourthInnings {
    let (a1, b1, third) = (a1 as i64, b1 as i64, third as i64);
    if follow_on {
        let deficit = b1 + third - a1;
        if deficit < 0 {
            FourthInnings::InningsWin { winner: Side::A, margin: (-deficit) as u32 }
        } else {
            FourthInnings::Chase { chasing: Side::A, target: (deficit + 1) as u32 }
        }
    } else {
        let deficit = a1 + third - b1;
        if deficit < 0 {
            FourthInnings::InningsWin { winner: Side::B, margin: (-deficit) as u32 }
        } else {
            FourthInnings::Chase { chasing: Side::B, target: (deficit + 1) as u32 }
        }
    }
}

/// Result of a 4th-innings chase.
pub fn chase_outcome(
    chase: &InningsResult,
    target: u32,
    chasing: &str,
    defending: &str,
    time_expired: bool,
) -> MatchOutcome {
    if chase.runs >= target {
        return MatchOutcome::WinByWickets {
            winner: chasing.to_string(),
            wickets: 10u32.saturating_sub(chase.wickets),
        };
    }
    if time_expired {
        return MatchOutcome::Draw;
    }
    match target - chase.runs - 1 {
        0 => MatchOutcome::Tie,
        runs => MatchOutcome::WinByRuns { winner: defending.to_string(), runs },
    }
}

/// Mutable match state threaded through the innings.
struct MatchState {
    pitch: PitchState,
    balls_used: u32,
    max_balls: u32,
    innings: Vec<InningsRecord>,
}

impl MatchState {
    fn time_expired(&self) -> bool {
        self.balls_used >= self.max_balls
    }
}

struct InningsCall<'t> {
    number: u8,
    batting: &'t Team,
    bowling: &'t Team,
    target: Option<u32>,
    follow_on: bool,
    lead_offset: i32,
}

/// Plays a full Test match from a validated [`MatchPlan`].
pub struct MatchEngine<'a> {
    model: &'a RateModel,
    roles: &'a RoleTable,
    plan: MatchPlan,
    rng: ChaCha8Rng,
}

impl<'a> MatchEngine<'a> {
    pub fn new(model: &'a RateModel, roles: &'a RoleTable, plan: MatchPlan) -> Result<Self> {
        plan.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(plan.seed);
        Ok(Self { model, roles, plan, rng })
    }

    pub fn plan(&self) -> &MatchPlan {
        &self.plan
    }

    pub fn simulate(self) -> MatchResult {
        let MatchEngine { model, roles, plan, mut rng } = self;
        let runner = InningsRunner::new(model, roles, &plan.config);
        let (team_a, team_b) = (&plan.team_a, &plan.team_b);

        let mut state = MatchState {
            pitch: plan.pitch,
            balls_used: 0,
            max_balls: plan.config.rules.max_balls(),
            innings: Vec::with_capacity(4),
        };
        let mut follow_on = false;

        let outcome = 'result: {
            let a1 = play_innings(&runner, &plan.config, &mut state, &mut rng, InningsCall {
                number: 1,
                batting: team_a,
                bowling: team_b,
                target: None,
                follow_on: false,
                lead_offset: 0,
            })
            .runs;
            if state.time_expired() {
                break 'result MatchOutcome::Draw;
            }

            let b1 = play_innings(&runner, &plan.config, &mut state, &mut rng, InningsCall {
                number: 2,
                batting: team_b,
                bowling: team_a,
                target: None,
                follow_on: false,
                lead_offset: -(a1 as i32),
            })
            .runs;
            if state.time_expired() {
                break 'result MatchOutcome::Draw;
            }

            let lead = a1 as i32 - b1 as i32;
            follow_on = follow_on_required(lead, &plan.config.rules);
            let third = if follow_on {
                info!(team = %team_a.name, lead, "follow-on enforced");
                InningsCall {
                    number: 3,
                    batting: team_b,
                    bowling: team_a,
                    target: None,
                    follow_on: true,
                    lead_offset: -lead,
                }
            } else {
                InningsCall {
                    number: 3,
                    batting: team_a,
                    bowling: team_b,
                    target: None,
                    follow_on: false,
                    lead_offset: lead,
                }
            };
            let third_runs = play_innings(&runner, &plan.config, &mut state, &mut rng, third).runs;
            if state.time_expired() {
                break 'result MatchOutcome::Draw;
            }

            let side = |s: Side| match s {
                Side::A => team_a,
                Side::B => team_b,
            };
            match fourth_innings(a1, b1, third_runs, follow_on) {
                FourthInnings::InningsWin { winner, margin } => {
                    MatchOutcome::WinByInningsAndRuns { winner: side(winner).name.clone(), runs: margin }
                }
                FourthInnings::Chase { chasing, target } => {
                    let (batting, bowling) = match chasing {
                        Side::A => (team_a, team_b),
                        Side::B => (team_b, team_a),
                    };
                    let chase = play_innings(&runner, &plan.config, &mut state, &mut rng, InningsCall {
                        number: 4,
                        batting,
                        bowling,
                        target: Some(target),
                        follow_on: false,
                        lead_offset: 0,
                    });
                    chase_outcome(&chase, target, &batting.name, &bowling.name, state.time_expired())
                }
            }
        };

        info!(seed = plan.seed, balls = state.balls_used, result = %outcome, "match complete");

        MatchResult {
            seed: plan.seed,
            team_a: team_a.name.clone(),
            team_b: team_b.name.clone(),
            innings: state.innings,
            follow_on_enforced: follow_on,
            total_balls: state.balls_used,
            outcome,
        }
    }
}

fn play_innings<R: rand::Rng + ?Sized>(
    runner: &InningsRunner<'_>,
    config: &EngineConfig,
    state: &mut MatchState,
    rng: &mut R,
    call: InningsCall<'_>,
) -> InningsResult {
    let remaining = state.max_balls - state.balls_used;

    let planned = call
        .bowling
        .bowling_plan
        .as_ref()
        .map(|plan| plan.resolve((remaining / 6).min(MAX_PLAN_OVERS)))
        .filter(|overs| !overs.is_empty());
    let bowling = match planned {
        Some(overs) => BowlingOrder::PerOver(overs),
        None => BowlingOrder::Rotation(call.bowling.bowling_lineup()),
    };

    let setup = InningsSetup {
        batting_order: call.batting.batting_order(),
        bowling,
        max_balls: remaining,
        target: call.target,
        declaration: (call.number < 4)
            .then_some(DeclarationSetup { innings_number: call.number, lead_offset: call.lead_offset }),
    };

    let innings = runner.run(&setup, state.pitch, rng);
    let result = innings.result;

    state.balls_used += result.balls;
    state.innings.push(InningsRecord {
        number: call.number,
        batting_team: call.batting.name.clone(),
        bowling_team: call.bowling.name.clone(),
        result,
        follow_on: call.follow_on,
        target: call.target,
        pitch: state.pitch,
        batters: innings.batters,
    });
    state.pitch = state.pitch.deteriorate(&config.pitch_wear);

    result
}
