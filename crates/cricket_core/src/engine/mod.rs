//! Simulation engine.
//!
//! Leaves first: [`rate_model`] and [`pitch`] feed [`ball`], which
//! [`innings`] drives with [`declaration`] polled before each ball;
//! [`match_sim`] sequences up to four innings into a result.

pub mod ball;
pub mod bowling_plan;
pub mod config;
pub mod declaration;
pub mod innings;
pub mod match_sim;
pub mod pitch;
pub mod probability;
pub mod rate_model;

pub use ball::{BallOutcome, BallProbabilities, OutcomeSampler};
pub use bowling_plan::{BowlingPlan, BowlingPlanBuilder, MAX_PLAN_OVERS};
pub use config::EngineConfig;
pub use declaration::{DeclarationContext, DeclarationPolicy};
pub use innings::{BallEvent, BowlingOrder, DeclarationSetup, InningsOutcome, InningsRunner, InningsSetup};
pub use match_sim::{
    chase_outcome, follow_on_required, fourth_innings, FourthInnings, MatchEngine, MatchPlan, Side,
};
pub use pitch::{PitchRecommender, PitchState};
pub use rate_model::{compute_baselines, Baseline, RateModel, RoleRate};
