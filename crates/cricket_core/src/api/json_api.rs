//! JSON entry points for external callers.

use super::engine_config_env::engine_config_from_env;
use crate::data::deliveries::StatsBundle;
use crate::data::roles::RoleTable;
use crate::engine::{BowlingPlan, EngineConfig, MatchEngine, MatchPlan, PitchState, RateModel};
use crate::error::{MatchError, Result};
use crate::models::{MatchResult, Team};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u8 = 1;

/// Rate model and role table shared by every match a caller runs.
#[derive(Debug, Clone, Default)]
pub struct SimulationContext {
    pub model: RateModel,
    pub roles: RoleTable,
}

impl SimulationContext {
    pub fn new(model: RateModel, roles: RoleTable) -> Self {
        Self { model, roles }
    }

    pub fn from_bundle(bundle: StatsBundle) -> Self {
        let (model, roles) = bundle.into_model();
        Self { model, roles }
    }

    /// Validate and play one match.
    pub fn simulate(&self, plan: MatchPlan) -> Result<MatchResult> {
        Ok(MatchEngine::new(&self.model, &self.roles, plan)?.simulate())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRequest {
    pub name: String,
    pub players: Vec<String>,
    #[serde(default)]
    pub bowlers: Option<Vec<String>>,
    #[serde(default)]
    pub bowling_plan: Option<BowlingPlan>,
}

impl From<TeamRequest> for Team {
    fn from(req: TeamRequest) -> Self {
        Team { name: req.name, players: req.players, bowlers: req.bowlers, bowling_plan: req.bowling_plan }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub seed: u64,
    pub team_a: TeamRequest,
    pub team_b: TeamRequest,
    #[serde(default)]
    pub pitch: Option<PitchState>,
    /// Overrides any config named by `CRICKET_ENGINE_CONFIG`.
    #[serde(default)]
    pub engine_config: Option<EngineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub summary: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl MatchRequest {
    /// Turn the request into a plan. Engine config comes from the request,
    /// then the environment, then defaults.
    pub fn into_plan(self) -> Result<MatchPlan> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(MatchError::SchemaVersion { found: self.schema_version, expected: SCHEMA_VERSION });
        }

        let config = match self.engine_config {
            Some(config) => config,
            None => engine_config_from_env()?.unwrap_or_default(),
        };

        Ok(MatchPlan::new(self.team_a.into(), self.team_b.into())
            .with_seed(self.seed)
            .with_pitch(self.pitch.unwrap_or_default())
            .with_config(config))
    }
}

/// Simulate a match from a JSON [`MatchRequest`] and return a JSON [`MatchResponse`].
///
/// Same request and same context always produce the same bytes.
pub fn simulate_match_json(ctx: &SimulationContext, request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let result = ctx.simulate(request.into_plan()?)?;
    let response = MatchResponse { schema_version: SCHEMA_VERSION, summary: result.summary(), result };
    serde_json::to_string(&response).map_err(|e| MatchError::Serialization(e.to_string()))
}
