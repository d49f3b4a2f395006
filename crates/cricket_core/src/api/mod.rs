//! Public entry points: JSON match API, environment config and seeded series.

pub mod engine_config_env;
pub mod json_api;
pub mod series;

pub use engine_config_env::{engine_config_from_env, engine_config_from_path, ENGINE_CONFIG_PATH_ENV};
pub use json_api::{
    simulate_match_json, MatchRequest, MatchResponse, SimulationContext, TeamRequest, SCHEMA_VERSION,
};
pub use series::{simulate_series, SeriesSummary};
