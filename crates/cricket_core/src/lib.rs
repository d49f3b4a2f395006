//! # cricket_core - Deterministic Test Match Cricket Simulation Engine
//!
//! Turns historical ball-by-ball records into a calibrated probability model
//! and plays five-day Test matches with it, one ball at a time.
//!
//! ## Features
//! - Confidence-shrunk matchup rates blended with role and hand baselines
//! - Pitch conditions that shape every delivery and wear between innings
//! - Declarations, the follow-on and a shared five-day ball budget
//! - 100% deterministic simulation (same seed = same result)
//! - JSON API for easy integration

#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_match_json, simulate_series, MatchRequest, MatchResponse, SeriesSummary, SimulationContext};
pub use data::{MatchFile, RoleTable, StatsBook, StatsBundle};
pub use engine::{
    BallOutcome, BowlingPlan, BowlingPlanBuilder, EngineConfig, MatchEngine, MatchPlan, OutcomeSampler, PitchState,
    RateModel,
};
pub use error::{MatchError, Result};
pub use models::{InningsResult, MatchOutcome, MatchResult, MatchupStats, Team};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub use api::SCHEMA_VERSION;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerRecord;
    use serde_json::json;

    const MATCH_FILE: &str = r#"{
        "innings": [{
            "overs": [{
                "deliveries": [
                    {"batter": "Root", "bowler": "Cummins", "runs": {"batter": 4, "total": 4}},
                    {"batter": "Root", "bowler": "Cummins", "runs": {"batter": 0, "total": 0}},
                    {"batter": "Root", "bowler": "Lyon", "runs": {"batter": 1, "total": 1}},
                    {"batter": "Stokes", "bowler": "Lyon", "runs": {"batter": 0, "total": 0},
                     "wickets": [{"player_out": "Stokes", "kind": "bowled"}]}
                ]
            }]
        }]
    }"#;

    fn context() -> SimulationContext {
        let roles: RoleTable = [
            PlayerRecord::from_codes("Root", "RHB", "ROS"),
            PlayerRecord::from_codes("Stokes", "LHB", "RFM"),
            PlayerRecord::from_codes("Cummins", "RHB", "RF"),
            PlayerRecord::from_codes("Lyon", "RHB", "ROS"),
        ]
        .into_iter()
        .collect();
        let mut bundle = StatsBundle::new(roles);
        let file: MatchFile = serde_json::from_str(MATCH_FILE).unwrap();
        bundle.ingest_match(&file);
        SimulationContext::from_bundle(bundle)
    }

    fn side(name: &str, stars: [&str; 2]) -> serde_json::Value {
        let mut players: Vec<String> = stars.iter().map(|s| s.to_string()).collect();
        players.extend((3..=11).map(|i| format!("{name} {i}")));
        json!({"name": name, "players": players})
    }

    #[test]
    fn test_basic_simulation() {
        let request = json!({
            "schema_version": 1,
            "seed": 42,
            "team_a": side("England", ["Root", "Stokes"]),
            "team_b": side("Australia", ["Cummins", "Lyon"]),
            "engine_config": {}
        });

        let out = simulate_match_json(&context(), &request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["schema_version"], SCHEMA_VERSION);
        assert!(parsed["summary"].as_str().unwrap().contains("Result:"));
    }

    #[test]
    fn test_determinism() {
        let request = json!({
            "schema_version": 1,
            "seed": 999,
            "team_a": side("England", ["Root", "Stokes"]),
            "team_b": side("Australia", ["Cummins", "Lyon"]),
            "pitch": {"seam": 0.8, "dryness": 1.5, "bounce": 0.9, "flatness": 1.2, "boundary_speed": 1.1},
            "engine_config": {}
        })
        .to_string();

        let ctx = context();
        let first = simulate_match_json(&ctx, &request).unwrap();
        let second = simulate_match_json(&ctx, &request).unwrap();
        assert_eq!(first, second, "Same seed should produce same result");
    }

    #[test]
    fn test_ingested_stats_reach_the_model() {
        let ctx = context();
        assert_eq!(ctx.model.batting("Root", "RF"), MatchupStats::new(2, 4, 0));
        assert_eq!(ctx.model.batting("Stokes", "ROS"), MatchupStats::new(1, 0, 1));
        assert!(ctx.model.baseline().observed_role_rate("ROS").is_some());
        assert!(ctx.roles.contains("Lyon"));
    }
}
