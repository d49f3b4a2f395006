//! # Engine Configuration
//!
//! Every tuning constant of the simulation lives here so match balance can be
//! adjusted without touching engine code.
//!
//! ## Usage
//! ```rust
//! use cricket_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let legacy = EngineConfig::legacy();
//! assert!(legacy.model.confidence > config.model.confidence);
//! ```

mod declaration_config;
mod model_config;
mod outcome_config;
mod rules_config;

pub use declaration_config::DeclarationConfig;
pub use model_config::ModelConfig;
pub use outcome_config::{OutcomeConfig, Range};
pub use rules_config::{InningsConfig, MatchRules, PitchWearConfig};

use crate::error::{MatchError, Result};
use serde::{Deserialize, Serialize};

/// Full engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Confidence shrinkage and baseline fallbacks
    pub model: ModelConfig,
    /// Ball outcome distribution and pitch modifiers
    pub outcome: OutcomeConfig,
    /// Captaincy
    pub declaration: DeclarationConfig,
    /// Spells, tail and last-wicket rules
    pub innings: InningsConfig,
    /// Match length and follow-on
    pub rules: MatchRules,
    /// Pitch deterioration between innings
    pub pitch_wear: PitchWearConfig,
}

impl EngineConfig {
    /// Canonical tuning (default)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Earlier tuning with a 1000-ball confidence constant: small samples
    /// regress harder towards the role baseline.
    pub fn legacy() -> Self {
        let mut cfg = Self::default();
        cfg.model.confidence = 1000.0;
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse by file name: `.yaml`/`.yml` as YAML, anything else as JSON.
    pub fn from_file_contents(file_name: &str, contents: &str) -> Result<Self> {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::from_yaml(contents)
        } else {
            Self::from_json(contents)
        }
    }

    pub fn validate(&self) -> Result<()> {
        fn probability(name: &str, p: f64) -> Result<()> {
            if !(0.0..=1.0).contains(&p) {
                return Err(MatchError::InvalidConfig(format!("{name} must be within 0..=1, got {p}")));
            }
            Ok(())
        }
        fn range(name: &str, r: &Range) -> Result<()> {
            if !r.is_valid() {
                return Err(MatchError::InvalidConfig(format!(
                    "{name} range is inverted or not finite: {}..={}",
                    r.min, r.max
                )));
            }
            Ok(())
        }

        if !(self.model.confidence.is_finite() && self.model.confidence > 0.0) {
            return Err(MatchError::InvalidConfig(format!(
                "confidence must be positive, got {}",
                self.model.confidence
            )));
        }
        probability("fallback_wickets_per_ball", self.model.fallback_wickets_per_ball)?;

        range("runs_per_ball_range", &self.outcome.runs_per_ball_range)?;
        range("wickets_per_ball_range", &self.outcome.wickets_per_ball_range)?;
        range("dot_range", &self.outcome.dot_range)?;
        probability("wickets_per_ball_range.max", self.outcome.wickets_per_ball_range.max)?;
        if self.outcome.wickets_per_ball_range.min < 0.0 || self.outcome.dot_range.min < 0.0 {
            return Err(MatchError::InvalidConfig("probability ranges must be non-negative".into()));
        }
        if self.outcome.one_prob < 0.0
            || self.outcome.two_prob < 0.0
            || self.outcome.four_base < 0.0
            || self.outcome.six_base < 0.0
            || self.outcome.six_rpb_scale <= 0.0
        {
            return Err(MatchError::InvalidConfig("run outcome weights must be non-negative".into()));
        }

        probability("courtesy_hold_prob", self.declaration.courtesy_hold_prob)?;
        probability("second_scenario_prob", self.declaration.second_scenario_prob)?;
        if self.declaration.first_runs_divisor <= 0.0 {
            return Err(MatchError::InvalidConfig("first_runs_divisor must be positive".into()));
        }

        probability("tail_boundary_nerf_prob", self.innings.tail_boundary_nerf_prob)?;
        probability("last_wicket_collapse_prob", self.innings.last_wicket_collapse_prob)?;
        if self.innings.spell_balls == 0 || self.innings.spell_balls % 6 != 0 {
            return Err(MatchError::InvalidConfig(format!(
                "spell_balls must be a positive whole number of overs, got {}",
                self.innings.spell_balls
            )));
        }
        if crate::models::player::BattingHand::from_code(&self.innings.default_batting_hand).is_none() {
            return Err(MatchError::InvalidConfig(format!(
                "default_batting_hand must be LHB or RHB, got '{}'",
                self.innings.default_batting_hand
            )));
        }
        if self.innings.default_bowling_role.trim().is_empty() {
            return Err(MatchError::InvalidConfig("default_bowling_role is empty".into()));
        }
        if self.rules.max_overs == 0 {
            return Err(MatchError::InvalidConfig("max_overs must be positive".into()));
        }
        if self.rules.max_overs > MatchRules::MAX_OVERS_LIMIT {
            return Err(MatchError::InvalidConfig(format!(
                "max_overs must be at most {}, got {}",
                MatchRules::MAX_OVERS_LIMIT,
                self.rules.max_overs
            )));
        }

        let wear = &self.pitch_wear;
        for (name, m) in [
            ("seam", wear.seam),
            ("dryness", wear.dryness),
            ("bounce", wear.bounce),
            ("flatness", wear.flatness),
            ("boundary_speed", wear.boundary_speed),
        ] {
            if !(m.is_finite() && m > 0.0) {
                return Err(MatchError::InvalidConfig(format!("pitch wear {name} must be positive")));
            }
        }
        Ok(())
    }
}

// ========== Tests ==========
