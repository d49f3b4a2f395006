use crate::engine::bowling_plan::BowlingPlan;
use crate::error::{MatchError, Result};
use serde::{Deserialize, Serialize};

/// Smallest batting order that can start an innings (striker + non-striker).
pub const MIN_BATTERS: usize = 2;

/// A side as it takes the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Batting order, openers first.
    pub players: Vec<String>,
    /// Bowling lineup for spell rotation; the whole XI when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowlers: Option<Vec<String>>,
    /// Over-by-over plan used when this side bowls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowling_plan: Option<BowlingPlan>,
}

impl Team {
    pub fn new(name: &str, players: Vec<String>) -> Self {
        Self { name: name.to_string(), players, bowlers: None, bowling_plan: None }
    }

    pub fn with_bowlers(mut self, bowlers: Vec<String>) -> Self {
        self.bowlers = Some(bowlers);
        self
    }

    pub fn with_bowling_plan(mut self, plan: BowlingPlan) -> Self {
        self.bowling_plan = Some(plan);
        self
    }

    pub fn batting_order(&self) -> &[String] {
        &self.players
    }

    /// Bowlers used for mechanical spell rotation.
    pub fn bowling_lineup(&self) -> &[String] {
        match &self.bowlers {
            Some(bowlers) if !bowlers.is_empty() => bowlers,
            _ => &self.players,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MatchError::invalid_team(&self.name, "team name is empty"));
        }
        if self.players.len() < MIN_BATTERS {
            return Err(MatchError::BattingOrderTooShort {
                team: self.name.clone(),
                expected: MIN_BATTERS,
                found: self.players.len(),
            });
        }
        if let Some(blank) = self.players.iter().position(|p| p.trim().is_empty()) {
            return Err(MatchError::invalid_team(
                &self.name,
                format!("batting position {} has no player", blank + 1),
            ));
        }
        if self.bowling_lineup().iter().all(|b| b.trim().is_empty()) {
            return Err(MatchError::EmptyBowlingLineup { team: self.name.clone() });
        }
        Ok(())
    }
}
