//! Match output: innings records and the terminal outcome.

use super::innings::{BatterScore, InningsResult};
use crate::engine::pitch::PitchState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One completed innings in match context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsRecord {
    /// 1..=4
    pub number: u8,
    pub batting_team: String,
    pub bowling_team: String,
    pub result: InningsResult,
    /// Batting again immediately after being enforced to follow on.
    pub follow_on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    /// Pitch the innings was played on.
    pub pitch: PitchState,
    pub batters: Vec<BatterScore>,
}

/// How a match finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchOutcome {
    WinByWickets { winner: String, wickets: u32 },
    WinByRuns { winner: String, runs: u32 },
    WinByInningsAndRuns { winner: String, runs: u32 },
    /// Chasing side all out one run short.
    Tie,
    /// Match ball budget exhausted.
    Draw,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<&str> {
        match self {
            MatchOutcome::WinByWickets { winner, .. }
            | MatchOutcome::WinByRuns { winner, .. }
            | MatchOutcome::WinByInningsAndRuns { winner, .. } => Some(winner),
            MatchOutcome::Tie | MatchOutcome::Draw => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, MatchOutcome::Draw)
    }
}

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchOutcome::WinByWickets { winner, wickets } => {
                write!(f, "{winner} win by {}", plural(*wickets, "wicket"))
            }
            MatchOutcome::WinByRuns { winner, runs } => {
                write!(f, "{winner} win by {}", plural(*runs, "run"))
            }
            MatchOutcome::WinByInningsAndRuns { winner, runs } => {
                write!(f, "{winner} win by an innings and {}", plural(*runs, "run"))
            }
            MatchOutcome::Tie => f.write_str("Match tied"),
            MatchOutcome::Draw => f.write_str("Match drawn (time expired)"),
        }
    }
}

/// Full result of a simulated match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub seed: u64,
    pub team_a: String,
    pub team_b: String,
    pub innings: Vec<InningsRecord>,
    pub follow_on_enforced: bool,
    /// Balls bowled across all innings.
    pub total_balls: u32,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    pub fn innings_runs(&self, number: u8) -> Option<u32> {
        self.innings.iter().find(|i| i.number == number).map(|i| i.result.runs)
    }

    /// Multi-line scorecard summary.
    pub fn summary(&self) -> String {
        let mut out = format!("{} vs {}\n", self.team_a, self.team_b);
        for record in &self.innings {
            let mut line = format!("  {}: {} {}", ordinal(record.number), record.batting_team, record.result);
            if record.follow_on {
                line.push_str(" (following on)");
            }
            if let Some(target) = record.target {
                line.push_str(&format!(" [target {target}]"));
            }
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&format!("  Result: {}", self.outcome));
        out
    }
}

fn ordinal(n: u8) -> &'static str {
    match n {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        _ => "4th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        let o = MatchOutcome::WinByWickets { winner: "India".into(), wickets: 5 };
        assert_eq!(o.to_string(), "India win by 5 wickets");

        let o = MatchOutcome::WinByRuns { winner: "Australia".into(), runs: 1 };
        assert_eq!(o.to_string(), "Australia win by 1 run");

        let o = MatchOutcome::WinByInningsAndRuns { winner: "India".into(), runs: 45 };
        assert_eq!(o.to_string(), "India win by an innings and 45 runs");

        assert_eq!(MatchOutcome::Draw.to_string(), "Match drawn (time expired)");
        assert_eq!(MatchOutcome::Draw.winner(), None);
        assert_eq!(MatchOutcome::Tie.to_string(), "Match tied");
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let o = MatchOutcome::WinByRuns { winner: "England".into(), runs: 30 };
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["type"], "win_by_runs");
        assert_eq!(json["runs"], 30);
    }
}
