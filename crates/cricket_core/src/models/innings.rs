use serde::{Deserialize, Serialize};
use std::fmt;

/// Final state of one innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsResult {
    pub runs: u32,
    /// Never more than 10.
    pub wickets: u32,
    pub balls: u32,
    pub declared: bool,
}

impl InningsResult {
    pub fn new(runs: u32, wickets: u32, balls: u32, declared: bool) -> Self {
        debug_assert!(wickets <= 10);
        Self { runs, wickets, balls, declared }
    }

    /// Overs in cricket notation, e.g. `"87.4"`.
    pub fn overs(&self) -> String {
        format!("{}.{}", self.balls / 6, self.balls % 6)
    }

    /// Runs per six balls; 0.0 before a ball is bowled.
    pub fn run_rate(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        self.runs as f64 * 6.0 / self.balls as f64
    }
}

impl fmt::Display for InningsResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let suffix = if self.declared { " dec" } else { "" };
        write!(
            f,
            "{}/{}{} in {} overs (RR: {:.2})",
            self.runs,
            self.wickets,
            suffix,
            self.overs(),
            self.run_rate()
        )
    }
}

/// Runs scored by one batter in an innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterScore {
    pub name: String,
    pub runs: u32,
    pub balls_faced: u32,
    pub out: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_all_out() {
        let result = InningsResult::new(287, 10, 524, false);
        assert_eq!(result.overs(), "87.2");
        assert_eq!(result.to_string(), "287/10 in 87.2 overs (RR: 3.29)");
    }

    #[test]
    fn test_display_declared() {
        let result = InningsResult::new(512, 6, 900, true);
        assert_eq!(result.to_string(), "512/6 dec in 150.0 overs (RR: 3.41)");
    }

    #[test]
    fn test_run_rate_without_balls() {
        let result = InningsResult::new(0, 0, 0, false);
        assert_eq!(result.run_rate(), 0.0);
        assert_eq!(result.to_string(), "0/0 in 0.0 overs (RR: 0.00)");
    }
}
