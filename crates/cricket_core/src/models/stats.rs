//! Per-matchup ball counts and the rates derived from them.

use serde::{Deserialize, Serialize};

/// Below this many balls a record is treated as a small sample.
pub const SMALL_SAMPLE_BALLS: u32 = 100;

/// Observed balls, runs and dismissals for one (player, opposing category) pair.
///
/// On the batting side the category is the bowler's role code (`"RF"`, `"ROS"`, ...);
/// on the bowling side it is the batter's hand (`"LHB"` / `"RHB"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupStats {
    pub balls: u32,
    pub runs: u32,
    pub dismissals: u32,
}

impl MatchupStats {
    pub fn new(balls: u32, runs: u32, dismissals: u32) -> Self {
        debug_assert!(dismissals <= balls, "dismissals cannot exceed balls");
        Self { balls, runs, dismissals }
    }

    /// Record one legal delivery.
    pub fn record_ball(&mut self, runs: u32, dismissal: bool) {
        self.balls += 1;
        self.runs += runs;
        if dismissal {
            self.dismissals += 1;
        }
    }

    /// Fold another record into this one.
    pub fn merge(&mut self, other: &MatchupStats) {
        self.balls += other.balls;
        self.runs += other.runs;
        self.dismissals += other.dismissals;
    }

    pub fn runs_per_ball(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        self.runs as f64 / self.balls as f64
    }

    pub fn wickets_per_ball(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        self.dismissals as f64 / self.balls as f64
    }

    /// Runs per dismissal; with no dismissals the raw run total.
    pub fn batting_average(&self) -> f64 {
        if self.dismissals == 0 {
            return self.runs as f64;
        }
        self.runs as f64 / self.dismissals as f64
    }

    /// Runs per 100 balls.
    pub fn batting_strike_rate(&self) -> f64 {
        self.runs_per_ball() * 100.0
    }

    pub fn bowling_average(&self) -> f64 {
        self.batting_average()
    }

    /// Balls per wicket; 0.0 when wicketless.
    pub fn bowling_strike_rate(&self) -> f64 {
        if self.dismissals == 0 {
            return 0.0;
        }
        self.balls as f64 / self.dismissals as f64
    }

    /// Runs conceded per six balls.
    pub fn economy(&self) -> f64 {
        self.runs_per_ball() * 6.0
    }

    /// Empirical-Bayes weight of the observed rate: `balls / (balls + confidence)`.
    pub fn sample_weight(&self, confidence: f64) -> f64 {
        sample_weight(self.balls, confidence)
    }

    /// Observed runs/ball shrunk towards `baseline`. Exactly `baseline` with no balls.
    pub fn adjusted_runs_per_ball(&self, baseline: f64, confidence: f64) -> f64 {
        if self.balls == 0 {
            return baseline;
        }
        shrink(self.runs_per_ball(), baseline, self.sample_weight(confidence))
    }

    /// Observed wickets/ball shrunk towards `baseline`. Exactly `baseline` with no balls.
    pub fn adjusted_wickets_per_ball(&self, baseline: f64, confidence: f64) -> f64 {
        if self.balls == 0 {
            return baseline;
        }
        shrink(self.wickets_per_ball(), baseline, self.sample_weight(confidence))
    }

    pub fn is_small_sample(&self) -> bool {
        self.balls < SMALL_SAMPLE_BALLS
    }
}

/// `balls / (balls + confidence)`; 0.0 for no balls.
#[inline]
pub fn sample_weight(balls: u32, confidence: f64) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    let balls = balls as f64;
    balls / (balls + confidence)
}

#[inline]
fn shrink(observed: f64, baseline: f64, weight: f64) -> f64 {
    observed * weight + baseline * (1.0 - weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIDENCE: f64 = 500.0;

    #[test]
    fn test_zero_balls_returns_baseline_exactly() {
        let stats = MatchupStats::default();
        assert_eq!(stats.adjusted_runs_per_ball(0.8, CONFIDENCE), 0.8);
        assert_eq!(stats.adjusted_wickets_per_ball(0.021, CONFIDENCE), 0.021);
    }

    #[test]
    fn test_weight_at_confidence_is_half() {
        assert_eq!(sample_weight(0, CONFIDENCE), 0.0);
        assert!((sample_weight(500, CONFIDENCE) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_weight_monotonic() {
        let mut prev = sample_weight(0, CONFIDENCE);
        for balls in [1, 10, 100, 499, 500, 501, 5_000, 50_000] {
            let w = sample_weight(balls, CONFIDENCE);
            assert!(w > prev, "weight({balls}) = {w} should exceed {prev}");
            assert!(w < 1.0);
            prev = w;
        }
    }

    #[test]
    fn test_half_weight_blend() {
        // 500 balls at 1.0 runs/ball against a 0.8 baseline
        let stats = MatchupStats::new(500, 500, 10);
        let adjusted = stats.adjusted_runs_per_ball(0.8, CONFIDENCE);
        assert!((adjusted - 0.9).abs() < 1e-12, "got {adjusted}");
    }

    #[test]
    fn test_large_sample_dominated_by_observed() {
        let stats = MatchupStats::new(100_000, 60_000, 2_000);
        let adjusted = stats.adjusted_runs_per_ball(1.2, CONFIDENCE);
        assert!((adjusted - 0.6).abs() < 0.01);
    }

    #[test]
    fn test_record_ball_and_readouts() {
        let mut stats = MatchupStats::default();
        stats.record_ball(4, false);
        stats.record_ball(0, false);
        stats.record_ball(2, true);

        assert_eq!(stats, MatchupStats::new(3, 6, 1));
        assert_eq!(stats.batting_average(), 6.0);
        assert!((stats.batting_strike_rate() - 200.0).abs() < 1e-9);
        assert_eq!(stats.bowling_strike_rate(), 3.0);
        assert!((stats.economy() - 12.0).abs() < 1e-9);
        assert!(stats.is_small_sample());
    }

    #[test]
    fn test_wicketless_readouts() {
        let stats = MatchupStats::new(60, 45, 0);
        assert_eq!(stats.batting_average(), 45.0);
        assert_eq!(stats.bowling_strike_rate(), 0.0);
        assert_eq!(MatchupStats::default().economy(), 0.0);
    }
}
