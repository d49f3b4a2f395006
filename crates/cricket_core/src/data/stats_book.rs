//! Aggregated matchup statistics keyed by player then opposing category.

use crate::models::stats::MatchupStats;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// `player -> category -> MatchupStats`.
///
/// The batting book is keyed by bowling-role code, the bowling book by batting hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsBook {
    players: FxHashMap<String, FxHashMap<String, MatchupStats>>,
}

impl StatsBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, player: &str, category: &str, runs: u32, dismissal: bool) {
        self.entry(player, category).record_ball(runs, dismissal);
    }

    pub fn insert(&mut self, player: &str, category: &str, stats: MatchupStats) {
        *self.entry(player, category) = stats;
    }

    fn entry(&mut self, player: &str, category: &str) -> &mut MatchupStats {
        self.players
            .entry(player.to_string())
            .or_default()
            .entry(category.to_string())
            .or_default()
    }

    /// Stats for the pair, or zero stats when either key is missing.
    pub fn get(&self, player: &str, category: &str) -> MatchupStats {
        self.players
            .get(player)
            .and_then(|by_category| by_category.get(category))
            .copied()
            .unwrap_or_default()
    }

    pub fn categories(&self, player: &str) -> Option<&FxHashMap<String, MatchupStats>> {
        self.players.get(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(String::as_str)
    }

    /// Every `(player, category, stats)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &MatchupStats)> {
        self.players.iter().flat_map(|(player, by_category)| {
            by_category.iter().map(move |(category, stats)| (player.as_str(), category.as_str(), stats))
        })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_get() {
        let mut book = StatsBook::new();
        book.record("V Kohli", "RF", 4, false);
        book.record("V Kohli", "RF", 0, true);
        book.record("V Kohli", "ROS", 1, false);

        assert_eq!(book.get("V Kohli", "RF"), MatchupStats::new(2, 4, 1));
        assert_eq!(book.get("V Kohli", "ROS"), MatchupStats::new(1, 1, 0));
        assert_eq!(book.len(), 1);
        assert_eq!(book.iter().count(), 2);
    }

    #[test]
    fn test_missing_is_zero() {
        let book = StatsBook::new();
        assert_eq!(book.get("Nobody", "RF"), MatchupStats::default());
    }
}
