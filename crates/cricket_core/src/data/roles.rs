//! Player reference table: who bats which hand and bowls what.

use crate::models::player::{BattingHand, BowlingRole, PlayerRecord};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Lookup of [`PlayerRecord`] by player name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleTable {
    players: FxHashMap<String, PlayerRecord>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record. Blank names are ignored.
    pub fn insert(&mut self, record: PlayerRecord) {
        if record.name.is_empty() {
            return;
        }
        self.players.insert(record.name.clone(), record);
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    pub fn batting_hand(&self, name: &str) -> Option<BattingHand> {
        self.get(name).and_then(|p| p.batting_hand)
    }

    pub fn bowling_role(&self, name: &str) -> Option<&BowlingRole> {
        self.get(name).and_then(|p| p.bowling_role.as_ref())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// All records, sorted A-Z ignoring case.
    pub fn all_sorted(&self) -> Vec<&PlayerRecord> {
        let mut all: Vec<&PlayerRecord> = self.players.values().collect();
        all.sort_by(|a, b| {
            a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.name.cmp(&b.name))
        });
        all
    }

    /// Case-insensitive substring search on the name; a blank query returns everyone.
    pub fn search(&self, query: &str) -> Vec<&PlayerRecord> {
        let query = query.trim().to_lowercase();
        self.all_sorted()
            .into_iter()
            .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
            .collect()
    }
}

impl FromIterator<PlayerRecord> for RoleTable {
    fn from_iter<T: IntoIterator<Item = PlayerRecord>>(iter: T) -> Self {
        let mut table = RoleTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}
