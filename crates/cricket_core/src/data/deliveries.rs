//! Delivery-level match records and their aggregation into stats books.
//!
//! Match files are JSON documents of the shape
//! `{"innings": [{"overs": [{"deliveries": [...]}]}]}`; only the fields the
//! model needs are read, everything else is ignored.

use super::roles::RoleTable;
use super::stats_book::StatsBook;
use crate::engine::rate_model::RateModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchFile {
    #[serde(default)]
    pub innings: Vec<InningsFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InningsFile {
    #[serde(default)]
    pub overs: Vec<OverFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverFile {
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Delivery {
    pub batter: String,
    pub bowler: String,
    pub runs: DeliveryRuns,
    #[serde(default)]
    pub extras: Option<Extras>,
    #[serde(default)]
    pub wickets: Vec<Wicket>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeliveryRuns {
    pub batter: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Extras {
    #[serde(default)]
    pub wides: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wicket {
    pub player_out: String,
}

impl Delivery {
    pub fn is_wide(&self) -> bool {
        self.extras.as_ref().is_some_and(|e| e.wides.is_some())
    }

    /// Whether the striker was the one dismissed (run-outs of the non-striker don't count).
    pub fn striker_dismissed(&self) -> bool {
        self.wickets.iter().any(|w| w.player_out == self.batter)
    }
}

/// Counters from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestCounts {
    pub deliveries: u64,
    pub wides_skipped: u64,
    pub batting_records: u64,
    pub bowling_records: u64,
}

impl IngestCounts {
    pub fn merge(&mut self, other: IngestCounts) {
        self.deliveries += other.deliveries;
        self.wides_skipped += other.wides_skipped;
        self.batting_records += other.batting_records;
        self.bowling_records += other.bowling_records;
    }
}

/// Everything the engine needs from history: both stats books and the role table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsBundle {
    pub batting: StatsBook,
    pub bowling: StatsBook,
    pub roles: RoleTable,
}

impl StatsBundle {
    pub fn new(roles: RoleTable) -> Self {
        Self { batting: StatsBook::new(), bowling: StatsBook::new(), roles }
    }

    /// Fold one match into the books.
    ///
    /// Batting records are keyed by the bowler's role and count the batter's own
    /// runs; bowling records are keyed by the batter's hand and count everything
    /// conceded. Either side is skipped when the opponent's role is unknown.
    pub fn ingest_match(&mut self, file: &MatchFile) -> IngestCounts {
        let mut counts = IngestCounts::default();

        let deliveries = file
            .innings
            .iter()
            .flat_map(|i| i.overs.iter())
            .flat_map(|o| o.deliveries.iter());

        for delivery in deliveries {
            counts.deliveries += 1;
            if delivery.is_wide() {
                counts.wides_skipped += 1;
                continue;
            }

            let out = delivery.striker_dismissed();

            if let Some(role) = self.roles.bowling_role(&delivery.bowler) {
                self.batting.record(&delivery.batter, role.code(), delivery.runs.batter, out);
                counts.batting_records += 1;
            }

            if let Some(hand) = self.roles.batting_hand(&delivery.batter) {
                self.bowling.record(&delivery.bowler, hand.code(), delivery.runs.total, out);
                counts.bowling_records += 1;
            }
        }

        counts
    }

    /// Build the rate model (books + baselines) and hand back the role table.
    pub fn into_model(self) -> (RateModel, RoleTable) {
        (RateModel::new(self.batting, self.bowling), self.roles)
    }
}
