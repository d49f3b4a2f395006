//! Historical input data: the player role table, stats books and delivery ingestion.

pub mod deliveries;
pub mod roles;
pub mod stats_book;

pub use deliveries::{IngestCounts, MatchFile, StatsBundle};
pub use roles::RoleTable;
pub use stats_book::StatsBook;
