pub mod innings;
pub mod match_result;
pub mod player;
pub mod stats;
pub mod team;

pub use innings::{BatterScore, InningsResult};
pub use match_result::{InningsRecord, MatchOutcome, MatchResult};
pub use player::{BattingHand, BowlerCategory, BowlingRole, PlayerRecord};
pub use stats::MatchupStats;
pub use team::Team;
