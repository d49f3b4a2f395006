//! Player role data: batting hand and bowling style.
//!
//! Role codes come from the reference table as short tokens. They are parsed
//! once into typed values here so the engine never re-reads strings per ball.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Batting hand of a batter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattingHand {
    #[serde(rename = "LHB")]
    Left,
    #[serde(rename = "RHB")]
    Right,
}

impl BattingHand {
    pub const LEFT_CODE: &'static str = "LHB";
    pub const RIGHT_CODE: &'static str = "RHB";

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            Self::LEFT_CODE => Some(BattingHand::Left),
            Self::RIGHT_CODE => Some(BattingHand::Right),
            _ => None,
        }
    }

    /// Category key used for bowling-side stats.
    pub fn code(&self) -> &'static str {
        match self {
            BattingHand::Left => Self::LEFT_CODE,
            BattingHand::Right => Self::RIGHT_CODE,
        }
    }
}

impl fmt::Display for BattingHand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Broad bowling style, which decides how the pitch acts on a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BowlerCategory {
    /// Pace and seam: helped by seam and bounce.
    Fast,
    /// Finger and wrist spin: helped by dryness.
    Spin,
    /// Medium pace, untouched by seam or spin modifiers.
    Medium,
    /// No recorded bowling role.
    PartTime,
}

impl BowlerCategory {
    /// Classify a role code.
    ///
    /// Known codes map directly; anything else falls back to its markers
    /// (`F` pace, `S` spin, `M` medium).
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "" => BowlerCategory::PartTime,
            "RF" | "LF" | "RFM" | "LFM" | "RMF" | "LMF" => BowlerCategory::Fast,
            "RM" | "LM" => BowlerCategory::Medium,
            "ROS" | "LOS" | "RLS" | "LLS" => BowlerCategory::Spin,
            other if other.contains('F') => BowlerCategory::Fast,
            other if other.contains('S') => BowlerCategory::Spin,
            other if other.contains('M') => BowlerCategory::Medium,
            _ => BowlerCategory::PartTime,
        }
    }

    pub fn is_fast(&self) -> bool {
        matches!(self, BowlerCategory::Fast)
    }

    pub fn is_spin(&self) -> bool {
        matches!(self, BowlerCategory::Spin)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BowlerCategory::Fast => "fast",
            BowlerCategory::Spin => "spin",
            BowlerCategory::Medium => "medium",
            BowlerCategory::PartTime => "part-time",
        }
    }
}

/// A bowling role code with its precomputed category.
///
/// Serialized as the bare code; the category is always re-derived on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct BowlingRole {
    code: String,
    category: BowlerCategory,
}

impl BowlingRole {
    pub fn new(code: &str) -> Self {
        let code = code.trim().to_string();
        let category = BowlerCategory::from_code(&code);
        Self { code, category }
    }

    /// Role code as used for batting-side stats and baselines.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn category(&self) -> BowlerCategory {
        self.category
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl From<String> for BowlingRole {
    fn from(code: String) -> Self {
        BowlingRole::new(&code)
    }
}

impl From<BowlingRole> for String {
    fn from(role: BowlingRole) -> Self {
        role.code
    }
}

impl fmt::Display for BowlingRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// One row of the player reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub batting_hand: Option<BattingHand>,
    pub bowling_role: Option<BowlingRole>,
}

impl PlayerRecord {
    /// Build from raw table codes; blank or unknown codes become `None`.
    pub fn from_codes(name: &str, bat_code: &str, bowl_code: &str) -> Self {
        let bowling_role = Some(BowlingRole::new(bowl_code)).filter(|r| !r.is_empty());
        Self {
            name: name.trim().to_string(),
            batting_hand: BattingHand::from_code(bat_code),
            bowling_role,
        }
    }

    pub fn bowler_category(&self) -> BowlerCategory {
        self.bowling_role.as_ref().map(|r| r.category()).unwrap_or(BowlerCategory::PartTime)
    }

    /// Short summary such as `"RHB / RF"`.
    pub fn role_summary(&self) -> String {
        let bat = self.batting_hand.map(|h| h.code()).unwrap_or("?");
        let bowl = self.bowling_role.as_ref().map(|r| r.code()).unwrap_or("-");
        format!("{bat} / {bowl}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_categorised() {
        for code in ["RF", "LF", "RFM", "LFM", "RMF", "LMF"] {
            assert_eq!(BowlerCategory::from_code(code), BowlerCategory::Fast, "{code}");
        }
        for code in ["ROS", "LOS", "RLS", "LLS"] {
            assert_eq!(BowlerCategory::from_code(code), BowlerCategory::Spin, "{code}");
        }
        assert_eq!(BowlerCategory::from_code("RM"), BowlerCategory::Medium);
        assert_eq!(BowlerCategory::from_code("LM"), BowlerCategory::Medium);
        assert_eq!(BowlerCategory::from_code(""), BowlerCategory::PartTime);
        assert_eq!(BowlerCategory::from_code("  "), BowlerCategory::PartTime);
    }

    #[test]
    fn test_unknown_codes_use_markers() {
        assert_eq!(BowlerCategory::from_code("XF"), BowlerCategory::Fast);
        assert_eq!(BowlerCategory::from_code("SLA"), BowlerCategory::Spin);
        assert_eq!(BowlerCategory::from_code("XM"), BowlerCategory::Medium);
        assert_eq!(BowlerCategory::from_code("X"), BowlerCategory::PartTime);
    }

    #[test]
    fn test_batting_hand_codes() {
        assert_eq!(BattingHand::from_code("LHB"), Some(BattingHand::Left));
        assert_eq!(BattingHand::from_code(" RHB "), Some(BattingHand::Right));
        assert_eq!(BattingHand::from_code(""), None);
        assert_eq!(BattingHand::Left.code(), "LHB");
    }

    #[test]
    fn test_player_record_from_codes() {
        let bumrah = PlayerRecord::from_codes("JJ Bumrah", "RHB", "RF");
        assert_eq!(bumrah.bowler_category(), BowlerCategory::Fast);
        assert_eq!(bumrah.role_summary(), "RHB / RF");

        let keeper = PlayerRecord::from_codes("AT Carey", "LHB", "");
        assert!(keeper.bowling_role.is_none());
        assert_eq!(keeper.bowler_category(), BowlerCategory::PartTime);
        assert_eq!(keeper.role_summary(), "LHB / -");

        let unknown = PlayerRecord::from_codes("Nobody", "", "");
        assert_eq!(unknown.role_summary(), "? / -");
    }

    #[test]
    fn test_bowling_role_serializes_as_code() {
        let record = PlayerRecord::from_codes("NM Lyon", "RHB", "ROS");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""bowling_role":"ROS""#), "{json}");

        let back: PlayerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_bowling_role_category_derived_on_load() {
        let role: BowlingRole = serde_json::from_str(r#""RF""#).unwrap();
        assert_eq!(role.category(), BowlerCategory::Fast);

        // a stored category cannot override the code
        let stale = r#"{"code":"RF","category":"spin"}"#;
        assert!(serde_json::from_str::<BowlingRole>(stale).is_err());
    }
}
