use thiserror::Error;

/// Errors raised while setting up a match or reading engine input.
///
/// The ball-by-ball simulation itself never fails; everything here is caught
/// before the first ball is bowled.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid team '{team}': {reason}")]
    InvalidTeam { team: String, reason: String },

    #[error("Batting order too short for '{team}': expected at least {expected}, found {found}")]
    BattingOrderTooShort { team: String, expected: usize, found: usize },

    #[error("Empty bowling lineup for '{team}'")]
    EmptyBowlingLineup { team: String },

    #[error("Invalid pitch factor {name}: {value} (must be finite and within 0.5..=2.0)")]
    InvalidPitchFactor { name: &'static str, value: f64 },

    #[error("Over {over} is outside the bowling plan (1..={max})")]
    InvalidOver { over: u32, max: u32 },

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl MatchError {
    pub fn invalid_team(team: &str, reason: impl Into<String>) -> Self {
        MatchError::InvalidTeam { team: team.to_string(), reason: reason.into() }
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            MatchError::Deserialization(err.to_string())
        } else {
            MatchError::Serialization(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for MatchError {
    fn from(err: serde_yaml::Error) -> Self {
        MatchError::Deserialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MatchError::BattingOrderTooShort { team: "India".into(), expected: 2, found: 1 };
        assert_eq!(
            err.to_string(),
            "Batting order too short for 'India': expected at least 2, found 1"
        );

        let err = MatchError::InvalidPitchFactor { name: "seam", value: 3.0 };
        assert!(err.to_string().contains("seam"));
    }

    #[test]
    fn test_json_syntax_error_maps_to_deserialization() {
        let err: MatchError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(matches!(err, MatchError::Deserialization(_)));
    }
}
