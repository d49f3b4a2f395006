//! Pitch conditions and their wear over a match.

use super::config::PitchWearConfig;
use crate::error::{MatchError, Result};
use crate::models::player::BowlerCategory;
use serde::{Deserialize, Serialize};

pub const PITCH_FACTOR_MIN: f64 = 0.5;
pub const PITCH_FACTOR_MAX: f64 = 2.0;

#[inline]
fn clamp_factor(value: f64) -> f64 {
    value.clamp(PITCH_FACTOR_MIN, PITCH_FACTOR_MAX)
}

/// Five-factor pitch snapshot. 1.0 is neutral for every factor.
///
/// Values built through [`PitchState::new`] or [`PitchState::deteriorate`] are
/// always within `0.5..=2.0`. Deserialized values are taken as given and must be
/// checked with [`PitchState::validate`] before a match starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchState {
    /// Grass cover / seam movement
    #[serde(alias = "green")]
    pub seam: f64,
    #[serde(alias = "dry")]
    pub dryness: f64,
    pub bounce: f64,
    /// Batting friendliness
    #[serde(alias = "flat")]
    pub flatness: f64,
    /// Outfield speed
    #[serde(alias = "boundary")]
    pub boundary_speed: f64,
}

impl Default for PitchState {
    fn default() -> Self {
        Self::neutral()
    }
}

impl PitchState {
    /// Build a pitch, clamping each factor into range.
    pub fn new(seam: f64, dryness: f64, bounce: f64, flatness: f64, boundary_speed: f64) -> Self {
        Self {
            seam: clamp_factor(seam),
            dryness: clamp_factor(dryness),
            bounce: clamp_factor(bounce),
            flatness: clamp_factor(flatness),
            boundary_speed: clamp_factor(boundary_speed),
        }
    }

    pub const fn neutral() -> Self {
        Self { seam: 1.0, dryness: 1.0, bounce: 1.0, flatness: 1.0, boundary_speed: 1.0 }
    }

    /// Build a pitch, rejecting out-of-range or non-finite factors.
    pub fn try_new(
        seam: f64,
        dryness: f64,
        bounce: f64,
        flatness: f64,
        boundary_speed: f64,
    ) -> Result<Self> {
        let pitch = Self { seam, dryness, bounce, flatness, boundary_speed };
        pitch.validate()?;
        Ok(pitch)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.factors() {
            if !value.is_finite() || !(PITCH_FACTOR_MIN..=PITCH_FACTOR_MAX).contains(&value) {
                return Err(MatchError::InvalidPitchFactor { name, value });
            }
        }
        Ok(())
    }

    pub fn factors(&self) -> [(&'static str, f64); 5] {
        [
            ("seam", self.seam),
            ("dryness", self.dryness),
            ("bounce", self.bounce),
            ("flatness", self.flatness),
            ("boundary_speed", self.boundary_speed),
        ]
    }

    /// Average of seam and bounce, the condition fast bowlers exploit.
    #[inline]
    pub fn seam_condition(&self) -> f64 {
        (self.seam + self.bounce) / 2.0
    }

    /// One wear step, applied between innings.
    pub fn deteriorate(&self, wear: &PitchWearConfig) -> PitchState {
        PitchState::new(
            self.seam * wear.seam,
            self.dryness * wear.dryness,
            self.bounce * wear.bounce,
            self.flatness * wear.flatness,
            self.boundary_speed * wear.boundary_speed,
        )
    }
}

/// Bowling advice for a pitch.
#[derive(Debug, Clone, Copy)]
pub struct PitchRecommender {
    pitch: PitchState,
}

impl PitchRecommender {
    pub fn new(pitch: PitchState) -> Self {
        Self { pitch }
    }

    pub fn pitch(&self) -> &PitchState {
        &self.pitch
    }

    /// Short label such as `"Green / Bouncy"`, `"Dead"` or `"Neutral"`.
    pub fn summary(&self) -> String {
        let p = &self.pitch;
        let mut traits = Vec::new();
        if p.seam > 1.2 {
            traits.push("Green");
        }
        if p.dryness > 1.2 {
            traits.push("Dry");
        }
        if p.bounce > 1.2 {
            traits.push("Bouncy");
        }
        if p.flatness > 1.3 {
            traits.push("Flat");
        }
        if p.seam < 0.9 && p.dryness < 0.9 && p.bounce < 0.9 {
            traits.push("Dead");
        }
        if traits.is_empty() {
            "Neutral".to_string()
        } else {
            traits.join(" / ")
        }
    }

    /// Bowler categories worth using at `over` (1-based), projecting in-innings wear:
    /// grass fades by 3% and the surface dries by 4% every ten overs.
    pub fn recommended_categories(&self, over: u32) -> Vec<BowlerCategory> {
        let wear_steps = over as f64 / 10.0;
        let seam = self.pitch.seam * 0.97f64.powf(wear_steps);
        let dryness = self.pitch.dryness * 1.04f64.powf(wear_steps);

        let seam_favoured = seam > 1.1 || self.pitch.bounce > 1.15;
        let spin_favoured = dryness > 1.15;
        let new_ball = over <= 10 || over >= 80;

        let mut recommended = Vec::with_capacity(3);
        if new_ball || seam_favoured {
            recommended.push(BowlerCategory::Fast);
        }
        if !new_ball {
            recommended.push(BowlerCategory::Medium);
        }
        if spin_favoured || (!new_ball && over > 20) {
            recommended.push(BowlerCategory::Spin);
        }
        recommended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        let p = PitchState::new(3.0, 0.1, f64::MAX, 1.0, 0.5);
        assert_eq!(p.seam, 2.0);
        assert_eq!(p.dryness, 0.5);
        assert_eq!(p.bounce, 2.0);
        assert_eq!(p.flatness, 1.0);
    }

    #[test]
    fn test_try_new_rejects() {
        assert!(PitchState::try_new(1.0, 1.0, 1.0, 1.0, 1.0).is_ok());
        assert!(matches!(
            PitchState::try_new(1.0, 2.5, 1.0, 1.0, 1.0),
            Err(MatchError::InvalidPitchFactor { name: "dryness", .. })
        ));
        assert!(PitchState::try_new(f64::NAN, 1.0, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_deteriorate_one_step() {
        let p = PitchState::neutral().deteriorate(&PitchWearConfig::default());
        assert!((p.seam - 0.92).abs() < 1e-12);
        assert!((p.dryness - 1.08).abs() < 1e-12);
        assert!((p.bounce - 0.97).abs() < 1e-12);
        assert!((p.flatness - 0.97).abs() < 1e-12);
        assert!((p.boundary_speed - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_deteriorate_stays_in_range() {
        let wear = PitchWearConfig::default();
        let mut p = PitchState::new(0.5, 2.0, 0.5, 0.5, 0.5);
        for _ in 0..10 {
            p = p.deteriorate(&wear);
            assert!(p.validate().is_ok());
        }
        assert_eq!(p.seam, 0.5);
        assert_eq!(p.dryness, 2.0);
    }

    #[test]
    fn test_deserialize_aliases() {
        let p: PitchState = serde_json::from_str(
            r#"{"green": 1.3, "dry": 0.8, "bounce": 1.0, "flat": 1.1, "boundary": 0.9}"#,
        )
        .unwrap();
        assert_eq!(p.seam, 1.3);
        assert_eq!(p.boundary_speed, 0.9);
    }

    #[test]
    fn test_summary_labels() {
        assert_eq!(PitchRecommender::new(PitchState::neutral()).summary(), "Neutral");
        let green = PitchState::new(1.4, 1.0, 1.3, 1.0, 1.0);
        assert_eq!(PitchRecommender::new(green).summary(), "Green / Bouncy");
        let dead = PitchState::new(0.8, 0.8, 0.8, 1.0, 1.0);
        assert_eq!(PitchRecommender::new(dead).summary(), "Dead");
        let road = PitchState::new(1.0, 1.0, 1.0, 1.5, 1.0);
        assert_eq!(PitchRecommender::new(road).summary(), "Flat");
    }

    #[test]
    fn test_recommendations_by_phase() {
        let neutral = PitchRecommender::new(PitchState::neutral());
        assert_eq!(neutral.recommended_categories(1), vec![BowlerCategory::Fast]);
        assert_eq!(neutral.recommended_categories(15), vec![BowlerCategory::Medium]);
        assert_eq!(
            neutral.recommended_categories(30),
            vec![BowlerCategory::Medium, BowlerCategory::Spin]
        );
        // second new ball on a surface that has dried out
        assert_eq!(
            neutral.recommended_categories(85),
            vec![BowlerCategory::Fast, BowlerCategory::Spin]
        );

        // 1.1 * 1.04^1.5 > 1.15
        let dry = PitchRecommender::new(PitchState::new(1.0, 1.1, 1.0, 1.0, 1.0));
        assert!(dry.recommended_categories(15).contains(&BowlerCategory::Spin));
    }
}
