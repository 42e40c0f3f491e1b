//! Display values for a health panel.
//!
//! Everything a front end needs to draw the health bar, status text,
//! recovery checklist, mood, and speech bubble, computed in one place.

use rand::Rng;
use serde::Serialize;

use crate::config::StatusThresholds;
use crate::health::{required_actions, ColorBand, HealthState, HealthStatus};
use crate::mood::{mood_for, pick_speech, Mood, Weather};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    /// Bar width, rounded to a whole percent.
    pub percentage: u8,
    pub band: ColorBand,
    pub status: HealthStatus,
    /// Vitals rounded to one decimal place.
    pub hunger: f32,
    pub happiness: f32,
    /// Labels of the recovery actions still outstanding.
    pub required_actions: Vec<&'static str>,
    pub mood: Mood,
    pub speech: &'static str,
}

impl HealthReport {
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

fn one_decimal(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

pub fn build_report<R: Rng + ?Sized>(
    state: &HealthState,
    t: &StatusThresholds,
    weather: Weather,
    rng: &mut R,
) -> HealthReport {
    let percentage = state.percentage(t);
    let mood = mood_for(state.status, weather);
    HealthReport {
        percentage: percentage.round().clamp(0.0, 100.0) as u8,
        band: ColorBand::from_percentage(percentage),
        status: state.status,
        hunger: one_decimal(state.hunger),
        happiness: one_decimal(state.happiness),
        required_actions: required_actions(state.status, &state.recovery)
            .into_iter()
            .map(|a| a.label())
            .collect(),
        mood,
        speech: pick_speech(mood, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_report_for_unwell_pet() {
        let mut state = HealthState::fresh(0);
        state.hunger = 45.04;
        state.happiness = 52.0;
        state.status = HealthStatus::Unwell;
        state.recovery.fed = true;

        let mut rng = StdRng::seed_from_u64(1);
        let r = build_report(&state, &StatusThresholds::default(), Weather::Sunny, &mut rng);
        assert_eq!(r.percentage, 49);
        assert_eq!(r.band, ColorBand::Orange);
        assert_eq!(r.hunger, 45.0);
        assert_eq!(r.required_actions, vec!["Play Fetch"]);
        assert_eq!(r.mood, Mood::Unhappy);
        assert_eq!(r.status_label(), "Unwell");
    }

    #[test]
    fn test_report_for_healthy_pet_follows_weather() {
        let state = HealthState::fresh(0);
        let mut rng = StdRng::seed_from_u64(1);
        let r = build_report(&state, &StatusThresholds::default(), Weather::Rainy, &mut rng);
        assert_eq!(r.percentage, 100);
        assert_eq!(r.band, ColorBand::Green);
        assert!(r.required_actions.is_empty());
        assert_eq!(r.mood, Mood::Sad);
    }
}
