//! Weather-driven mood and speech lines.
//!
//! Health overrides weather: a sick or unwell pet is glum whatever the sky
//! is doing. A healthy pet's mood follows the weather.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::health::HealthStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Rainy,
    Snowy,
    Stormy,
    Cloudy,
    Night,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weather '{0}'")]
pub struct UnknownWeather(pub String);

impl FromStr for Weather {
    type Err = UnknownWeather;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunny" | "clear" => Ok(Weather::Sunny),
            "rainy" | "rain" | "drizzle" => Ok(Weather::Rainy),
            "snowy" | "snow" => Ok(Weather::Snowy),
            "stormy" | "storm" | "thunderstorm" => Ok(Weather::Stormy),
            "cloudy" | "clouds" => Ok(Weather::Cloudy),
            "night" => Ok(Weather::Night),
            _ => Err(UnknownWeather(s.to_string())),
        }
    }
}

/// Night runs from 20:00 to 06:00 local time.
pub fn is_night(hour: u32) -> bool {
    hour >= 20 || hour < 6
}

/// Weather to assume when none is known: sunny by day, night after dark.
pub fn default_weather(hour: u32) -> Weather {
    if is_night(hour) {
        Weather::Night
    } else {
        Weather::Sunny
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Playful,
    Anxious,
    Content,
    Sleepy,
    Unhappy,
    Depressed,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Playful => "Playful",
            Mood::Anxious => "Anxious",
            Mood::Content => "Content",
            Mood::Sleepy => "Sleepy",
            Mood::Unhappy => "Unhappy",
            Mood::Depressed => "Depressed",
        };
        f.write_str(s)
    }
}

pub fn mood_for(status: HealthStatus, weather: Weather) -> Mood {
    match status {
        HealthStatus::Sick => Mood::Depressed,
        HealthStatus::Unwell => Mood::Unhappy,
        HealthStatus::Healthy => match weather {
            Weather::Sunny => Mood::Happy,
            Weather::Rainy => Mood::Sad,
            Weather::Snowy => Mood::Playful,
            Weather::Stormy => Mood::Anxious,
            Weather::Cloudy => Mood::Content,
            Weather::Night => Mood::Sleepy,
        },
    }
}

/// Speech-bubble lines for a mood.
pub fn speech_lines(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Happy => &[
            "Hello! I'm feeling happy today! 😊",
            "What a beautiful day! ☀️",
            "Let's play together! 🎉",
        ],
        Mood::Sad => &[
            "It's raining... I'm a bit sad 🌧️",
            "Play with me to cheer me up!",
        ],
        Mood::Playful => &["Snow! Let's play! ❄️", "I love the snow! ⛄"],
        Mood::Anxious => &["The storm scares me... 😰", "Please hold me! ⛈️"],
        Mood::Content => &["Just relaxing...", "Taking it easy ☁️"],
        Mood::Sleepy => &["I'm sleepy... 😴", "Bedtime snack? 🍪"],
        Mood::Unhappy => &[
            "I'm hungry and bored... 😔",
            "Please feed me and play with me! 🥺",
        ],
        Mood::Depressed => &[
            "I'm not feeling well... 🤒",
            "I need food, play, pets, brushing, and a toy... 😢",
        ],
    }
}

/// Pick a speech line for `mood`.
pub fn pick_speech<R: Rng + ?Sized>(mood: Mood, rng: &mut R) -> &'static str {
    speech_lines(mood).choose(rng).copied().unwrap_or("...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_health_overrides_weather() {
        assert_eq!(mood_for(HealthStatus::Sick, Weather::Sunny), Mood::Depressed);
        assert_eq!(mood_for(HealthStatus::Unwell, Weather::Snowy), Mood::Unhappy);
        assert_eq!(mood_for(HealthStatus::Healthy, Weather::Stormy), Mood::Anxious);
        assert_eq!(mood_for(HealthStatus::Healthy, Weather::Night), Mood::Sleepy);
    }

    #[test]
    fn test_night_window() {
        assert!(is_night(20));
        assert!(is_night(23));
        assert!(is_night(0));
        assert!(is_night(5));
        assert!(!is_night(6));
        assert!(!is_night(19));
        assert_eq!(default_weather(12), Weather::Sunny);
        assert_eq!(default_weather(22), Weather::Night);
    }

    #[test]
    fn test_parse_weather() {
        assert_eq!("Thunderstorm".parse::<Weather>(), Ok(Weather::Stormy));
        assert_eq!("clouds".parse::<Weather>(), Ok(Weather::Cloudy));
        assert!("hail".parse::<Weather>().is_err());
    }

    #[test]
    fn test_speech_comes_from_the_mood_table() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let line = pick_speech(Mood::Sleepy, &mut rng);
            assert!(speech_lines(Mood::Sleepy).contains(&line));
        }
    }
}
