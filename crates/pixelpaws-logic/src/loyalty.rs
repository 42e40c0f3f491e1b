//! Loyalty calendar: one theme unlocked per distinct visit day.
//!
//! Days are plain day indices (calendar day numbers in the owner's local
//! offset); turning a timestamp into a day index is the caller's job.
//! Visiting on a later day than the last recorded one adds exactly one
//! visit day, however many days were skipped, up to seven.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_VISIT_DAYS: u8 = 7;
pub const DEFAULT_THEME: &str = "purple";

/// Loyalty day on which the returning-visitor flag is set.
pub const RETURNING_DAY: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    pub unlocked_day: u8,
}

pub const THEMES: [Theme; 7] = [
    Theme {
        key: "purple",
        name: "Royal Purple",
        unlocked_day: 1,
    },
    Theme {
        key: "blue",
        name: "Ocean Blue",
        unlocked_day: 2,
    },
    Theme {
        key: "green",
        name: "Forest Green",
        unlocked_day: 3,
    },
    Theme {
        key: "yellow",
        name: "Sunny Yellow",
        unlocked_day: 4,
    },
    Theme {
        key: "orange",
        name: "Sunset Orange",
        unlocked_day: 5,
    },
    Theme {
        key: "red",
        name: "Strawberry Red",
        unlocked_day: 6,
    },
    Theme {
        key: "pink",
        name: "Bubblegum Pink",
        unlocked_day: 7,
    },
];

pub fn find_theme(key: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.key == key)
}

pub fn theme_for_day(day: u8) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.unlocked_day == day)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeRejection {
    #[error("no such theme '{0}'")]
    Unknown(String),
    #[error("{name} unlocks on visit day {day}")]
    Locked { name: &'static str, day: u8 },
}

/// Result of registering a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitOutcome {
    /// A new calendar day was recorded.
    pub new_day: bool,
    /// Visit-day count after this visit.
    pub visit_days: u8,
    /// Theme unlocked by this visit, if any.
    pub unlocked: Option<&'static Theme>,
}

impl VisitOutcome {
    pub fn reached_returning_day(&self) -> bool {
        self.new_day && self.visit_days == RETURNING_DAY
    }
}

/// Persisted loyalty record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyState {
    pub active_theme: String,
    pub visit_days: u8,
    /// Day index of the most recent recorded visit.
    pub last_visit_day: i64,
}

impl LoyaltyState {
    /// First ever visit: day 1, default theme.
    pub fn first_visit(today: i64) -> Self {
        Self {
            active_theme: DEFAULT_THEME.to_string(),
            visit_days: 1,
            last_visit_day: today,
        }
    }

    /// Record a visit on day `today`.
    pub fn register_visit(&mut self, today: i64) -> VisitOutcome {
        if today <= self.last_visit_day {
            return VisitOutcome {
                new_day: false,
                visit_days: self.visit_days,
                unlocked: None,
            };
        }

        let mut unlocked = None;
        if self.visit_days < MAX_VISIT_DAYS {
            self.visit_days += 1;
            unlocked = theme_for_day(self.visit_days);
        }
        self.last_visit_day = today;

        VisitOutcome {
            new_day: true,
            visit_days: self.visit_days,
            unlocked,
        }
    }

    pub fn is_unlocked(&self, key: &str) -> bool {
        find_theme(key).is_some_and(|t| t.unlocked_day <= self.visit_days)
    }

    pub fn unlocked_themes(&self) -> Vec<&'static Theme> {
        THEMES
            .iter()
            .filter(|t| t.unlocked_day <= self.visit_days)
            .collect()
    }

    /// Switch to an unlocked theme.
    pub fn select(&mut self, key: &str) -> Result<&'static Theme, ThemeRejection> {
        let theme = find_theme(key).ok_or_else(|| ThemeRejection::Unknown(key.to_string()))?;
        if theme.unlocked_day > self.visit_days {
            return Err(ThemeRejection::Locked {
                name: theme.name,
                day: theme.unlocked_day,
            });
        }
        self.active_theme = theme.key.to_string();
        Ok(theme)
    }

    /// Clamp a loaded record into a valid shape.
    pub fn sanitize(&mut self) {
        self.visit_days = self.visit_days.clamp(1, MAX_VISIT_DAYS);
        if !self.is_unlocked(&self.active_theme) {
            self.active_theme = DEFAULT_THEME.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_theme_per_day() {
        for day in 1..=MAX_VISIT_DAYS {
            let theme = theme_for_day(day).unwrap();
            assert_eq!(find_theme(theme.key), Some(theme));
        }
        assert_eq!(THEMES[0].key, DEFAULT_THEME);
    }

    #[test]
    fn test_first_visit() {
        let s = LoyaltyState::first_visit(100);
        assert_eq!(s.visit_days, 1);
        assert_eq!(s.active_theme, "purple");
        assert_eq!(s.unlocked_themes().len(), 1);
    }

    #[test]
    fn test_same_day_adds_nothing() {
        let mut s = LoyaltyState::first_visit(100);
        let out = s.register_visit(100);
        assert!(!out.new_day);
        assert_eq!(s.visit_days, 1);
    }

    #[test]
    fn test_next_day_unlocks_blue() {
        let mut s = LoyaltyState::first_visit(100);
        let out = s.register_visit(101);
        assert!(out.new_day);
        assert!(out.reached_returning_day());
        assert_eq!(out.unlocked.map(|t| t.key), Some("blue"));
        assert!(s.is_unlocked("blue"));
        assert!(!s.is_unlocked("green"));
    }

    #[test]
    fn test_skipped_days_count_once() {
        let mut s = LoyaltyState::first_visit(100);
        s.register_visit(130);
        assert_eq!(s.visit_days, 2);
        assert_eq!(s.last_visit_day, 130);
    }

    #[test]
    fn test_caps_at_seven() {
        let mut s = LoyaltyState::first_visit(0);
        for day in 1..=10 {
            s.register_visit(day);
        }
        assert_eq!(s.visit_days, MAX_VISIT_DAYS);
        let out = s.register_visit(11);
        assert!(out.new_day);
        assert_eq!(out.unlocked, None);
        assert_eq!(s.unlocked_themes().len(), 7);
    }

    #[test]
    fn test_select_locked_theme() {
        let mut s = LoyaltyState::first_visit(0);
        assert_eq!(
            s.select("pink"),
            Err(ThemeRejection::Locked { name: "Bubblegum Pink", day: 7 })
        );
        assert_eq!(s.select("mauve"), Err(ThemeRejection::Unknown("mauve".into())));
        assert_eq!(s.active_theme, "purple");
        s.register_visit(1);
        assert_eq!(s.select("blue").map(|t| t.name), Ok("Ocean Blue"));
        assert_eq!(s.active_theme, "blue");
    }

    #[test]
    fn test_sanitize() {
        let mut s = LoyaltyState {
            active_theme: "pink".into(),
            visit_days: 0,
            last_visit_day: 5,
        };
        s.sanitize();
        assert_eq!(s.visit_days, 1);
        assert_eq!(s.active_theme, "purple");
    }
}
