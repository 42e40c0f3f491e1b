//! Persisted loyalty calendar.

use pixelpaws_logic::constants::storage_keys;
use pixelpaws_logic::loyalty::{LoyaltyState, Theme, ThemeRejection, VisitOutcome};

use crate::notice::Notices;
use crate::store::{read_json, write_json, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyCalendar {
    state: LoyaltyState,
}

impl LoyaltyCalendar {
    /// Load the calendar and count today's visit. A missing or unreadable
    /// record starts a fresh calendar on day 1.
    pub fn open(
        store: &dyn KeyValueStore,
        today: i64,
        notices: &mut Notices,
    ) -> (Self, VisitOutcome) {
        match read_json::<LoyaltyState>(store, storage_keys::THEME_DATA) {
            Ok(Some(mut state)) => {
                state.sanitize();
                let outcome = state.register_visit(today);
                if outcome.new_day {
                    log::info!("Loyalty visit day {}", outcome.visit_days);
                }
                (Self { state }, outcome)
            }
            Ok(None) => {
                log::info!("Starting loyalty calendar");
                Self::first(today)
            }
            Err(e) => {
                log::warn!("Could not load loyalty calendar: {}", e);
                notices.warn("Your loyalty calendar couldn't be read, so it starts over.");
                Self::first(today)
            }
        }
    }

    fn first(today: i64) -> (Self, VisitOutcome) {
        let state = LoyaltyState::first_visit(today);
        let outcome = VisitOutcome {
            new_day: true,
            visit_days: state.visit_days,
            unlocked: None,
        };
        (Self { state }, outcome)
    }

    pub fn state(&self) -> &LoyaltyState {
        &self.state
    }

    pub fn active_theme(&self) -> &str {
        &self.state.active_theme
    }

    pub fn visit_days(&self) -> u8 {
        self.state.visit_days
    }

    pub fn unlocked_themes(&self) -> Vec<&'static Theme> {
        self.state.unlocked_themes()
    }

    pub fn register_visit(&mut self, today: i64) -> VisitOutcome {
        self.state.register_visit(today)
    }

    pub fn select(&mut self, key: &str) -> Result<&'static Theme, ThemeRejection> {
        self.state.select(key)
    }

    pub fn reset(&mut self, today: i64) {
        self.state = LoyaltyState::first_visit(today);
    }

    pub fn persist(&self, store: &mut dyn KeyValueStore, notices: &mut Notices) {
        if let Err(e) = write_json(store, storage_keys::THEME_DATA, &self.state) {
            log::warn!("Could not save loyalty calendar: {}", e);
            notices.warn("Couldn't save your loyalty progress.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_first_open_is_day_one() {
        let store = MemoryStore::new();
        let (cal, outcome) = LoyaltyCalendar::open(&store, 10, &mut Notices::new());
        assert_eq!(cal.visit_days(), 1);
        assert_eq!(cal.active_theme(), "purple");
        assert!(!outcome.reached_returning_day());
    }

    #[test]
    fn test_second_day_reopen() {
        let mut store = MemoryStore::new();
        let mut notices = Notices::new();
        let (cal, _) = LoyaltyCalendar::open(&store, 10, &mut notices);
        cal.persist(&mut store, &mut notices);

        let (same_day, outcome) = LoyaltyCalendar::open(&store, 10, &mut notices);
        assert_eq!(same_day.visit_days(), 1);
        assert!(!outcome.new_day);

        let (cal, outcome) = LoyaltyCalendar::open(&store, 14, &mut notices);
        assert_eq!(cal.visit_days(), 2);
        assert!(outcome.reached_returning_day());
        assert_eq!(outcome.unlocked.map(|t| t.key), Some("blue"));
    }

    #[test]
    fn test_tampered_record_is_sanitized() {
        let mut store = MemoryStore::new();
        store.insert_raw(
            storage_keys::THEME_DATA,
            r#"{"activeTheme":"pink","visitDays":3,"lastVisitDay":10}"#,
        );
        let (cal, _) = LoyaltyCalendar::open(&store, 10, &mut Notices::new());
        assert_eq!(cal.active_theme(), "purple");
        assert_eq!(cal.visit_days(), 3);
    }
}
