//! Unlocked achievements and the flags they are earned from.

use std::collections::BTreeMap;

use pixelpaws_logic::achievements::{newly_earned, AchievementFacts, AchievementId};
use pixelpaws_logic::constants::storage_keys;
use serde::{Deserialize, Serialize};

use crate::clock::rfc3339;
use crate::notice::Notices;
use crate::store::{read_json, write_json, KeyValueStore};

/// When an achievement was earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRecord {
    pub unlocked_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementBook {
    unlocked: BTreeMap<String, UnlockRecord>,
    has_played: bool,
    has_returned: bool,
}

impl AchievementBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &dyn KeyValueStore, notices: &mut Notices) -> Self {
        let unlocked = match read_json::<BTreeMap<String, UnlockRecord>>(
            store,
            storage_keys::ACHIEVEMENTS,
        ) {
            Ok(map) => map
                .unwrap_or_default()
                .into_iter()
                .filter(|(key, _)| AchievementId::from_key(key).is_some())
                .collect(),
            Err(e) => {
                log::warn!("Could not load achievements: {}", e);
                notices.warn("Your achievements couldn't be read.");
                BTreeMap::new()
            }
        };
        Self {
            unlocked,
            has_played: read_flag(store, storage_keys::HAS_PLAYED),
            has_returned: read_flag(store, storage_keys::HAS_RETURNED),
        }
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(id.key())
    }

    pub fn unlocked_at(&self, id: AchievementId) -> Option<&str> {
        self.unlocked.get(id.key()).map(|r| r.unlocked_at.as_str())
    }

    pub fn has_played(&self) -> bool {
        self.has_played
    }

    pub fn has_returned(&self) -> bool {
        self.has_returned
    }

    /// Returns true the first time.
    pub fn mark_played(&mut self) -> bool {
        !std::mem::replace(&mut self.has_played, true)
    }

    pub fn mark_returned(&mut self) -> bool {
        !std::mem::replace(&mut self.has_returned, true)
    }

    /// Unlock everything the current facts earn. Returns what was new.
    pub fn check_all(&mut self, owned_items: usize, now_ms: i64) -> Vec<AchievementId> {
        let facts = AchievementFacts {
            owned_items,
            has_played: self.has_played,
            has_returned: self.has_returned,
        };
        let fresh = newly_earned(&facts, |id| self.is_unlocked(id));
        for id in &fresh {
            log::info!("Achievement unlocked: {}", id.name());
            self.unlocked.insert(
                id.key().to_string(),
                UnlockRecord {
                    unlocked_at: rfc3339(now_ms),
                },
            );
        }
        fresh
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn persist(&self, store: &mut dyn KeyValueStore, notices: &mut Notices) {
        let result = write_json(store, storage_keys::ACHIEVEMENTS, &self.unlocked)
            .and_then(|_| write_flag(store, storage_keys::HAS_PLAYED, self.has_played))
            .and_then(|_| write_flag(store, storage_keys::HAS_RETURNED, self.has_returned));
        if let Err(e) = result {
            log::warn!("Could not save achievements: {}", e);
            notices.warn("Couldn't save your achievements.");
        }
    }
}

fn read_flag(store: &dyn KeyValueStore, key: &str) -> bool {
    matches!(store.get(key), Ok(Some(v)) if v == "true")
}

fn write_flag(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: bool,
) -> Result<(), crate::error::StoreError> {
    if value {
        store.set(key, "true")
    } else {
        store.remove(key)
    }
}
