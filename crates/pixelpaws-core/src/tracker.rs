//! Health tracker: the stateful wrapper around the pure health rules.
//!
//! Owns the pet's [`HealthState`] and the tuning it is evaluated with,
//! and knows how to load and save itself through a [`KeyValueStore`].
//! Storage problems never escape: they are logged, reported as a notice,
//! and the tracker keeps working from memory.

use pixelpaws_logic::actions::ActionKind;
use pixelpaws_logic::config::{DecayConfig, PetConfig, StatusThresholds};
use pixelpaws_logic::constants::storage_keys;
use pixelpaws_logic::decay::{self, DecayOutcome};
use pixelpaws_logic::health::{
    clamp_vital, tier_for, ActionOutcome, HealthState, HealthStatus, RecoveryFlags, StatusChange,
};
use serde_json::Value;

use crate::notice::Notices;
use crate::store::{write_json, KeyValueStore};

#[derive(Debug, Clone)]
pub struct HealthTracker {
    state: HealthState,
    decay: DecayConfig,
    thresholds: StatusThresholds,
}

impl HealthTracker {
    /// A tracker for a brand-new pet, not yet persisted.
    pub fn new(config: &PetConfig, now_ms: i64) -> Self {
        Self {
            state: HealthState::fresh(now_ms),
            decay: config.decay.clone(),
            thresholds: config.status.clone(),
        }
    }

    /// Load the saved health record, seeding (and saving) defaults on
    /// first run. Never fails.
    pub fn load_state(
        store: &mut dyn KeyValueStore,
        config: &PetConfig,
        now_ms: i64,
        notices: &mut Notices,
    ) -> Self {
        let mut tracker = Self::new(config, now_ms);
        match store.get(storage_keys::HEALTH) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) if value.is_object() => {
                    tracker.state = decode_lenient(&value, now_ms, &tracker.thresholds);
                    tracker.state.recompute_status(&tracker.thresholds);
                    log::debug!(
                        "Loaded health: hunger={:.1} happiness={:.1} status={}",
                        tracker.state.hunger,
                        tracker.state.happiness,
                        tracker.state.status.as_str()
                    );
                }
                Ok(_) | Err(_) => {
                    log::warn!("Saved health data is malformed, starting from defaults");
                    notices.warn("Your pet's saved health was unreadable, so it starts fresh.");
                    tracker.persist(store, notices);
                }
            },
            Ok(None) => {
                log::info!("No saved health data, seeding a new pet");
                tracker.persist(store, notices);
            }
            Err(e) => {
                log::warn!("Could not read health data: {}", e);
                notices.warn("Storage is unavailable. Your pet's progress won't be saved.");
            }
        }
        tracker
    }

    pub fn state(&self) -> &HealthState {
        &self.state
    }

    pub fn status(&self) -> HealthStatus {
        self.state.status
    }

    pub fn hunger(&self) -> f32 {
        self.state.hunger
    }

    pub fn happiness(&self) -> f32 {
        self.state.happiness
    }

    pub fn recovery(&self) -> &RecoveryFlags {
        &self.state.recovery
    }

    pub fn thresholds(&self) -> &StatusThresholds {
        &self.thresholds
    }

    /// Weighted health percentage.
    pub fn percentage(&self) -> f32 {
        self.state.percentage(&self.thresholds)
    }

    /// The owner did something: restart the inactivity span.
    pub fn mark_active(&mut self) {
        self.state.mark_active();
    }

    /// Apply decay for the time since the last recorded visit.
    pub fn apply_elapsed_decay(&mut self, now_ms: i64) -> Option<DecayOutcome> {
        let outcome =
            decay::apply_elapsed_decay(&mut self.state, now_ms, &self.decay, &self.thresholds)?;
        log::debug!(
            "Decayed {:.2}/{:.2} over {}s",
            outcome.hunger_lost,
            outcome.happiness_lost,
            outcome.elapsed_ms / 1000
        );
        if let Some(change) = outcome.status_change {
            log_change(change);
        }
        Some(outcome)
    }

    pub fn perform_action(&mut self, action: ActionKind) -> ActionOutcome {
        let outcome = self.state.apply_action(action, &self.thresholds);
        log::debug!(
            "{}: hunger={:.1} happiness={:.1}",
            action,
            self.state.hunger,
            self.state.happiness
        );
        if let Some(change) = outcome.status_change {
            log_change(change);
        }
        outcome
    }

    pub fn recompute_status(&mut self) -> Option<StatusChange> {
        let change = self.state.recompute_status(&self.thresholds);
        if let Some(change) = change {
            log_change(change);
        }
        change
    }

    pub fn check_recovery(&mut self) -> Option<StatusChange> {
        let change = self.state.check_recovery(&self.thresholds);
        if let Some(change) = change {
            log_change(change);
        }
        change
    }

    /// Spend happiness as shop currency.
    pub fn spend_happiness(&mut self, amount: f32) -> Option<StatusChange> {
        let change = self.state.spend_happiness(amount, &self.thresholds);
        if let Some(change) = change {
            log_change(change);
        }
        change
    }

    /// Overwrite the vitals from imported data. Status is forced to the
    /// tier the vitals imply and the checklist starts empty.
    pub fn restore(&mut self, hunger: f32, happiness: f32) {
        self.state.hunger = clamp_vital(hunger);
        self.state.happiness = clamp_vital(happiness);
        self.state.status = tier_for(self.percentage(), &self.thresholds);
        self.state.recovery = RecoveryFlags::default();
    }

    /// Back to 100 / 100 / Healthy with an empty checklist.
    pub fn reset(&mut self, now_ms: i64) {
        log::info!("Health reset");
        self.state.reset(now_ms);
    }

    /// Save the health record. Failures are logged and surfaced as a notice.
    pub fn persist(&self, store: &mut dyn KeyValueStore, notices: &mut Notices) {
        if let Err(e) = write_json(store, storage_keys::HEALTH, &self.state) {
            log::warn!("Could not save health data: {}", e);
            notices.warn("Couldn't save your pet's health. Progress may be lost.");
        }
    }
}

fn log_change(change: StatusChange) {
    if change.is_promotion() {
        log::info!("Status upgraded {} -> {}", change.from.as_str(), change.to.as_str());
    } else {
        log::info!("Status downgraded {} -> {}", change.from.as_str(), change.to.as_str());
    }
}

/// Decode a saved health blob field by field. Missing or mistyped fields
/// keep their defaults, vitals are clamped, and a `lastVisit` in the future
/// is pulled back to `now_ms`. Older saves without `inactiveSince` start
/// their inactivity at `lastVisit`.
pub fn decode_lenient(value: &Value, now_ms: i64, t: &StatusThresholds) -> HealthState {
    let mut state = HealthState::fresh(now_ms);
    let Some(obj) = value.as_object() else {
        return state;
    };

    let epoch_ms = |key: &str| {
        obj.get(key)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
    };
    if let Some(ms) = epoch_ms("lastVisit") {
        state.last_visit = ms.min(now_ms);
    }
    state.inactive_since = epoch_ms("inactiveSince")
        .map_or(state.last_visit, |ms| ms.min(state.last_visit));
    if let Some(h) = obj.get("hunger").and_then(Value::as_f64) {
        state.hunger = h as f32;
    }
    if let Some(h) = obj.get("happiness").and_then(Value::as_f64) {
        state.happiness = h as f32;
    }
    state.clamp_vitals();

    state.status = obj
        .get("status")
        .and_then(Value::as_str)
        .and_then(HealthStatus::from_wire)
        .unwrap_or_else(|| tier_for(state.percentage(t), t));

    if let Some(r) = obj.get("recovery").and_then(Value::as_object) {
        let flag = |name: &str| r.get(name).and_then(Value::as_bool).unwrap_or(false);
        state.recovery = RecoveryFlags {
            fed: flag("fed"),
            played: flag("played"),
            petted: flag("petted"),
            brushed: flag("brushed"),
            given_toy: flag("givenToy"),
        };
    }
    state
}
