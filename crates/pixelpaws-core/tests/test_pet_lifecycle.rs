//! Integration tests for a pet across sessions.
//!
//! Exercises: open → care → close → reopen later, against the file store
//! on disk and against memory stores that fail in the ways browser
//! storage does (disabled, full, corrupt).

use pixelpaws_core::notice::NoticeKind;
use pixelpaws_core::{FileStore, KeyValueStore, ManualClock, MemoryStore, Pet};
use pixelpaws_logic::achievements::AchievementId;
use pixelpaws_logic::actions::ActionKind;
use pixelpaws_logic::config::PetConfig;
use pixelpaws_logic::constants::storage_keys;
use pixelpaws_logic::health::HealthStatus;

// ── Helpers ────────────────────────────────────────────────────────────

// 2024-03-09T16:00:00Z
const START: i64 = 1_710_000_000_000;

fn reopen<S: KeyValueStore>(store: S, clock: &ManualClock) -> Pet<S, &ManualClock> {
    Pet::open(store, clock, PetConfig::default())
}

fn warnings<S: KeyValueStore>(pet: &mut Pet<S, &ManualClock>) -> usize {
    pet.drain_notices()
        .iter()
        .filter(|n| n.kind == NoticeKind::Warning)
        .count()
}

// ── Sessions ───────────────────────────────────────────────────────────

#[test]
fn state_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pet.json");
    let clock = ManualClock::new(START);

    let mut pet = reopen(FileStore::open(&path).unwrap(), &clock);
    pet.purchase("blue-bandana").unwrap();
    pet.perform(ActionKind::Fetch);
    let happiness = pet.health().happiness();
    drop(pet);

    let pet = reopen(FileStore::open(&path).unwrap(), &clock);
    assert_eq!(pet.health().happiness(), happiness);
    assert!(pet.inventory().is_equipped("blue-bandana"));
    assert!(pet.achievements().is_unlocked(AchievementId::FirstPlay));
    assert!(pet.achievements().is_unlocked(AchievementId::FirstPurchase));
}

#[test]
fn neglected_pet_recovers_through_pet_api() {
    let clock = ManualClock::new(START);
    let pet = reopen(MemoryStore::new(), &clock);
    let store = pet.into_store();

    clock.advance_hours(25);
    let mut pet = reopen(store, &clock);
    assert_eq!(pet.health().status(), HealthStatus::Sick);

    for action in [
        ActionKind::Feed,
        ActionKind::Fetch,
        ActionKind::Pet,
        ActionKind::Brush,
    ] {
        pet.perform(action);
        assert_eq!(pet.health().status(), HealthStatus::Sick);
    }
    pet.perform(ActionKind::Toy);
    assert_eq!(pet.health().status(), HealthStatus::Unwell);
    assert!(!pet.health().recovery().fed);

    let report = pet.report();
    assert_eq!(report.status, HealthStatus::Unwell);
    assert_eq!(report.required_actions, vec!["Feed", "Play Fetch"]);
}

#[test]
fn reopening_twice_at_the_same_instant_is_stable() {
    let clock = ManualClock::new(START);
    let pet = reopen(MemoryStore::new(), &clock);
    clock.advance_hours(3);
    let pet = reopen(pet.into_store(), &clock);
    let first = pet.health().state().clone();
    let pet = reopen(pet.into_store(), &clock);
    assert_eq!(pet.health().state(), &first);
}

#[test]
fn short_sessions_still_accumulate_decay() {
    let clock = ManualClock::new(START);
    let mut pet = reopen(MemoryStore::new(), &clock);
    // Ticks inside the grace period do nothing, but the time isn't lost
    for _ in 0..4 {
        clock.advance_ms(30_000);
        pet.tick();
    }
    assert!(pet.health().hunger() < 100.0);
    assert!((pet.health().hunger() - 99.6).abs() < 1e-3);
}

#[test]
fn idle_open_pet_decays_like_an_absent_one() {
    let clock = ManualClock::new(START);
    let mut open = reopen(MemoryStore::new(), &clock);
    let away = reopen(MemoryStore::new(), &clock).into_store();

    for _ in 0..180 {
        clock.advance_ms(60_000);
        open.tick();
    }
    let away = reopen(away, &clock);

    // 60 min at 0.2 + 120 min at 0.02
    assert!((open.health().hunger() - 85.6).abs() < 1e-2);
    assert!((away.health().hunger() - 85.6).abs() < 1e-2);
    assert!((open.health().happiness() - away.health().happiness()).abs() < 1e-2);
}

#[test]
fn care_restarts_the_fast_tier() {
    let clock = ManualClock::new(START);
    let mut pet = reopen(MemoryStore::new(), &clock);
    clock.advance_hours(3);
    pet.tick();
    pet.perform(ActionKind::Brush);
    let hunger = pet.health().hunger();

    clock.advance_ms(10 * 60_000);
    pet.tick();
    assert!((hunger - pet.health().hunger() - 2.0).abs() < 1e-3);
}

// ── Storage failures ───────────────────────────────────────────────────

#[test]
fn disabled_storage_runs_in_memory() {
    let clock = ManualClock::new(START);
    let mut pet = reopen(MemoryStore::unavailable(), &clock);
    assert!(warnings(&mut pet) >= 1);

    pet.perform(ActionKind::Feed);
    assert!(pet.achievements().is_unlocked(AchievementId::FirstPlay));
    assert!(warnings(&mut pet) >= 1);
}

#[test]
fn full_storage_keeps_the_session_going() {
    let clock = ManualClock::new(START);
    let mut pet = reopen(MemoryStore::with_quota(64), &clock);
    assert!(warnings(&mut pet) >= 1);

    pet.purchase("crown").unwrap();
    assert_eq!(pet.health().happiness(), 65.0);
    assert!(pet.inventory().owns("crown"));
}

#[test]
fn corrupt_blobs_fall_back_per_key() {
    let mut store = MemoryStore::new();
    store.insert_raw(storage_keys::HEALTH, "not json");
    store.insert_raw(storage_keys::OWNED_ITEMS, r#"["crown"]"#);
    store.insert_raw(storage_keys::EQUIPPED_ITEMS, "[[[");
    store.insert_raw(storage_keys::THEME_DATA, r#"{"activeTheme":7}"#);

    let clock = ManualClock::new(START);
    let mut pet = reopen(store, &clock);
    assert_eq!(pet.health().status(), HealthStatus::Healthy);
    assert!(pet.inventory().owns("crown"));
    assert!(pet.inventory().equipped().is_empty());
    assert_eq!(pet.calendar().visit_days(), 1);
    assert!(warnings(&mut pet) >= 3);

    // Everything was rewritten in a readable shape
    let reopened = reopen(pet.into_store(), &clock);
    assert!(reopened.inventory().owns("crown"));
}

#[test]
fn write_failures_mid_session_are_reported_not_fatal() {
    let clock = ManualClock::new(START);
    let pet = reopen(MemoryStore::new(), &clock);
    let mut store = pet.into_store();
    store.set_fail_writes(true);

    let mut pet = reopen(store, &clock);
    pet.drain_notices();
    pet.perform(ActionKind::Pet);
    assert!(warnings(&mut pet) >= 1);
    assert!(pet.achievements().has_played());
}
