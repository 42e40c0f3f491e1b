//! PixelPaws Headless Scenario Harness
//!
//! Validates the care rules and the stateful pet without any front end.
//! Runs entirely in-process against a manual clock and an in-memory store.
//!
//! Usage:
//!   cargo run -p pixelpaws-simtest
//!   cargo run -p pixelpaws-simtest -- --verbose

use pixelpaws_core::{KeyValueStore, ManualClock, MemoryStore, Pet};
use pixelpaws_logic::actions::ActionKind;
use pixelpaws_logic::config::{DecayConfig, PetConfig, StatusThresholds};
use pixelpaws_logic::constants::{storage_keys, MS_PER_HOUR};
use pixelpaws_logic::customization::Feature;
use pixelpaws_logic::decay::{self, Neglect};
use pixelpaws_logic::health::{self, HealthState, HealthStatus, RecoveryFlags};
use pixelpaws_logic::loyalty::{LoyaltyState, MAX_VISIT_DAYS};
use pixelpaws_logic::shop::{self, CATALOG};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

// 2024-03-09T16:00:00Z
const START: i64 = 1_710_000_000_000;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    println!("=== PixelPaws Scenario Harness ===\n");

    let mut results = Vec::new();

    // 1. Weighted percentage & tiers
    results.extend(validate_percentage(verbose));

    // 2. Decay curve
    results.extend(validate_decay(verbose));

    // 3. Recovery gating
    results.extend(validate_recovery(verbose));

    // 4. Shop gate
    results.extend(validate_shop(verbose));

    // 5. Loyalty week
    results.extend(validate_loyalty(verbose));

    // 6. Random care sessions
    results.extend(validate_random_sessions(verbose));

    // 7. Storage & backup
    results.extend(validate_storage(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Weighted Percentage ──────────────────────────────────────────────

fn validate_percentage(verbose: bool) -> Vec<TestResult> {
    println!("--- Weighted Percentage ---");
    let mut results = Vec::new();
    let t = StatusThresholds::default();

    let balanced = health::weighted_percentage(70.0, 50.0, &t);
    results.push(TestResult {
        name: "pct_balanced_is_average".into(),
        passed: balanced == 60.0,
        detail: format!("70/50 → {}", balanced),
    });

    let lopsided = health::weighted_percentage(20.0, 80.0, &t);
    results.push(TestResult {
        name: "pct_low_vital_dominates".into(),
        passed: lopsided == 35.0,
        detail: format!("20/80 → {} (average would be 50)", lopsided),
    });

    // Sweep: percentage stays within the vitals and is symmetric
    let mut bad = 0;
    let mut checked = 0;
    for h in (0..=100).step_by(5) {
        for p in (0..=100).step_by(5) {
            let (h, p) = (h as f32, p as f32);
            let a = health::weighted_percentage(h, p, &t);
            let b = health::weighted_percentage(p, h, &t);
            if a != b || a < h.min(p) || a > h.max(p) {
                bad += 1;
                if verbose {
                    println!("    {}/{} → {} vs {}", h, p, a, b);
                }
            }
            checked += 1;
        }
    }
    results.push(TestResult {
        name: "pct_sweep_bounded_symmetric".into(),
        passed: bad == 0,
        detail: format!("{} combinations, {} out of bounds", checked, bad),
    });

    results.push(TestResult {
        name: "pct_tier_boundaries".into(),
        passed: health::tier_for(60.0, &t) == HealthStatus::Healthy
            && health::tier_for(59.9, &t) == HealthStatus::Unwell
            && health::tier_for(30.0, &t) == HealthStatus::Unwell
            && health::tier_for(29.9, &t) == HealthStatus::Sick,
        detail: "≥60 healthy, ≥30 unwell, else sick".into(),
    });

    results
}

// ── 2. Decay ────────────────────────────────────────────────────────────

fn validate_decay(_verbose: bool) -> Vec<TestResult> {
    println!("--- Decay ---");
    let mut results = Vec::new();
    let cfg = DecayConfig::default();
    let t = StatusThresholds::default();

    let hour = decay::decay_amount(60.0, &cfg);
    let three = decay::decay_amount(180.0, &cfg);
    results.push(TestResult {
        name: "decay_tiered_rates".into(),
        passed: (hour - 12.0).abs() < 1e-4 && (three - 14.4).abs() < 1e-4,
        detail: format!("1h → {:.2}, 3h → {:.2}", hour, three),
    });

    let mut s = HealthState::fresh(0);
    let none = decay::apply_elapsed_decay(&mut s, 30_000, &cfg, &t);
    results.push(TestResult {
        name: "decay_grace_period".into(),
        passed: none.is_none() && s.last_visit == 0,
        detail: "30 s away changes nothing and keeps last_visit".into(),
    });

    let mut s = HealthState::fresh(0);
    decay::apply_elapsed_decay(&mut s, 2 * MS_PER_HOUR, &cfg, &t);
    let once = s.clone();
    let again = decay::apply_elapsed_decay(&mut s, 2 * MS_PER_HOUR, &cfg, &t);
    results.push(TestResult {
        name: "decay_idempotent".into(),
        passed: again.is_none() && s == once,
        detail: format!("same now twice → hunger {:.1}", s.hunger),
    });

    let mut s = HealthState::fresh(10 * MS_PER_HOUR);
    let back = decay::apply_elapsed_decay(&mut s, 0, &cfg, &t);
    results.push(TestResult {
        name: "decay_backwards_clock".into(),
        passed: back.is_none() && s.hunger == 100.0,
        detail: "clock moving backwards is ignored".into(),
    });

    let mut eight = HealthState::fresh(0);
    let out8 = decay::apply_elapsed_decay(&mut eight, 8 * MS_PER_HOUR, &cfg, &t);
    let mut day = HealthState::fresh(0);
    let out24 = decay::apply_elapsed_decay(&mut day, 24 * MS_PER_HOUR, &cfg, &t);
    results.push(TestResult {
        name: "decay_neglect_caps".into(),
        passed: out8.and_then(|o| o.neglect) == Some(Neglect::Unwell)
            && eight.hunger == 50.0
            && out24.and_then(|o| o.neglect) == Some(Neglect::Sick)
            && day.hunger == 20.0
            && day.status == HealthStatus::Sick,
        detail: format!(
            "8h → {:.0} ({}), 24h → {:.0} ({})",
            eight.hunger,
            eight.status.as_str(),
            day.hunger,
            day.status.as_str()
        ),
    });

    // Ticks are not activity: an idle open pet loses what an absent one does
    let mut ticked = HealthState::fresh(0);
    let mut now = 0;
    while now < 5 * MS_PER_HOUR {
        now += 30 * 1000;
        decay::apply_elapsed_decay(&mut ticked, now, &cfg, &t);
    }
    let mut away = HealthState::fresh(0);
    decay::apply_elapsed_decay(&mut away, 5 * MS_PER_HOUR, &cfg, &t);
    results.push(TestResult {
        name: "decay_ticks_match_absence".into(),
        passed: (ticked.hunger - away.hunger).abs() < 1e-2 && (away.hunger - 83.2).abs() < 1e-2,
        detail: format!(
            "5h of 30 s ticks → {:.2}, 5h away → {:.2}",
            ticked.hunger, away.hunger
        ),
    });

    results
}

// ── 3. Recovery ─────────────────────────────────────────────────────────

fn validate_recovery(_verbose: bool) -> Vec<TestResult> {
    println!("--- Recovery ---");
    let mut results = Vec::new();
    let t = StatusThresholds::default();

    results.push(TestResult {
        name: "recovery_requirements".into(),
        passed: health::recovery_requirements(HealthStatus::Healthy).is_empty()
            && health::recovery_requirements(HealthStatus::Unwell).len() == 2
            && health::recovery_requirements(HealthStatus::Sick).len() == 5,
        detail: "healthy 0, unwell 2, sick 5 actions".into(),
    });

    // Unwell with good vitals can't upgrade on vitals alone
    let mut s = HealthState::fresh(0);
    s.status = HealthStatus::Unwell;
    s.hunger = 90.0;
    s.happiness = 90.0;
    let change = s.recompute_status(&t);
    results.push(TestResult {
        name: "recovery_gates_upgrade".into(),
        passed: change.is_none() && s.status == HealthStatus::Unwell,
        detail: "90/90 unwell stays unwell without fed+played".into(),
    });

    s.apply_action(ActionKind::Feed, &t);
    let out = s.apply_action(ActionKind::Fetch, &t);
    results.push(TestResult {
        name: "recovery_unwell_to_healthy".into(),
        passed: out.status_change.is_some_and(|c| c.is_promotion())
            && s.status == HealthStatus::Healthy
            && s.recovery == RecoveryFlags::default(),
        detail: "feed + fetch promotes and clears the checklist".into(),
    });

    // Treat is never a recovery action
    let mut sick = HealthState::fresh(0);
    sick.status = HealthStatus::Sick;
    sick.hunger = 10.0;
    sick.happiness = 10.0;
    for _ in 0..10 {
        sick.apply_action(ActionKind::Treat, &t);
    }
    results.push(TestResult {
        name: "recovery_treat_does_not_count".into(),
        passed: sick.recovery == RecoveryFlags::default(),
        detail: format!("10 treats → hunger {:.0}, no flags", sick.hunger),
    });

    results
}

// ── 4. Shop ─────────────────────────────────────────────────────────────

fn validate_shop(_verbose: bool) -> Vec<TestResult> {
    println!("--- Shop ---");
    let mut results = Vec::new();
    let cfg = PetConfig::default().shop;

    results.push(TestResult {
        name: "shop_catalog".into(),
        passed: CATALOG.len() == 3 && CATALOG.iter().all(|i| i.cost > 0.0),
        detail: CATALOG
            .iter()
            .map(|i| format!("{} {}", i.id, i.cost))
            .collect::<Vec<_>>()
            .join(", "),
    });

    results.push(TestResult {
        name: "shop_gate".into(),
        passed: shop::is_open(50.0, &cfg) && !shop::is_open(49.9, &cfg),
        detail: format!("opens at happiness {}", cfg.min_happiness_to_open),
    });

    let owned = vec!["crown".to_string()];
    results.push(TestResult {
        name: "shop_rejections".into(),
        passed: shop::check_purchase("crown", 100.0, &owned, &cfg).is_err()
            && shop::check_purchase("cape", 100.0, &[], &cfg).is_err()
            && shop::check_purchase("red-collar", 40.0, &[], &cfg).is_err()
            && shop::check_purchase("red-collar", 60.0, &[], &cfg).is_ok(),
        detail: "owned, unknown, and closed-shop purchases refused".into(),
    });

    results
}

// ── 5. Loyalty ──────────────────────────────────────────────────────────

fn validate_loyalty(_verbose: bool) -> Vec<TestResult> {
    println!("--- Loyalty ---");
    let mut results = Vec::new();

    let mut s = LoyaltyState::first_visit(1000);
    let same_day = s.register_visit(1000);
    let skipped = s.register_visit(1010);
    results.push(TestResult {
        name: "loyalty_one_day_per_visit".into(),
        passed: !same_day.new_day && skipped.visit_days == 2 && skipped.reached_returning_day(),
        detail: "same day ignored, a ten-day gap counts once".into(),
    });

    for day in 1011..1030 {
        s.register_visit(day);
    }
    results.push(TestResult {
        name: "loyalty_caps_at_seven".into(),
        passed: s.visit_days == MAX_VISIT_DAYS && s.unlocked_themes().len() == 7,
        detail: format!("{} visit days, {} themes", s.visit_days, s.unlocked_themes().len()),
    });

    results
}

// ── 6. Random Sessions ──────────────────────────────────────────────────

fn validate_random_sessions(verbose: bool) -> Vec<TestResult> {
    println!("--- Random Sessions ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(7);

    let clock = ManualClock::new(START);
    let mut pet = Pet::open(MemoryStore::new(), &clock, PetConfig::default());
    pet.reseed(7);

    let mut out_of_range = 0;
    let mut ungated_upgrades = 0;
    let mut steps = 0;

    for _ in 0..500 {
        // Away for anything from a few seconds to a day and a half
        clock.advance_ms(rng.gen_range(5_000..36 * MS_PER_HOUR));
        pet.tick();

        let before = pet.health().state().clone();
        let action = *ActionKind::ALL.choose(&mut rng).unwrap_or(&ActionKind::Feed);
        let out = pet.perform(action);
        steps += 1;

        let s = pet.health().state();
        if !(0.0..=100.0).contains(&s.hunger) || !(0.0..=100.0).contains(&s.happiness) {
            out_of_range += 1;
        }
        if let Some(change) = out.status_change {
            if change.is_promotion() {
                let mut flags = before.recovery;
                flags.mark(action);
                if !health::recovery_met(before.status, &flags) {
                    ungated_upgrades += 1;
                    if verbose {
                        println!("    ungated {:?} after {}", change, action);
                    }
                }
            }
        }

        if rng.gen_bool(0.1) {
            let _ = pet.purchase(CATALOG[rng.gen_range(0..CATALOG.len())].id);
        }
        pet.drain_notices();
    }

    results.push(TestResult {
        name: "sessions_vitals_in_range".into(),
        passed: out_of_range == 0,
        detail: format!("{} steps, {} out of range", steps, out_of_range),
    });
    results.push(TestResult {
        name: "sessions_upgrades_gated".into(),
        passed: ungated_upgrades == 0,
        detail: format!("{} upgrades without a complete checklist", ungated_upgrades),
    });
    results.push(TestResult {
        name: "sessions_loyalty_full".into(),
        passed: pet.calendar().visit_days() == MAX_VISIT_DAYS,
        detail: format!("visit days after ~1 year: {}", pet.calendar().visit_days()),
    });

    let report = pet.report();
    log::info!("Final report: {:?}", report);
    results.push(TestResult {
        name: "sessions_report_consistent".into(),
        passed: report.status == pet.health().status() && !report.speech.is_empty(),
        detail: format!(
            "{}% {} ({}), says \"{}\"",
            report.percentage,
            report.status_label(),
            report.mood,
            report.speech
        ),
    });

    results
}

// ── 7. Storage & Backup ─────────────────────────────────────────────────

fn validate_storage(_verbose: bool) -> Vec<TestResult> {
    println!("--- Storage & Backup ---");
    let mut results = Vec::new();
    let config = PetConfig::default();

    let clock = ManualClock::new(START);
    let mut pet = Pet::open(MemoryStore::new(), &clock, config.clone());
    let _ = pet.purchase("red-collar");
    pet.perform(ActionKind::Brush);
    pet.cycle_feature(Feature::Color, true);

    let keys_present = storage_keys::ALL
        .iter()
        .filter(|k| pet.store().get(k).ok().flatten().is_some())
        .count();
    results.push(TestResult {
        name: "storage_keys_written".into(),
        passed: keys_present == storage_keys::ALL.len() - 1,
        detail: format!(
            "{}/{} keys (returning flag not yet earned)",
            keys_present,
            storage_keys::ALL.len()
        ),
    });

    let exported = pet.export();
    let shape_ok = exported
        .as_ref()
        .ok()
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
        .is_some_and(|v| {
            v["version"] == "1.0"
                && v["customization"]["color"] == "orange"
                && v["ownedItems"][0] == "red-collar"
                && v["health"]["happiness"].is_number()
        });
    results.push(TestResult {
        name: "backup_export_shape".into(),
        passed: shape_ok,
        detail: "version, customization, ownedItems, health present".into(),
    });

    let mut fresh = Pet::open(MemoryStore::new(), &clock, config.clone());
    let imported = exported
        .map_err(|e| e.to_string())
        .and_then(|raw| fresh.import(&raw).map_err(|e| e.to_string()));
    results.push(TestResult {
        name: "backup_import".into(),
        passed: imported.is_ok()
            && fresh.inventory() == pet.inventory()
            && fresh.appearance() == pet.appearance(),
        detail: match imported {
            Ok(()) => format!("{} items restored", fresh.inventory().owned().len()),
            Err(e) => e,
        },
    });

    let mut broken = MemoryStore::new();
    broken.insert_raw(storage_keys::HEALTH, "{\"hunger\": \"lots\"");
    let mut recovered = Pet::open(broken, &clock, config.clone());
    let notices = recovered.drain_notices();
    results.push(TestResult {
        name: "storage_corrupt_health".into(),
        passed: recovered.health().hunger() == 100.0 && !notices.is_empty(),
        detail: format!("{} notice(s), defaults restored", notices.len()),
    });

    let mut offline = Pet::open(MemoryStore::unavailable(), &clock, config);
    offline.perform(ActionKind::Feed);
    results.push(TestResult {
        name: "storage_unavailable".into(),
        passed: offline.health().hunger() == 100.0 && offline.achievements().has_played(),
        detail: "pet keeps working in memory".into(),
    });

    results
}
