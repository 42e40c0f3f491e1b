//! Time-based vital decay.
//!
//! Loss is a function of how long the pet has been left alone, measured
//! from `inactive_since` (the last care action or app open). Each pass
//! only applies the part of that loss not yet applied, tracked by
//! `last_visit`. A pet ticking every 30 seconds and a pet checked once at
//! the end of the same span end up with the same vitals.
//!
//! - First tier: `first_tier_rate` points/minute for the first
//!   `first_tier_minutes` of inactivity
//! - Trickle: `trickle_rate` points/minute afterwards
//! - Neglect caps: once inactivity reaches 8 h both vitals are capped at
//!   50, at 24 h at 20. Trickle decay continues below the cap.
//!
//! Applying decay moves `last_visit` to `now`, so calling it twice with the
//! same `now` is the same as calling it once.

use crate::config::{DecayConfig, StatusThresholds};
use crate::constants::{MS_PER_HOUR, MS_PER_MINUTE};
use crate::health::{clamp_vital, HealthState, StatusChange};

/// Long-absence severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neglect {
    /// Away long enough to cap vitals at the unwell level.
    Unwell,
    /// Away long enough to cap vitals at the sick level.
    Sick,
}

/// What a decay pass did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayOutcome {
    pub elapsed_ms: i64,
    pub hunger_lost: f32,
    pub happiness_lost: f32,
    /// Neglect level in effect for the whole inactivity span.
    pub neglect: Option<Neglect>,
    pub status_change: Option<StatusChange>,
}

fn tiered_loss(elapsed_minutes: f64, cfg: &DecayConfig) -> f64 {
    if elapsed_minutes <= 0.0 {
        return 0.0;
    }
    let first_tier = f64::from(cfg.first_tier_minutes.max(0.0));
    let fast = elapsed_minutes.min(first_tier);
    let slow = (elapsed_minutes - first_tier).max(0.0);
    fast * f64::from(cfg.first_tier_rate) + slow * f64::from(cfg.trickle_rate)
}

fn minutes(ms: i64) -> f64 {
    ms as f64 / MS_PER_MINUTE as f64
}

/// Points lost over `elapsed_minutes` of inactivity under the tiered rates.
pub fn decay_amount(elapsed_minutes: f64, cfg: &DecayConfig) -> f32 {
    tiered_loss(elapsed_minutes, cfg) as f32
}

/// Neglect level for an absence of `elapsed_ms`.
pub fn neglect_for(elapsed_ms: i64, cfg: &DecayConfig) -> Option<Neglect> {
    let hours = elapsed_ms as f64 / MS_PER_HOUR as f64;
    if hours >= f64::from(cfg.sick_after_hours) {
        Some(Neglect::Sick)
    } else if hours >= f64::from(cfg.unwell_after_hours) {
        Some(Neglect::Unwell)
    } else {
        None
    }
}

/// Upper bound on both vitals after `inactive_ms` of inactivity: the cap
/// of the neglect level reached, lowered by the trickle since reaching it.
pub fn neglect_ceiling(inactive_ms: i64, cfg: &DecayConfig) -> Option<(Neglect, f32)> {
    let level = neglect_for(inactive_ms, cfg)?;
    let (cap, after_hours) = match level {
        Neglect::Unwell => (cfg.unwell_cap, cfg.unwell_after_hours),
        Neglect::Sick => (cfg.sick_cap, cfg.sick_after_hours),
    };
    let since =
        tiered_loss(minutes(inactive_ms), cfg) - tiered_loss(f64::from(after_hours) * 60.0, cfg);
    Some((level, (f64::from(cap) - since.max(0.0)) as f32))
}

/// Apply decay for the time between `state.last_visit` and `now_ms`.
///
/// Returns `None` (and leaves the state untouched) when less than the grace
/// period has elapsed or the clock went backwards.
pub fn apply_elapsed_decay(
    state: &mut HealthState,
    now_ms: i64,
    cfg: &DecayConfig,
    t: &StatusThresholds,
) -> Option<DecayOutcome> {
    let elapsed_ms = now_ms.saturating_sub(state.last_visit);
    if elapsed_ms <= 0 || elapsed_ms < i64::from(cfg.grace_seconds) * 1000 {
        return None;
    }

    let hunger_before = state.hunger;
    let happiness_before = state.happiness;

    let anchor = state.inactive_since.min(state.last_visit);
    let inactive_ms = now_ms - anchor;
    let applied_ms = state.last_visit - anchor;
    let amount =
        (tiered_loss(minutes(inactive_ms), cfg) - tiered_loss(minutes(applied_ms), cfg)) as f32;
    state.hunger = clamp_vital(state.hunger - amount);
    state.happiness = clamp_vital(state.happiness - amount);

    let ceiling = neglect_ceiling(inactive_ms, cfg);
    if let Some((_, cap)) = ceiling {
        state.hunger = clamp_vital(state.hunger.min(cap));
        state.happiness = clamp_vital(state.happiness.min(cap));
    }

    state.inactive_since = anchor;
    state.last_visit = now_ms;
    let status_change = state.recompute_status(t);

    Some(DecayOutcome {
        elapsed_ms,
        hunger_lost: hunger_before - state.hunger,
        happiness_lost: happiness_before - state.happiness,
        neglect: ceiling.map(|(level, _)| level),
        status_change,
    })
}
