//! Pure health-status logic.
//!
//! Two vitals (hunger and happiness, both 0–100 where 100 is best) are
//! combined into a weighted health percentage, which maps to a
//! three-level [`HealthStatus`]:
//!
//! | Percentage | Status |
//! |------------|--------|
//! | ≥ 60 | `Healthy` |
//! | 30..60 | `Unwell` |
//! | < 30 | `Sick` |
//!
//! Downgrades apply as soon as the percentage drops. Upgrades are gated by
//! the recovery checklist: an Unwell pet must be fed and played with, a
//! Sick pet needs all five care actions. Any status change clears the
//! checklist.
//!
//! ```
//! use pixelpaws_logic::config::StatusThresholds;
//! use pixelpaws_logic::health::{weighted_percentage, tier_for, HealthStatus};
//!
//! let t = StatusThresholds::default();
//! let pct = weighted_percentage(20.0, 80.0, &t);
//! assert_eq!(pct, 35.0);
//! assert_eq!(tier_for(pct, &t), HealthStatus::Unwell);
//! ```

use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::config::StatusThresholds;
use crate::constants::{VITAL_MAX, VITAL_MIN};

/// Derived health tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Older saves call this tier `depleted`.
    #[serde(alias = "depleted")]
    Unwell,
    Sick,
}

impl HealthStatus {
    fn rank(self) -> u8 {
        match self {
            HealthStatus::Sick => 0,
            HealthStatus::Unwell => 1,
            HealthStatus::Healthy => 2,
        }
    }

    pub fn is_better_than(self, other: HealthStatus) -> bool {
        self.rank() > other.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unwell => "unwell",
            HealthStatus::Sick => "sick",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Unwell => "Unwell",
            HealthStatus::Sick => "Sick",
        }
    }

    /// Parse a persisted status string, accepting the legacy `depleted`.
    pub fn from_wire(s: &str) -> Option<HealthStatus> {
        match s {
            "healthy" => Some(HealthStatus::Healthy),
            "unwell" | "depleted" => Some(HealthStatus::Unwell),
            "sick" => Some(HealthStatus::Sick),
            _ => None,
        }
    }
}

/// Care actions performed since the last status change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecoveryFlags {
    pub fed: bool,
    pub played: bool,
    pub petted: bool,
    pub brushed: bool,
    pub given_toy: bool,
}

impl RecoveryFlags {
    /// Tick the box for `kind`. Treats don't count.
    pub fn mark(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::Feed => self.fed = true,
            ActionKind::Fetch => self.played = true,
            ActionKind::Pet => self.petted = true,
            ActionKind::Brush => self.brushed = true,
            ActionKind::Toy => self.given_toy = true,
            ActionKind::Treat => {}
        }
    }

    pub fn is_marked(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Feed => self.fed,
            ActionKind::Fetch => self.played,
            ActionKind::Pet => self.petted,
            ActionKind::Brush => self.brushed,
            ActionKind::Toy => self.given_toy,
            ActionKind::Treat => false,
        }
    }

    pub fn all_done(&self) -> bool {
        self.fed && self.played && self.petted && self.brushed && self.given_toy
    }
}

/// Actions a pet in `status` must receive before it may move up a tier.
pub fn recovery_requirements(status: HealthStatus) -> &'static [ActionKind] {
    match status {
        HealthStatus::Healthy => &[],
        HealthStatus::Unwell => &[ActionKind::Feed, ActionKind::Fetch],
        HealthStatus::Sick => &[
            ActionKind::Feed,
            ActionKind::Fetch,
            ActionKind::Pet,
            ActionKind::Brush,
            ActionKind::Toy,
        ],
    }
}

/// Whether the recovery checklist for `status` is complete.
pub fn recovery_met(status: HealthStatus, flags: &RecoveryFlags) -> bool {
    recovery_requirements(status)
        .iter()
        .all(|&kind| flags.is_marked(kind))
}

/// Outstanding recovery actions for `status`, in checklist order.
pub fn required_actions(status: HealthStatus, flags: &RecoveryFlags) -> Vec<ActionKind> {
    recovery_requirements(status)
        .iter()
        .copied()
        .filter(|&kind| !flags.is_marked(kind))
        .collect()
}

/// Clamp a vital into range. NaN is treated as a full vital.
pub fn clamp_vital(value: f32) -> f32 {
    if value.is_nan() {
        VITAL_MAX
    } else {
        value.clamp(VITAL_MIN, VITAL_MAX)
    }
}

/// Weighted health percentage.
///
/// Plain average, except when one vital is critically low while the other
/// is comparatively high: then the low vital dominates, so a starving but
/// cheerful pet doesn't read as fine.
pub fn weighted_percentage(hunger: f32, happiness: f32, t: &StatusThresholds) -> f32 {
    let low = hunger.min(happiness);
    let high = hunger.max(happiness);
    if low < t.critical_vital && high - low >= t.imbalance_gap {
        t.low_vital_weight * low + (1.0 - t.low_vital_weight) * high
    } else {
        (hunger + happiness) / 2.0
    }
}

/// Status tier implied by a percentage alone, ignoring recovery gating.
pub fn tier_for(percentage: f32, t: &StatusThresholds) -> HealthStatus {
    if percentage >= t.healthy_min {
        HealthStatus::Healthy
    } else if percentage >= t.unwell_min {
        HealthStatus::Unwell
    } else {
        HealthStatus::Sick
    }
}

/// The status a pet in `current` should have after a mutation.
///
/// Downgrades (and staying put) follow the tier directly; an upgrade is
/// only taken once the current tier's recovery checklist is complete.
pub fn next_status(
    current: HealthStatus,
    percentage: f32,
    flags: &RecoveryFlags,
    t: &StatusThresholds,
) -> HealthStatus {
    let target = tier_for(percentage, t);
    if !target.is_better_than(current) || recovery_met(current, flags) {
        target
    } else {
        current
    }
}

/// Colour band of the health bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorBand {
    Green,
    Orange,
    Red,
}

impl ColorBand {
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage >= 70.0 {
            ColorBand::Green
        } else if percentage >= 40.0 {
            ColorBand::Orange
        } else {
            ColorBand::Red
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            ColorBand::Green => "#4CAF50",
            ColorBand::Orange => "#FF9800",
            ColorBand::Red => "#F44336",
        }
    }
}

/// A status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: HealthStatus,
    pub to: HealthStatus,
}

impl StatusChange {
    pub fn is_promotion(&self) -> bool {
        self.to.is_better_than(self.from)
    }
}

/// Result of applying one care action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionOutcome {
    pub action: ActionKind,
    /// Actual gain after clamping.
    pub hunger_gained: f32,
    pub happiness_gained: f32,
    pub status_change: Option<StatusChange>,
}

/// The persisted health record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthState {
    /// Epoch milliseconds up to which decay has been applied.
    pub last_visit: i64,
    /// Start of the current stretch of inactivity. Never after `last_visit`.
    pub inactive_since: i64,
    pub status: HealthStatus,
    pub hunger: f32,
    pub happiness: f32,
    pub recovery: RecoveryFlags,
}

impl HealthState {
    /// A brand-new pet: full vitals, healthy, empty checklist.
    pub fn fresh(now_ms: i64) -> Self {
        Self {
            last_visit: now_ms,
            inactive_since: now_ms,
            status: HealthStatus::Healthy,
            hunger: VITAL_MAX,
            happiness: VITAL_MAX,
            recovery: RecoveryFlags::default(),
        }
    }

    pub fn percentage(&self, t: &StatusThresholds) -> f32 {
        weighted_percentage(self.hunger, self.happiness, t)
    }

    /// Record owner activity: the next decay pass starts a new stretch of
    /// inactivity (and its fast tier) at the decay watermark.
    pub fn mark_active(&mut self) {
        self.inactive_since = self.last_visit;
    }

    /// Clamp both vitals into range.
    pub fn clamp_vitals(&mut self) {
        self.hunger = clamp_vital(self.hunger);
        self.happiness = clamp_vital(self.happiness);
    }

    /// Bring `status` in line with the current vitals.
    ///
    /// Upgrades are routed through [`HealthState::check_recovery`].
    pub fn recompute_status(&mut self, t: &StatusThresholds) -> Option<StatusChange> {
        let target = tier_for(self.percentage(t), t);
        if target.is_better_than(self.status) {
            return self.check_recovery(t);
        }
        self.set_status(target)
    }

    /// Promote the pet if its checklist is complete and its vitals allow a
    /// better tier. Vitals are left untouched.
    pub fn check_recovery(&mut self, t: &StatusThresholds) -> Option<StatusChange> {
        if !recovery_met(self.status, &self.recovery) {
            return None;
        }
        let target = tier_for(self.percentage(t), t);
        if !target.is_better_than(self.status) {
            return None;
        }
        self.set_status(target)
    }

    /// Apply a care action, tick its recovery box, and recompute status.
    pub fn apply_action(&mut self, action: ActionKind, t: &StatusThresholds) -> ActionOutcome {
        let effect = action.effect();
        let hunger_before = self.hunger;
        let happiness_before = self.happiness;

        self.hunger = clamp_vital(self.hunger + effect.hunger_delta);
        self.happiness = clamp_vital(self.happiness + effect.happiness_delta);
        self.recovery.mark(action);

        let status_change = self.recompute_status(t);
        ActionOutcome {
            action,
            hunger_gained: self.hunger - hunger_before,
            happiness_gained: self.happiness - happiness_before,
            status_change,
        }
    }

    /// Spend happiness (shop currency), floored at zero.
    pub fn spend_happiness(&mut self, amount: f32, t: &StatusThresholds) -> Option<StatusChange> {
        self.happiness = clamp_vital(self.happiness - amount);
        self.recompute_status(t)
    }

    /// Back to a brand-new pet.
    pub fn reset(&mut self, now_ms: i64) {
        *self = HealthState::fresh(now_ms);
    }

    fn set_status(&mut self, status: HealthStatus) -> Option<StatusChange> {
        if status == self.status {
            return None;
        }
        let change = StatusChange {
            from: self.status,
            to: status,
        };
        self.status = status;
        self.recovery = RecoveryFlags::default();
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn t() -> StatusThresholds {
        StatusThresholds::default()
    }

    fn state(hunger: f32, happiness: f32, status: HealthStatus) -> HealthState {
        HealthState {
            last_visit: 0,
            inactive_since: 0,
            status,
            hunger,
            happiness,
            recovery: RecoveryFlags::default(),
        }
    }

    #[test]
    fn test_plain_average_when_balanced() {
        assert_eq!(weighted_percentage(100.0, 100.0, &t()), 100.0);
        assert_eq!(weighted_percentage(50.0, 70.0, &t()), 60.0);
        // Low but not critically low → plain average
        assert_eq!(weighted_percentage(30.0, 90.0, &t()), 60.0);
    }

    #[test]
    fn test_low_vital_emphasis() {
        // 0.75 * 20 + 0.25 * 80 = 35, not the plain 50
        assert_eq!(weighted_percentage(20.0, 80.0, &t()), 35.0);
        // Symmetric in which vital is low
        assert_eq!(weighted_percentage(80.0, 20.0, &t()), 35.0);
    }

    #[test]
    fn test_emphasis_needs_a_gap() {
        // Both critically low → plain average
        assert_eq!(weighted_percentage(10.0, 20.0, &t()), 15.0);
        // Critical but gap < 40 → plain average
        assert_eq!(weighted_percentage(20.0, 50.0, &t()), 35.0);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(tier_for(100.0, &t()), HealthStatus::Healthy);
        assert_eq!(tier_for(60.0, &t()), HealthStatus::Healthy);
        assert_eq!(tier_for(59.9, &t()), HealthStatus::Unwell);
        assert_eq!(tier_for(30.0, &t()), HealthStatus::Unwell);
        assert_eq!(tier_for(29.9, &t()), HealthStatus::Sick);
        assert_eq!(tier_for(0.0, &t()), HealthStatus::Sick);
    }

    #[test]
    fn test_downgrade_is_immediate_and_clears_flags() {
        let mut s = state(50.0, 50.0, HealthStatus::Healthy);
        s.recovery.fed = true;
        let change = s.recompute_status(&t()).unwrap();
        assert_eq!(change.from, HealthStatus::Healthy);
        assert_eq!(change.to, HealthStatus::Unwell);
        assert!(!change.is_promotion());
        assert_eq!(s.recovery, RecoveryFlags::default());
    }

    #[test]
    fn test_unwell_needs_fed_and_played() {
        let mut s = state(55.0, 55.0, HealthStatus::Unwell);
        // Fetch alone lifts the percentage over 60 but the checklist is incomplete
        s.apply_action(ActionKind::Fetch, &t());
        assert!(s.percentage(&t()) >= 60.0);
        assert_eq!(s.status, HealthStatus::Unwell);
        assert!(s.recovery.played);

        let out = s.apply_action(ActionKind::Feed, &t());
        assert_eq!(s.status, HealthStatus::Healthy);
        assert!(out.status_change.unwrap().is_promotion());
        // Promotion keeps the vitals and clears the checklist
        assert_eq!(s.hunger, 65.0);
        assert_eq!(s.happiness, 65.0);
        assert_eq!(s.recovery, RecoveryFlags::default());
    }

    #[test]
    fn test_sick_needs_all_five() {
        let mut s = state(28.0, 28.0, HealthStatus::Sick);
        s.recovery = RecoveryFlags {
            fed: true,
            played: true,
            petted: true,
            brushed: true,
            given_toy: false,
        };
        // Vitals would allow Unwell but the toy is missing
        s.hunger = 40.0;
        assert_eq!(s.recompute_status(&t()), None);
        assert_eq!(s.status, HealthStatus::Sick);

        let out = s.apply_action(ActionKind::Toy, &t());
        assert_eq!(out.status_change.unwrap().to, HealthStatus::Unwell);
        assert_eq!(s.hunger, 40.0);
        assert_eq!(s.happiness, 33.0);
    }

    #[test]
    fn test_checklist_alone_does_not_promote() {
        let mut s = state(10.0, 10.0, HealthStatus::Sick);
        s.recovery = RecoveryFlags {
            fed: true,
            played: true,
            petted: true,
            brushed: true,
            given_toy: true,
        };
        assert_eq!(s.check_recovery(&t()), None);
        assert_eq!(s.status, HealthStatus::Sick);
        assert_eq!(s.hunger, 10.0);
    }

    #[test]
    fn test_required_actions() {
        let mut flags = RecoveryFlags::default();
        assert!(required_actions(HealthStatus::Healthy, &flags).is_empty());
        assert_eq!(
            required_actions(HealthStatus::Unwell, &flags),
            vec![ActionKind::Feed, ActionKind::Fetch]
        );
        flags.fed = true;
        flags.petted = true;
        assert_eq!(
            required_actions(HealthStatus::Sick, &flags),
            vec![ActionKind::Fetch, ActionKind::Brush, ActionKind::Toy]
        );
    }

    #[test]
    fn test_treat_marks_nothing() {
        let mut flags = RecoveryFlags::default();
        flags.mark(ActionKind::Treat);
        assert_eq!(flags, RecoveryFlags::default());
    }

    #[test]
    fn test_clamp_vital() {
        assert_eq!(clamp_vital(150.0), 100.0);
        assert_eq!(clamp_vital(-3.0), 0.0);
        assert_eq!(clamp_vital(f32::NAN), 100.0);
        assert_eq!(clamp_vital(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_spend_happiness_floors_and_recomputes() {
        let mut s = state(60.0, 70.0, HealthStatus::Healthy);
        let change = s.spend_happiness(200.0, &t());
        assert_eq!(s.happiness, 0.0);
        assert_eq!(change.unwrap().to, s.status);
        assert_ne!(s.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_reset_is_exact() {
        let mut s = state(3.0, 4.0, HealthStatus::Sick);
        s.recovery.fed = true;
        s.reset(1234);
        assert_eq!(s, HealthState::fresh(1234));
        assert_eq!(s.hunger, 100.0);
        assert_eq!(s.happiness, 100.0);
        assert_eq!(s.status, HealthStatus::Healthy);
        assert_eq!(s.recovery, RecoveryFlags::default());
    }

    #[test]
    fn test_random_action_sequences_hold_invariants() {
        let th = t();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let status = [HealthStatus::Healthy, HealthStatus::Unwell, HealthStatus::Sick]
                [rng.gen_range(0..3)];
            let mut s = state(rng.gen_range(0.0..=100.0), rng.gen_range(0.0..=100.0), status);
            s.recompute_status(&th);
            for _ in 0..40 {
                let before_status = s.status;
                let before_flags = s.recovery;
                let action = ActionKind::ALL[rng.gen_range(0..ActionKind::ALL.len())];

                let mut flags_after_action = before_flags;
                flags_after_action.mark(action);
                s.apply_action(action, &th);

                assert!((0.0..=100.0).contains(&s.hunger));
                assert!((0.0..=100.0).contains(&s.happiness));
                let expected =
                    next_status(before_status, s.percentage(&th), &flags_after_action, &th);
                assert_eq!(s.status, expected);
                if s.status != before_status {
                    assert_eq!(s.recovery, RecoveryFlags::default());
                }
            }
        }
    }

    #[test]
    fn test_legacy_status_names() {
        assert_eq!(HealthStatus::from_wire("depleted"), Some(HealthStatus::Unwell));
        assert_eq!(HealthStatus::from_wire("sick"), Some(HealthStatus::Sick));
        assert_eq!(HealthStatus::from_wire("zombie"), None);
    }

    #[test]
    fn test_color_band() {
        assert_eq!(ColorBand::from_percentage(70.0), ColorBand::Green);
        assert_eq!(ColorBand::from_percentage(69.0), ColorBand::Orange);
        assert_eq!(ColorBand::from_percentage(39.0), ColorBand::Red);
    }
}
