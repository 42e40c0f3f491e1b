//! Tuning knobs for decay, status thresholds, and the shop gate.
//!
//! Every struct here has a `Default` matching the shipped game balance and
//! deserializes with `#[serde(default)]`, so a partial config file only
//! overrides the fields it names.

use serde::{Deserialize, Serialize};

/// Top-level pet configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    pub decay: DecayConfig,
    pub status: StatusThresholds,
    pub shop: ShopConfig,
    /// Seconds between decay ticks while the pet is open.
    pub tick_interval_secs: u64,
    /// Fixed offset from UTC used to decide calendar days for the
    /// loyalty calendar. Positive is east of Greenwich.
    pub utc_offset_minutes: i32,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            decay: DecayConfig::default(),
            status: StatusThresholds::default(),
            shop: ShopConfig::default(),
            tick_interval_secs: 30,
            utc_offset_minutes: 0,
        }
    }
}

/// Time-based decay rates. Rates are vital points lost per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Rate applied for the first `first_tier_minutes` of inactivity.
    pub first_tier_rate: f32,
    pub first_tier_minutes: f32,
    /// Rate applied after the first tier is exhausted.
    pub trickle_rate: f32,
    /// Elapsed time below this is ignored and left to accumulate.
    pub grace_seconds: u32,
    /// After this long away both vitals are capped at `unwell_cap`.
    pub unwell_after_hours: f32,
    pub unwell_cap: f32,
    /// After this long away both vitals are capped at `sick_cap`.
    pub sick_after_hours: f32,
    pub sick_cap: f32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            first_tier_rate: 0.2,
            first_tier_minutes: 60.0,
            trickle_rate: 0.02,
            grace_seconds: 60,
            unwell_after_hours: 8.0,
            unwell_cap: 50.0,
            sick_after_hours: 24.0,
            sick_cap: 20.0,
        }
    }
}

/// Weighted-percentage rule and status tier thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// Percentage at or above which the pet is Healthy.
    pub healthy_min: f32,
    /// Percentage at or above which the pet is Unwell (below is Sick).
    pub unwell_min: f32,
    /// A vital below this is critically low.
    pub critical_vital: f32,
    /// Gap between the vitals that counts as "the other is comparatively high".
    pub imbalance_gap: f32,
    /// Weight given to the low vital when the emphasis rule applies.
    pub low_vital_weight: f32,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            healthy_min: 60.0,
            unwell_min: 30.0,
            critical_vital: 25.0,
            imbalance_gap: 40.0,
            low_vital_weight: 0.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// The shop only opens while happiness is at least this high.
    pub min_happiness_to_open: f32,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            min_happiness_to_open: 50.0,
        }
    }
}
