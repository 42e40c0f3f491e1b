//! Pure pet-care logic for PixelPaws.
//!
//! This crate contains all game rules that are independent of storage,
//! wall-clock time, or rendering. Functions take plain data (timestamps
//! are passed in as epoch milliseconds, days as day indices) and return
//! results, so every rule is unit-testable in isolation.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`achievements`] | Achievement definitions and eligibility checks |
//! | [`actions`] | Care-action vocabulary and vital deltas |
//! | [`config`] | Tuning: decay rates, status thresholds, shop gate |
//! | [`customization`] | Appearance options, cycling, and the pet's name |
//! | [`constants`] | Storage keys, vital bounds, time units |
//! | [`decay`] | Tiered time-based decay and long-absence caps |
//! | [`health`] | Weighted percentage, status tiers, recovery gating |
//! | [`loyalty`] | Visit-day calendar and theme unlocks |
//! | [`mood`] | Weather, mood, and speech lines |
//! | [`report`] | Display values for a health panel |
//! | [`shop`] | Accessory catalog and purchase rules |

pub mod achievements;
pub mod actions;
pub mod config;
pub mod constants;
pub mod customization;
pub mod decay;
pub mod health;
pub mod loyalty;
pub mod mood;
pub mod report;
pub mod shop;
