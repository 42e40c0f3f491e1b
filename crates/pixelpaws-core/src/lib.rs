//! Stateful side of PixelPaws.
//!
//! Wraps the pure rules from `pixelpaws_logic` with persistence, a clock,
//! and owner-facing notices. Front ends construct a [`Pet`] over some
//! [`KeyValueStore`] and [`Clock`] and drive everything through it.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`achievement_book`] | Unlocked achievements and the play/return flags |
//! | [`appearance`] | Persisted colour, features, and name |
//! | [`backup`] | Export/import document format |
//! | [`calendar`] | Persisted loyalty calendar |
//! | [`clock`] | Time source, day index, local hour |
//! | [`config`] | Loading `PetConfig` from TOML |
//! | [`error`] | `StoreError` and `PetError` |
//! | [`inventory`] | Owned and equipped accessories |
//! | [`notice`] | Owner-facing notification queue |
//! | [`pet`] | Composition root |
//! | [`store`] | Key-value persistence (memory and file) |
//! | [`tracker`] | Health state load/save and updates |

pub mod achievement_book;
pub mod appearance;
pub mod backup;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod inventory;
pub mod notice;
pub mod pet;
pub mod store;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{PetError, PetResult, StoreError};
pub use pet::Pet;
pub use store::{FileStore, KeyValueStore, MemoryStore};
