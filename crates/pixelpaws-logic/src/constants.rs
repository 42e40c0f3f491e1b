//! Storage keys and other shared constants.
//!
//! The key names match what the browser build wrote to localStorage, so a
//! store exported from there can be read back unchanged.

pub mod storage_keys {
    /// Health blob: vitals, status, decay watermarks, recovery flags.
    pub const HEALTH: &str = "petHealthData";
    /// JSON array of purchased item ids.
    pub const OWNED_ITEMS: &str = "petOwnedItems";
    /// JSON array of equipped item ids.
    pub const EQUIPPED_ITEMS: &str = "petEquippedItems";
    /// JSON object of achievement id -> unlock record.
    pub const ACHIEVEMENTS: &str = "petAchievements";
    /// `"true"` once any care action has been performed.
    pub const HAS_PLAYED: &str = "petHasPlayedWithPet";
    /// `"true"` once the owner visited on loyalty day 2.
    pub const HAS_RETURNED: &str = "petHasReturned";
    /// Loyalty calendar and active theme.
    pub const THEME_DATA: &str = "petThemeData";
    /// Appearance: colour, features, and name.
    pub const CUSTOMIZATION: &str = "petCustomization";

    /// Every key owned by the pet, for full resets.
    pub const ALL: [&str; 8] = [
        HEALTH,
        OWNED_ITEMS,
        EQUIPPED_ITEMS,
        ACHIEVEMENTS,
        HAS_PLAYED,
        HAS_RETURNED,
        THEME_DATA,
        CUSTOMIZATION,
    ];
}

/// Lower bound of a vital.
pub const VITAL_MIN: f32 = 0.0;
/// Upper bound of a vital.
pub const VITAL_MAX: f32 = 100.0;

/// Format version written into exported pet data.
pub const EXPORT_VERSION: &str = "1.0";

pub const MS_PER_MINUTE: i64 = 60 * 1000;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
