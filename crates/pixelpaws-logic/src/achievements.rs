//! Achievement definitions and eligibility.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first-purchase")]
    FirstPurchase,
    #[serde(rename = "first-play")]
    FirstPlay,
    #[serde(rename = "returning")]
    Returning,
}

/// What the achievement checks look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementFacts {
    pub owned_items: usize,
    pub has_played: bool,
    pub has_returned: bool,
}

impl AchievementId {
    pub const ALL: [AchievementId; 3] = [
        AchievementId::FirstPurchase,
        AchievementId::FirstPlay,
        AchievementId::Returning,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AchievementId::FirstPurchase => "first-purchase",
            AchievementId::FirstPlay => "first-play",
            AchievementId::Returning => "returning",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            AchievementId::FirstPurchase => "First Purchase",
            AchievementId::FirstPlay => "First Play",
            AchievementId::Returning => "Returning Visitor",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AchievementId::FirstPurchase => "Buy your first accessory from the shop",
            AchievementId::FirstPlay => "Interact with your pet",
            AchievementId::Returning => "Visit on day 2 of the loyalty program",
        }
    }

    pub fn is_earned(self, facts: &AchievementFacts) -> bool {
        match self {
            AchievementId::FirstPurchase => facts.owned_items > 0,
            AchievementId::FirstPlay => facts.has_played,
            AchievementId::Returning => facts.has_returned,
        }
    }
}

/// Achievements earned by `facts` that `is_unlocked` doesn't know about yet.
pub fn newly_earned(
    facts: &AchievementFacts,
    is_unlocked: impl Fn(AchievementId) -> bool,
) -> Vec<AchievementId> {
    AchievementId::ALL
        .into_iter()
        .filter(|&id| !is_unlocked(id) && id.is_earned(facts))
        .collect()
}
