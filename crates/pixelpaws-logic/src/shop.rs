//! Accessory shop catalog and purchase rules.
//!
//! The shop's currency is happiness: buying an accessory spends the
//! pet's happiness, and the shop is closed entirely while the pet is
//! too unhappy to go shopping.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ShopConfig;

/// Where an accessory sits on the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessoryKind {
    Collar,
    Bandana,
    Crown,
}

/// A purchasable accessory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    /// Price in happiness points.
    pub cost: f32,
    pub kind: AccessoryKind,
}

pub const CATALOG: [ShopItem; 3] = [
    ShopItem {
        id: "red-collar",
        name: "Red Collar",
        cost: 15.0,
        kind: AccessoryKind::Collar,
    },
    ShopItem {
        id: "blue-bandana",
        name: "Blue Bandana",
        cost: 15.0,
        kind: AccessoryKind::Bandana,
    },
    ShopItem {
        id: "crown",
        name: "Royal Crown",
        cost: 35.0,
        kind: AccessoryKind::Crown,
    },
];

pub fn find_item(id: &str) -> Option<&'static ShopItem> {
    CATALOG.iter().find(|item| item.id == id)
}

/// Whether the shop is open at the given happiness.
pub fn is_open(happiness: f32, cfg: &ShopConfig) -> bool {
    happiness >= cfg.min_happiness_to_open
}

/// Why a purchase was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PurchaseRejection {
    #[error("no such item '{0}'")]
    UnknownItem(String),
    #[error("you already own the {0}")]
    AlreadyOwned(&'static str),
    #[error("the shop is closed until happiness reaches {required:.0}% (currently {happiness:.0}%)")]
    ShopClosed { happiness: f32, required: f32 },
    #[error("not enough happiness: need {cost:.0}% but only have {happiness:.0}%")]
    InsufficientHappiness { cost: f32, happiness: f32 },
}

/// Validate a purchase against the catalog, ownership, and happiness.
pub fn check_purchase(
    id: &str,
    happiness: f32,
    owned: &[String],
    cfg: &ShopConfig,
) -> Result<&'static ShopItem, PurchaseRejection> {
    let item = find_item(id).ok_or_else(|| PurchaseRejection::UnknownItem(id.to_string()))?;
    if owned.iter().any(|o| o == item.id) {
        return Err(PurchaseRejection::AlreadyOwned(item.name));
    }
    if !is_open(happiness, cfg) {
        return Err(PurchaseRejection::ShopClosed {
            happiness,
            required: cfg.min_happiness_to_open,
        });
    }
    if happiness < item.cost {
        return Err(PurchaseRejection::InsufficientHappiness {
            cost: item.cost,
            happiness,
        });
    }
    Ok(item)
}
