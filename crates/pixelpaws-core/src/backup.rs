//! Export/import file format.
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "exportDate": "2024-03-10T23:30:00+00:00",
//!   "customization": { "color": "gray", "ears": "triangles", "face": "default",
//!                      "eyes": "default", "tail": "default", "name": "Pixel" },
//!   "ownedItems": ["crown"],
//!   "equippedItems": ["crown"],
//!   "health": { "hunger": 80.0, "happiness": 65.5, "status": "healthy" }
//! }
//! ```

use pixelpaws_logic::constants::VITAL_MAX;
use pixelpaws_logic::customization::CustomizationPatch;
use pixelpaws_logic::health::HealthStatus;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{PetError, PetResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetExport {
    pub version: String,
    #[serde(default)]
    pub export_date: String,
    pub customization: CustomizationPatch,
    #[serde(default)]
    pub owned_items: Vec<String>,
    #[serde(default)]
    pub equipped_items: Vec<String>,
    #[serde(default)]
    pub health: Option<ExportedHealth>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedHealth {
    /// Missing or non-numeric vitals import as full.
    #[serde(default = "full_vital", deserialize_with = "lenient_vital")]
    pub hunger: f32,
    #[serde(default = "full_vital", deserialize_with = "lenient_vital")]
    pub happiness: f32,
    /// Informational; importing recomputes status from the vitals.
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<HealthStatus>,
}

fn full_vital() -> f32 {
    VITAL_MAX
}

fn lenient_vital<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().map_or(VITAL_MAX, |v| v as f32))
}

fn lenient_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<HealthStatus>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(HealthStatus::from_wire))
}

/// Parse an export document. Anything without a string `version` and a
/// `customization` object is rejected before the rest is looked at.
pub fn parse_export(raw: &str) -> PetResult<PetExport> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| PetError::InvalidImport(e.to_string()))?;
    if value.get("version").and_then(Value::as_str).is_none() {
        return Err(PetError::InvalidImport("missing version".into()));
    }
    if !value.get("customization").is_some_and(Value::is_object) {
        return Err(PetError::InvalidImport("missing customization".into()));
    }
    serde_json::from_value(value).map_err(|e| PetError::InvalidImport(e.to_string()))
}
