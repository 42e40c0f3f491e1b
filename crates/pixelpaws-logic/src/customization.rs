//! Pet appearance: colour, four body features, and a name.
//!
//! Every feature has a fixed option list. The owner steps through a list
//! with left/right arrows, wrapping at both ends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_NAME: &str = "Pixel";

/// Colour options with their display colours.
pub const COLORS: [(&str, &str); 5] = [
    ("gray", "#C0C0C0"),
    ("orange", "#FF8C00"),
    ("brown", "#8B4513"),
    ("black", "#2C2C2C"),
    ("white", "#FFFFFF"),
];

const COLOR_OPTIONS: [&str; 5] = ["gray", "orange", "brown", "black", "white"];
const EAR_OPTIONS: [&str; 3] = ["triangles", "round", "floppy"];
const FACE_OPTIONS: [&str; 2] = ["default", "dog"];
const EYE_OPTIONS: [&str; 3] = ["default", "cat", "cutesy"];
const TAIL_OPTIONS: [&str; 3] = ["default", "none", "bushy"];

/// A cyclable appearance feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Color,
    Ears,
    Face,
    Eyes,
    Tail,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown feature '{0}' (expected one of color, ears, face, eyes, tail)")]
pub struct UnknownFeature(pub String);

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Color,
        Feature::Ears,
        Feature::Face,
        Feature::Eyes,
        Feature::Tail,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Color => "color",
            Feature::Ears => "ears",
            Feature::Face => "face",
            Feature::Eyes => "eyes",
            Feature::Tail => "tail",
        }
    }

    /// Options in arrow order. The first one is the default.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Feature::Color => &COLOR_OPTIONS,
            Feature::Ears => &EAR_OPTIONS,
            Feature::Face => &FACE_OPTIONS,
            Feature::Eyes => &EYE_OPTIONS,
            Feature::Tail => &TAIL_OPTIONS,
        }
    }

    pub fn default_option(self) -> &'static str {
        self.options()[0]
    }

    pub fn is_option(self, value: &str) -> bool {
        self.options().contains(&value)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" | "colour" => Ok(Feature::Color),
            "ears" | "ear" => Ok(Feature::Ears),
            "face" => Ok(Feature::Face),
            "eyes" | "eye" => Ok(Feature::Eyes),
            "tail" => Ok(Feature::Tail),
            _ => Err(UnknownFeature(s.to_string())),
        }
    }
}

/// Persisted appearance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customization {
    pub color: String,
    pub ears: String,
    pub face: String,
    pub eyes: String,
    pub tail: String,
    pub name: String,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            color: Feature::Color.default_option().to_string(),
            ears: Feature::Ears.default_option().to_string(),
            face: Feature::Face.default_option().to_string(),
            eyes: Feature::Eyes.default_option().to_string(),
            tail: Feature::Tail.default_option().to_string(),
            name: DEFAULT_NAME.to_string(),
        }
    }
}

/// Partial appearance from an imported file. Absent fields keep the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomizationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ears: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&Customization> for CustomizationPatch {
    fn from(c: &Customization) -> Self {
        Self {
            color: Some(c.color.clone()),
            ears: Some(c.ears.clone()),
            face: Some(c.face.clone()),
            eyes: Some(c.eyes.clone()),
            tail: Some(c.tail.clone()),
            name: Some(c.name.clone()),
        }
    }
}

impl Customization {
    pub fn get(&self, feature: Feature) -> &str {
        match feature {
            Feature::Color => &self.color,
            Feature::Ears => &self.ears,
            Feature::Face => &self.face,
            Feature::Eyes => &self.eyes,
            Feature::Tail => &self.tail,
        }
    }

    fn slot(&mut self, feature: Feature) -> &mut String {
        match feature {
            Feature::Color => &mut self.color,
            Feature::Ears => &mut self.ears,
            Feature::Face => &mut self.face,
            Feature::Eyes => &mut self.eyes,
            Feature::Tail => &mut self.tail,
        }
    }

    /// Step `feature` one option forward (`forward = true`) or back,
    /// wrapping at either end. Returns the new value.
    ///
    /// A value not in the list counts as sitting just before the first
    /// option.
    pub fn cycle(&mut self, feature: Feature, forward: bool) -> &'static str {
        let options = feature.options();
        let len = options.len();
        let next = match options.iter().position(|o| *o == self.get(feature)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        *self.slot(feature) = options[next].to_string();
        options[next]
    }

    /// Rename the pet. A blank name falls back to the default.
    pub fn set_name(&mut self, name: &str) {
        let name = name.trim();
        self.name = if name.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            name.to_string()
        };
    }

    /// Display colour for the current `color`.
    pub fn color_hex(&self) -> &'static str {
        COLORS
            .iter()
            .find(|(key, _)| *key == self.color)
            .map_or(COLORS[0].1, |&(_, hex)| hex)
    }

    /// Merge an imported patch. Unknown option values are ignored.
    pub fn apply(&mut self, patch: CustomizationPatch) {
        let fields = [
            (Feature::Color, patch.color),
            (Feature::Ears, patch.ears),
            (Feature::Face, patch.face),
            (Feature::Eyes, patch.eyes),
            (Feature::Tail, patch.tail),
        ];
        for (feature, value) in fields {
            if let Some(value) = value.filter(|v| feature.is_option(v)) {
                *self.slot(feature) = value;
            }
        }
        if let Some(name) = patch.name {
            self.set_name(&name);
        }
    }

    /// Replace anything a saved record shouldn't contain with defaults.
    pub fn sanitize(&mut self) {
        for feature in Feature::ALL {
            if !feature.is_option(self.get(feature)) {
                *self.slot(feature) = feature.default_option().to_string();
            }
        }
        let name = self.name.clone();
        self.set_name(&name);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
