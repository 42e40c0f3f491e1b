//! Persisted pet appearance.

use pixelpaws_logic::constants::storage_keys;
use pixelpaws_logic::customization::{Customization, CustomizationPatch, Feature};

use crate::notice::Notices;
use crate::store::{read_json, write_json, KeyValueStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appearance {
    look: Customization,
}

impl Appearance {
    /// Load the saved look. Missing fields and unknown options fall back to
    /// the defaults; an unreadable record starts over.
    pub fn load(store: &dyn KeyValueStore, notices: &mut Notices) -> Self {
        match read_json::<Customization>(store, storage_keys::CUSTOMIZATION) {
            Ok(Some(mut look)) => {
                look.sanitize();
                Self { look }
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Could not load customization: {}", e);
                notices.warn("Your pet's look couldn't be read, so it's back to the default.");
                Self::default()
            }
        }
    }

    pub fn look(&self) -> &Customization {
        &self.look
    }

    pub fn name(&self) -> &str {
        &self.look.name
    }

    pub fn cycle(&mut self, feature: Feature, forward: bool) -> &'static str {
        let value = self.look.cycle(feature, forward);
        log::debug!("{} -> {}", feature, value);
        value
    }

    pub fn rename(&mut self, name: &str) {
        self.look.set_name(name);
    }

    pub fn apply(&mut self, patch: CustomizationPatch) {
        self.look.apply(patch);
    }

    pub fn reset(&mut self) {
        self.look.reset();
    }

    pub fn persist(&self, store: &mut dyn KeyValueStore, notices: &mut Notices) {
        if let Err(e) = write_json(store, storage_keys::CUSTOMIZATION, &self.look) {
            log::warn!("Could not save customization: {}", e);
            notices.warn("Couldn't save your pet's look.");
        }
    }
}
