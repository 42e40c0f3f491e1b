//! Owned and equipped accessories.

use pixelpaws_logic::constants::storage_keys;
use pixelpaws_logic::shop::find_item;

use crate::error::{PetError, PetResult};
use crate::notice::Notices;
use crate::store::{read_json, write_json, KeyValueStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    owned: Vec<String>,
    equipped: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load both lists. Unknown ids and duplicates are dropped, and only
    /// owned items can stay equipped.
    pub fn load(store: &dyn KeyValueStore, notices: &mut Notices) -> Self {
        let owned = load_list(store, storage_keys::OWNED_ITEMS, notices);
        let equipped = load_list(store, storage_keys::EQUIPPED_ITEMS, notices);
        Self::from_lists(owned, equipped)
    }

    pub fn from_lists(owned: Vec<String>, equipped: Vec<String>) -> Self {
        let mut inv = Self::new();
        for id in owned {
            if find_item(&id).is_some() {
                inv.add(&id);
            } else {
                log::debug!("Dropping unknown owned item '{}'", id);
            }
        }
        for id in equipped {
            if inv.owns(&id) && !inv.is_equipped(&id) {
                inv.equipped.push(id);
            }
        }
        inv
    }

    pub fn owned(&self) -> &[String] {
        &self.owned
    }

    pub fn equipped(&self) -> &[String] {
        &self.equipped
    }

    pub fn owns(&self, id: &str) -> bool {
        self.owned.iter().any(|o| o == id)
    }

    pub fn is_equipped(&self, id: &str) -> bool {
        self.equipped.iter().any(|e| e == id)
    }

    pub fn add(&mut self, id: &str) {
        if !self.owns(id) {
            self.owned.push(id.to_string());
        }
    }

    /// Add a purchased item and wear it straight away.
    pub fn add_and_equip(&mut self, id: &str) {
        self.add(id);
        if !self.is_equipped(id) {
            self.equipped.push(id.to_string());
        }
    }

    /// Flip an owned item between worn and not worn. Returns whether it is
    /// now equipped.
    pub fn toggle_equip(&mut self, id: &str) -> PetResult<bool> {
        if !self.owns(id) {
            return Err(PetError::NotOwned(id.to_string()));
        }
        if let Some(pos) = self.equipped.iter().position(|e| e == id) {
            self.equipped.remove(pos);
            Ok(false)
        } else {
            self.equipped.push(id.to_string());
            Ok(true)
        }
    }

    pub fn clear(&mut self) {
        self.owned.clear();
        self.equipped.clear();
    }

    pub fn persist(&self, store: &mut dyn KeyValueStore, notices: &mut Notices) {
        let result = write_json(store, storage_keys::OWNED_ITEMS, &self.owned)
            .and_then(|_| write_json(store, storage_keys::EQUIPPED_ITEMS, &self.equipped));
        if let Err(e) = result {
            log::warn!("Could not save inventory: {}", e);
            notices.warn("Couldn't save your accessories.");
        }
    }
}

fn load_list(store: &dyn KeyValueStore, key: &str, notices: &mut Notices) -> Vec<String> {
    match read_json::<Vec<String>>(store, key) {
        Ok(list) => list.unwrap_or_default(),
        Err(e) => {
            log::warn!("Could not load '{}': {}", key, e);
            notices.warn("Some saved accessories couldn't be read.");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_toggle_equip() {
        let mut inv = Inventory::new();
        inv.add("crown");
        assert!(inv.toggle_equip("crown").unwrap());
        assert!(inv.is_equipped("crown"));
        assert!(!inv.toggle_equip("crown").unwrap());
        assert!(inv.equipped().is_empty());
        assert!(matches!(
            inv.toggle_equip("red-collar"),
            Err(PetError::NotOwned(id)) if id == "red-collar"
        ));
    }

    #[test]
    fn test_load_sanitizes() {
        let mut store = MemoryStore::new();
        store.insert_raw(
            storage_keys::OWNED_ITEMS,
            r#"["crown","laser-eyes","crown","blue-bandana"]"#,
        );
        store.insert_raw(storage_keys::EQUIPPED_ITEMS, r#"["red-collar","crown"]"#);
        let mut notices = Notices::new();
        let inv = Inventory::load(&store, &mut notices);
        assert_eq!(inv.owned(), ["crown", "blue-bandana"]);
        assert_eq!(inv.equipped(), ["crown"]);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_malformed_list_is_empty() {
        let mut store = MemoryStore::new();
        store.insert_raw(storage_keys::OWNED_ITEMS, "{oops");
        let mut notices = Notices::new();
        let inv = Inventory::load(&store, &mut notices);
        assert!(inv.owned().is_empty());
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn test_persist_roundtrip() {
        let mut store = MemoryStore::new();
        let mut notices = Notices::new();
        let mut inv = Inventory::new();
        inv.add_and_equip("red-collar");
        inv.add("crown");
        inv.persist(&mut store, &mut notices);
        assert_eq!(Inventory::load(&store, &mut notices), inv);
    }
}
