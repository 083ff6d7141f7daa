//! eframe persistence as a key-value store
//!
//! eframe only hands out its storage at creation (read) and in
//! `App::save` (write), so values are buffered here in between.

use crate::storage::KeyValueStore;
use crate::Result;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct EframeStore {
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl EframeStore {
    /// Seed `keys` from the storage eframe restored, if any.
    pub fn restore(storage: Option<&dyn eframe::Storage>, keys: &[&str]) -> Self {
        let mut entries = BTreeMap::new();
        if let Some(storage) = storage {
            for key in keys {
                if let Some(value) = storage.get_string(key) {
                    entries.insert(key.to_string(), value);
                }
            }
        }
        Self {
            entries,
            dirty: false,
        }
    }

    /// Copy pending changes into eframe's storage.
    pub fn save_into(&mut self, storage: &mut dyn eframe::Storage) {
        if !self.dirty {
            return;
        }
        for (key, value) in &self.entries {
            storage.set_string(key, value.clone());
        }
        self.dirty = false;
    }
}

impl KeyValueStore for EframeStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        Ok(())
    }
}
