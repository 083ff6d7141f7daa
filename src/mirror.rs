//! A single string value kept in sync with a key-value store entry

use crate::storage::KeyValueStore;
use tracing::warn;

/// Restores a value from `store` on construction and writes every change back
/// under the same key. An empty stored value counts as absent.
///
/// Storage errors never reach the caller: a failed read yields the initial
/// value, a failed write is logged and skipped.
pub struct PersistentMirror<S: KeyValueStore> {
    store: S,
    key: String,
    value: String,
}

impl<S: KeyValueStore> PersistentMirror<S> {
    pub fn new(store: S, key: impl Into<String>, initial: impl Into<String>) -> Self {
        let key = key.into();
        let value = match store.get(&key) {
            Ok(Some(stored)) if !stored.is_empty() => stored,
            Ok(_) => initial.into(),
            Err(e) => {
                warn!(key = %key, error = %e, "could not restore value, using initial");
                initial.into()
            }
        };

        Self { store, key, value }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and write it back. Unchanged values skip the write.
    pub fn set(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value == self.value {
            return;
        }
        self.value = value;
        self.persist();
    }

    /// Edit the value in place, then write it back.
    pub fn update(&mut self, edit: impl FnOnce(&mut String)) {
        let before = self.value.clone();
        edit(&mut self.value);
        if self.value != before {
            self.persist();
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.set(&self.key, &self.value) {
            warn!(key = %self.key, error = %e, "could not persist value");
        }
    }
}
