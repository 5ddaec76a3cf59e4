//! In-memory store with controllable write completion

use super::SettingsStore;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Writes resolve immediately unless the store is built with
/// [`MemorySettingsStore::deferred`]; then they wait for [`resolve`].
///
/// [`resolve`]: MemorySettingsStore::resolve
#[derive(Default)]
pub struct MemorySettingsStore {
    values: RefCell<HashMap<String, Value>>,
    pending: RefCell<Vec<(String, Value)>>,
    deferred: bool,
    writes: Cell<usize>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deferred() -> Self {
        Self {
            deferred: true,
            ..Self::default()
        }
    }

    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.values.borrow_mut().insert(key.to_owned(), value);
        self
    }

    /// Number of `update` calls seen so far
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Apply every pending write in submission order
    pub fn resolve(&self) {
        let pending: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        let mut values = self.values.borrow_mut();
        for (key, value) in pending {
            values.insert(key, value);
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    fn update(&self, key: &str, value: Value) {
        self.writes.set(self.writes.get() + 1);
        if self.deferred {
            self.pending.borrow_mut().push((key.to_owned(), value));
        } else {
            self.values.borrow_mut().insert(key.to_owned(), value);
        }
    }

    fn is_updating(&self, key: &str) -> bool {
        self.pending.borrow().iter().any(|(k, _)| k == key)
    }
}
