//! Settings store: the key-value source of truth the UI reads from and
//! submits whole-value replacements to.

#[cfg(test)]
pub mod memory;
mod sqlite;

pub use sqlite::SqliteSettingsStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Read accessor, mutation request and per-key in-flight flag.
///
/// `update` only requests persistence. The new value becomes visible through
/// `get` once the write resolves, and `is_updating` reports true until then.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn update(&self, key: &str, value: Value);
    fn is_updating(&self, key: &str) -> bool;
}

/// Typed access on top of the raw JSON contract
pub trait SettingsStoreExt: SettingsStore {
    /// Current value decoded as `T`; undecodable values read as absent
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "Stored setting has unexpected shape, ignoring");
                None
            }
        }
    }

    fn update_as<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;
        self.update(key, value);
        Ok(())
    }
}

impl<S: SettingsStore + ?Sized> SettingsStoreExt for S {}

/// Lock that survives a panicked writer; the guarded maps stay consistent
/// between statements.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
