//! SQLite-backed settings store
//!
//! Values are cached in memory and read synchronously. Writes go through a
//! single writer task on the app's tokio runtime, so writes to the same key
//! land in submission order. Each key counts its outstanding writes; it is
//! "updating" while that count is non-zero.

use super::{lock, SettingsStore, StoreError};
use crate::db::Database;
use eframe::egui;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Default)]
struct StoreState {
    values: HashMap<String, Value>,
    in_flight: HashMap<String, usize>,
    repaint: Option<egui::Context>,
}

struct WriteRequest {
    key: String,
    value: Value,
}

pub struct SqliteSettingsStore {
    state: Arc<Mutex<StoreState>>,
    writes: mpsc::UnboundedSender<WriteRequest>,
}

impl SqliteSettingsStore {
    /// Load every stored setting into the cache and start the writer task.
    pub fn open(db: Database, runtime: &Handle) -> Result<Self, StoreError> {
        let mut values = HashMap::new();
        for (key, raw) in db.all_settings()? {
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => {
                    values.insert(key, value);
                }
                Err(e) => warn!(key = %key, error = %e, "Skipping unreadable setting"),
            }
        }
        info!(count = values.len(), "Settings loaded");

        let state = Arc::new(Mutex::new(StoreState {
            values,
            ..Default::default()
        }));
        let (tx, rx) = mpsc::unbounded_channel();
        runtime.spawn(run_writer(Arc::new(Mutex::new(db)), state.clone(), rx));

        Ok(Self { state, writes: tx })
    }

    /// Repaint `ctx` whenever a write resolves so disabled controls come back
    pub fn set_repaint_context(&self, ctx: &egui::Context) {
        lock(&self.state).repaint = Some(ctx.clone());
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        lock(&self.state).values.get(key).cloned()
    }

    fn update(&self, key: &str, value: Value) {
        *lock(&self.state)
            .in_flight
            .entry(key.to_owned())
            .or_insert(0) += 1;

        let request = WriteRequest {
            key: key.to_owned(),
            value,
        };
        if self.writes.send(request).is_err() {
            warn!(key, "Settings writer has stopped, dropping update");
            finish_write(&self.state, key);
        }
    }

    fn is_updating(&self, key: &str) -> bool {
        lock(&self.state).in_flight.contains_key(key)
    }
}

async fn run_writer(
    db: Arc<Mutex<Database>>,
    state: Arc<Mutex<StoreState>>,
    mut rx: mpsc::UnboundedReceiver<WriteRequest>,
) {
    while let Some(WriteRequest { key, value }) = rx.recv().await {
        let db = db.clone();
        let state = state.clone();
        let joined = tokio::task::spawn_blocking(move || {
            match persist(&db, &key, &value) {
                Ok(()) => {
                    debug!(key = %key, "Setting saved");
                    lock(&state).values.insert(key.clone(), value);
                }
                Err(e) => warn!(key = %key, error = %e, "Failed to save setting"),
            }
            finish_write(&state, &key);
        })
        .await;

        if let Err(e) = joined {
            warn!(error = %e, "Settings write task failed");
        }
    }
    debug!("Settings writer stopped");
}

fn persist(db: &Mutex<Database>, key: &str, value: &Value) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    lock(db).set_setting(key, &raw)?;
    Ok(())
}

fn finish_write(state: &Mutex<StoreState>, key: &str) {
    let mut state = lock(state);
    if let Some(count) = state.in_flight.get_mut(key) {
        *count -= 1;
        if *count == 0 {
            state.in_flight.remove(key);
        }
    }
    if let Some(ctx) = &state.repaint {
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SettingsStoreExt;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn wait_idle(store: &SqliteSettingsStore, key: &str) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while store.is_updating(key) {
            assert!(Instant::now() < deadline, "write for {key} never resolved");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test_log::test]
    fn update_resolves_and_persists() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");

        let store = SqliteSettingsStore::open(Database::open(&path).unwrap(), runtime.handle())
            .unwrap();
        assert_eq!(store.get("symbol_mappings"), None);

        let list = json!([{ "phrase": "arrow", "symbol": "→" }]);
        store.update("symbol_mappings", list.clone());
        wait_idle(&store, "symbol_mappings");
        assert_eq!(store.get("symbol_mappings"), Some(list.clone()));
        drop(store);

        let reopened =
            SqliteSettingsStore::open(Database::open(&path).unwrap(), runtime.handle()).unwrap();
        assert_eq!(reopened.get("symbol_mappings"), Some(list));
    }

    #[test_log::test]
    fn writes_to_one_key_apply_in_order() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("settings.db")).unwrap();
        let store = SqliteSettingsStore::open(db, runtime.handle()).unwrap();

        for n in 0..20 {
            store.update_as("counter", &n).unwrap();
        }
        wait_idle(&store, "counter");
        assert_eq!(store.get_as::<i32>("counter"), Some(19));
        assert!(!store.is_updating("other"));
    }

    #[test_log::test]
    fn unreadable_rows_are_skipped() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");
        {
            let db = Database::open(&path).unwrap();
            db.set_setting("broken", "{not json").unwrap();
            db.set_setting("fine", "true").unwrap();
        }

        let store =
            SqliteSettingsStore::open(Database::open(&path).unwrap(), runtime.handle()).unwrap();
        assert_eq!(store.get("broken"), None);
        assert_eq!(store.get_as::<bool>("fine"), Some(true));
    }
}
