//! Persistence Gateway
//!
//! JSON load/save of whole store snapshots over a `KeyValueStore`.
//! Storage problems never reach the caller: loads fall back to the
//! type's empty default and failed saves are logged and dropped.

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::KeyValueStore;

/// Key holding the JSON array of items
pub const ITEMS_KEY: &str = "materialItems";
/// Key holding the JSON object of catalog categories
pub const CATALOG_KEY: &str = "materialsCatalog";

pub struct PersistenceGateway {
    store: Box<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Parsed value under `key`, or `T::default()` if missing or unreadable
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!("Data loaded from storage: {}", key);
                    value
                }
                Err(e) => {
                    error!("Error parsing {} from storage: {}", key, e);
                    T::default()
                }
            },
            Ok(None) => {
                debug!("No saved data for {}", key);
                T::default()
            }
            Err(e) => {
                error!("Error loading {} from storage: {}", key, e);
                T::default()
            }
        }
    }

    /// Encode and write `value`. Returns whether the write went through.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                error!("Error encoding {}: {}", key, e);
                return false;
            }
        };

        match self.store.set(key, &json) {
            Ok(()) => {
                debug!("Data saved to storage: {} ({} bytes)", key, json.len());
                true
            }
            Err(e) => {
                error!("Error saving {} to storage: {}", key, e);
                false
            }
        }
    }

    /// Raw stored text, for diagnostics and export
    pub fn raw(&self, key: &str) -> Option<String> {
        self.store.get(key).ok().flatten()
    }
}
