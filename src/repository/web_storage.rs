//! Browser `localStorage` backend (wasm builds with the `web` feature).

use super::traits::KeyValueStore;
use crate::domain::{DomainError, DomainResult};

pub struct WebStorage {
    storage: web_sys::Storage,
}

impl WebStorage {
    /// The page's `window.localStorage`
    pub fn local() -> DomainResult<Self> {
        let window = web_sys::window().ok_or_else(|| DomainError::persistence("No window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| DomainError::persistence(format!("localStorage unavailable: {:?}", e)))?
            .ok_or_else(|| DomainError::persistence("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| DomainError::persistence(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        // QuotaExceededError surfaces here
        self.storage
            .set_item(key, value)
            .map_err(|e| DomainError::persistence(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> DomainResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| DomainError::persistence(format!("{:?}", e)))
    }
}
