//! Browser LocalStorage store

use super::KeyValueStore;

pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - high score will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(key).ok().flatten())
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn put_int(&mut self, key: &str, value: i64) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, &value.to_string()).is_err() {
                log::warn!("Failed to write {key} to LocalStorage");
            }
        }
    }
}
