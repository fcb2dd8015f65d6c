//! Key-value persistence for the high score
//!
//! The game only needs integer reads and writes under fixed keys. Failures are
//! logged by the backends and never reach the game.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStore;

use std::collections::HashMap;

/// Integer settings store
pub trait KeyValueStore {
    /// Value stored under `key`, or `default` when absent or unreadable
    fn get_int(&self, key: &str, default: i64) -> i64;
    fn put_int(&mut self, key: &str, value: i64);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        (**self).get_int(key, default)
    }

    fn put_int(&mut self, key: &str, value: i64) {
        (**self).put_int(key, value)
    }
}

/// Non-persistent store (tests, native runs without `--store`)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }
}

type Listener = Box<dyn FnMut(i64)>;

/// Store wrapper that notifies subscribers whenever a key is written
pub struct Observable<S> {
    inner: S,
    listeners: Vec<(String, Listener)>,
}

impl<S: KeyValueStore> Observable<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            listeners: Vec::new(),
        }
    }

    /// Call `listener` with every new value written under `key`
    pub fn subscribe(&mut self, key: &str, listener: impl FnMut(i64) + 'static) {
        self.listeners.push((key.to_string(), Box::new(listener)));
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: KeyValueStore> KeyValueStore for Observable<S> {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.inner.get_int(key, default)
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.inner.put_int(key, value);
        for (k, listener) in &mut self.listeners {
            if k == key {
                listener(value);
            }
        }
    }
}
