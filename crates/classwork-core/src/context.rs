//! Construction configuration and the per-instance config store.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use classwork_protocols::stage::Settings;
use classwork_protocols::types::{Identity, Value};

/// Deferred config value, computed from the whole store on first read.
pub type LazyFn = Arc<dyn Fn(&ConfigStore) -> Value + Send + Sync>;

/// A single configuration entry.
#[derive(Clone)]
pub enum ConfigEntry {
    Value(Value),
    Lazy(LazyFn),
}

impl fmt::Debug for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigEntry::Value(v) => write!(f, "{:?}", v),
            ConfigEntry::Lazy(_) => f.write_str("<lazy>"),
        }
    }
}

/// Key/value configuration passed to an instantiation call.
///
/// The framework identity is kept apart from the caller's keys and is only
/// filled in by the instantiation service.
#[derive(Debug, Clone, Default)]
pub struct ConstructionConfig {
    entries: IndexMap<String, ConfigEntry>,
    identity: Option<Identity>,
}

impl ConstructionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style lazy insert.
    pub fn with_lazy<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ConfigStore) -> Value + Send + Sync + 'static,
    {
        self.entries.insert(key.into(), ConfigEntry::Lazy(Arc::new(f)));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries
            .insert(key.into(), ConfigEntry::Value(value.into()));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Framework identity, once attached.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub(crate) fn set_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    pub(crate) fn into_parts(self) -> (IndexMap<String, ConfigEntry>, Option<Identity>) {
        (self.entries, self.identity)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ConstructionConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (k, v) in iter {
            config.insert(k, v);
        }
        config
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for ConstructionConfig {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Per-instance configuration store.
///
/// Lazy entries are invoked once, with the whole store, on first read; the
/// result replaces the function. An entry holding `Value::null()` is set.
pub struct ConfigStore {
    data: RwLock<IndexMap<String, ConfigEntry>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(IndexMap::new()),
        }
    }

    pub(crate) fn from_entries(entries: IndexMap<String, ConfigEntry>) -> Self {
        Self {
            data: RwLock::new(entries),
        }
    }

    /// Read a value, resolving and memoizing lazy entries.
    pub fn get(&self, key: &str) -> Option<Value> {
        let lazy = {
            let data = self.data.read();
            match data.get(key)? {
                ConfigEntry::Value(v) => return Some(v.clone()),
                ConfigEntry::Lazy(f) => f.clone(),
            }
        };

        let value = lazy(self);
        let mut data = self.data.write();
        // A nested read may already have memoized this key
        if let Some(ConfigEntry::Value(existing)) = data.get(key) {
            return Some(existing.clone());
        }
        data.insert(key.to_string(), ConfigEntry::Value(value.clone()));
        Some(value)
    }

    /// Read a value; when unset, store `default` and return it.
    ///
    /// The first default wins: later calls with a different default return
    /// the persisted one.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        if let Some(v) = self.get(key) {
            return v;
        }
        let default = default.into();
        self.data
            .write()
            .entry(key.to_string())
            .or_insert_with(|| ConfigEntry::Value(default.clone()));
        self.get(key).unwrap_or(default)
    }

    /// Deserialize a JSON value into `T`.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.deserialize())
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.data
            .write()
            .insert(key.into(), ConfigEntry::Value(value.into()));
    }

    pub fn set_lazy<F>(&self, key: impl Into<String>, f: F)
    where
        F: Fn(&ConfigStore) -> Value + Send + Sync + 'static,
    {
        self.data
            .write()
            .insert(key.into(), ConfigEntry::Lazy(Arc::new(f)));
    }

    /// Whether the key is set, including to an explicit null.
    pub fn has(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.data.write().shift_remove(key).is_some()
    }

    /// Merge settings returned by a construction stage.
    pub fn merge(&self, settings: Settings) {
        let mut data = self.data.write();
        for (k, v) in settings {
            data.insert(k, ConfigEntry::Value(v));
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.data.read().iter()).finish()
    }
}
