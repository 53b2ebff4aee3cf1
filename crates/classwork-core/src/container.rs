//! Dependency container.
//!
//! Holds static values, lazily resolved singletons and aliases by name:
//! - A singleton factory runs at most once; on success its entry is replaced
//!   by the computed value and the factory is dropped
//! - An alias forwards to another entry and never caches on its own
//! - A factory that needs its own singleton, directly or through others,
//!   fails with a dependency cycle
//! - `resolve` fails on unknown names, `resolve_many` omits them along with
//!   aliases whose chain ends at an unknown name

use std::sync::Arc;
use std::thread::{self, ThreadId};

use dashmap::DashMap;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use classwork_protocols::error::ContainerError;
use classwork_protocols::types::Value;

/// Singleton factory. Receives the container to resolve its own dependencies.
pub type Factory = Arc<dyn Fn(&Container) -> Result<Value, ContainerError> + Send + Sync>;

struct Singleton {
    cell: OnceCell<Value>,
    factory: Factory,
    /// Thread currently running the factory.
    initializing: Mutex<Option<ThreadId>>,
}

/// Clears the initializing marker when the factory returns or unwinds.
struct InitGuard<'a>(&'a Mutex<Option<ThreadId>>);

impl Drop for InitGuard<'_> {
    fn drop(&mut self) {
        *self.0.lock() = None;
    }
}

#[derive(Clone)]
enum Slot {
    Value(Value),
    Singleton(Arc<Singleton>),
    Alias(String),
}

/// Snapshot of one registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerEntry {
    pub resolved: bool,
    pub has_factory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
}

/// Registry of named dependencies.
pub struct Container {
    entries: DashMap<String, Slot>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Register a lazily computed value. Replaces any entry of the same name.
    pub fn register_singleton<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Container) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("Registered singleton {}", name);
        self.entries.insert(
            name,
            Slot::Singleton(Arc::new(Singleton {
                cell: OnceCell::new(),
                factory: Arc::new(factory),
                initializing: Mutex::new(None),
            })),
        );
    }

    /// Register a ready value. Replaces any entry of the same name.
    pub fn register_value(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        debug!("Registered value {}", name);
        self.entries.insert(name, Slot::Value(value.into()));
    }

    /// Make `name` resolve through `target`.
    pub fn register_alias(&self, name: impl Into<String>, target: impl Into<String>) {
        let (name, target) = (name.into(), target.into());
        debug!("Registered alias {} -> {}", name, target);
        self.entries.insert(name, Slot::Alias(target));
    }

    /// Resolve a dependency by name.
    pub fn resolve(&self, name: &str) -> Result<Value, ContainerError> {
        let mut current = name.to_string();
        let mut visited: Vec<String> = Vec::new();
        loop {
            let slot = self
                .entries
                .get(&current)
                .map(|e| e.value().clone())
                .ok_or_else(|| ContainerError::NotFound(current.clone()))?;

            match slot {
                Slot::Value(value) => return Ok(value),
                Slot::Singleton(singleton) => return self.resolve_singleton(&current, &singleton),
                Slot::Alias(target) => {
                    visited.push(current);
                    if visited.contains(&target) {
                        return Err(ContainerError::AliasCycle(target));
                    }
                    current = target;
                }
            }
        }
    }

    fn resolve_singleton(&self, name: &str, singleton: &Arc<Singleton>) -> Result<Value, ContainerError> {
        let current = thread::current().id();
        if singleton.cell.get().is_none() && *singleton.initializing.lock() == Some(current) {
            return Err(ContainerError::DependencyCycle(name.to_string()));
        }

        let value = singleton
            .cell
            .get_or_try_init(|| {
                *singleton.initializing.lock() = Some(current);
                let _guard = InitGuard(&singleton.initializing);
                info!("Resolving singleton {}", name);
                (singleton.factory)(self)
            })?
            .clone();

        // Swap the factory out for its value unless the entry was replaced meanwhile
        if let Some(mut entry) = self.entries.get_mut(name) {
            if matches!(entry.value(), Slot::Singleton(s) if Arc::ptr_eq(s, singleton)) {
                *entry = Slot::Value(value.clone());
            }
        }
        Ok(value)
    }

    /// Resolve every registered name among `names`; unknown names are left out.
    pub fn resolve_many<I, S>(&self, names: I) -> Result<IndexMap<String, Value>, ContainerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = IndexMap::new();
        for name in names {
            let name = name.as_ref();
            if !self.is_bound(name) || resolved.contains_key(name) {
                continue;
            }
            resolved.insert(name.to_string(), self.resolve(name)?);
        }
        Ok(resolved)
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether `name` is registered and, for an alias, its chain ends at a
    /// registered entry. A cyclic chain counts as bound so resolving it reports
    /// the cycle.
    pub fn is_bound(&self, name: &str) -> bool {
        let mut current = name.to_string();
        let mut visited: Vec<String> = Vec::new();
        loop {
            let target = match self.entries.get(&current) {
                None => return false,
                Some(entry) => match entry.value() {
                    Slot::Alias(target) => target.clone(),
                    _ => return true,
                },
            };
            visited.push(current);
            if visited.contains(&target) {
                return true;
            }
            current = target;
        }
    }

    pub fn entry(&self, name: &str) -> Option<ContainerEntry> {
        self.entries.get(name).map(|slot| match slot.value() {
            Slot::Value(_) => ContainerEntry {
                resolved: true,
                has_factory: false,
                alias_of: None,
            },
            Slot::Singleton(s) => ContainerEntry {
                resolved: s.cell.get().is_some(),
                has_factory: true,
                alias_of: None,
            },
            Slot::Alias(target) => ContainerEntry {
                resolved: false,
                has_factory: false,
                alias_of: Some(target.clone()),
            },
        })
    }

    pub fn remove(&self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}
