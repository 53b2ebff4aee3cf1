//! Module sources backing the class registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use classwork_protocols::error::ClassError;

use super::ClassRegistry;
use crate::class::Definition;
use crate::namespace::ModuleLocation;

/// Produces the definition stored at a resolved module location.
///
/// The registry is passed along so a module can load the definitions it
/// builds on, such as its parent class.
pub trait ModuleSource: Send + Sync {
    fn load(
        &self,
        location: &ModuleLocation,
        registry: &ClassRegistry,
    ) -> Result<Definition, ClassError>;
}

/// Factory stored in a [`StaticModules`] table.
pub type ModuleFactory =
    Arc<dyn Fn(&ClassRegistry) -> Result<Definition, ClassError> + Send + Sync>;

/// Module table filled at startup, keyed by module path.
pub struct StaticModules {
    modules: DashMap<PathBuf, ModuleFactory>,
}

impl StaticModules {
    pub fn new() -> Self {
        Self {
            modules: DashMap::new(),
        }
    }

    /// Register a factory for the module at `path`.
    pub fn register<F>(&self, path: impl Into<PathBuf>, factory: F)
    where
        F: Fn(&ClassRegistry) -> Result<Definition, ClassError> + Send + Sync + 'static,
    {
        self.modules.insert(path.into(), Arc::new(factory));
    }

    /// Register a ready-made definition for the module at `path`.
    pub fn register_definition(&self, path: impl Into<PathBuf>, definition: impl Into<Definition>) {
        let definition = definition.into();
        self.register(path, move |_| Ok(definition.clone()));
    }

    pub fn remove(&self, path: &Path) -> bool {
        self.modules.remove(path).is_some()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.modules.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for StaticModules {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleSource for StaticModules {
    fn load(
        &self,
        location: &ModuleLocation,
        registry: &ClassRegistry,
    ) -> Result<Definition, ClassError> {
        let factory = self
            .modules
            .get(&location.path)
            .map(|f| f.clone())
            .ok_or_else(|| ClassError::NotFound {
                identifier: location.identifier.clone(),
                path: location.path.display().to_string(),
            })?;
        factory(registry)
    }
}
