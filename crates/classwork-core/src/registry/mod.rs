//! Class registry: loads, tags and caches definitions by full identifier.

mod source;

pub use source::{ModuleFactory, ModuleSource, StaticModules};

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};

use classwork_protocols::error::ClassError;
use classwork_protocols::types::ClassId;

use crate::class::{ClassDef, ClassRef, Definition, Mixin, MixinRef};
use crate::namespace::{ModuleLocation, NamespaceResolver};

/// Default module extension appended to resolved module paths.
pub const DEFAULT_MODULE_EXTENSION: &str = "class";

/// Cache of loaded definitions keyed by full identifier.
///
/// A cache hit returns the stored definition without resolving or tagging
/// again. Entries live until [`ClassRegistry::clear_cache`].
pub struct ClassRegistry {
    resolver: Arc<NamespaceResolver>,
    source: Arc<dyn ModuleSource>,
    module_extension: String,
    cache: DashMap<String, Definition>,
}

impl ClassRegistry {
    /// Create a registry loading modules from `source`.
    pub fn new(
        resolver: Arc<NamespaceResolver>,
        source: Arc<dyn ModuleSource>,
        module_extension: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            source,
            module_extension: module_extension.into(),
            cache: DashMap::new(),
        }
    }

    /// Load a definition by full identifier.
    pub fn load(&self, identifier: &str) -> Result<Definition, ClassError> {
        if let Some(definition) = self.cache.get(identifier) {
            return Ok(definition.clone());
        }

        let location = self.locate(identifier)?;
        debug!(
            "Loading {} from {}",
            identifier,
            location.path.display()
        );
        let definition = self.source.load(&location, self)?;
        check_declared(&definition, identifier)?;
        if definition.tag(identifier) {
            debug!("Tagged {} {}", definition.kind(), identifier);
        }

        // A module may have defined itself while loading; keep the first entry
        let definition = self
            .cache
            .entry(identifier.to_string())
            .or_insert(definition)
            .clone();
        Ok(definition)
    }

    /// Load a class from an identifier, a definition or an instance.
    pub fn load_class(&self, class: impl Into<ClassRef>) -> Result<Arc<ClassDef>, ClassError> {
        match class.into() {
            ClassRef::Class(class) => Ok(class),
            ClassRef::Id(identifier) => match self.load(&identifier)? {
                Definition::Class(class) => Ok(class),
                other => Err(ClassError::KindMismatch {
                    identifier,
                    expected: "class",
                    found: other.kind(),
                }),
            },
        }
    }

    /// Load a mixin from an identifier or a definition.
    pub fn load_mixin(&self, mixin: impl Into<MixinRef>) -> Result<Arc<Mixin>, ClassError> {
        match mixin.into() {
            MixinRef::Mixin(mixin) => Ok(mixin),
            MixinRef::Id(identifier) => match self.load(&identifier)? {
                Definition::Mixin(mixin) => Ok(mixin),
                other => Err(ClassError::KindMismatch {
                    identifier,
                    expected: "mixin",
                    found: other.kind(),
                }),
            },
        }
    }

    /// Register a definition directly under `identifier`, replacing any cached one.
    pub fn define(
        &self,
        identifier: &str,
        definition: impl Into<Definition>,
    ) -> Result<Definition, ClassError> {
        let id = ClassId::parse(identifier)?;
        let definition = definition.into();
        check_declared(&definition, id.as_str())?;
        definition.tag(id.as_str());
        info!("Defined {} {}", definition.kind(), id);
        self.cache.insert(id.into(), definition.clone());
        Ok(definition)
    }

    /// Compute where `identifier` would be loaded from.
    pub fn locate(&self, identifier: &str) -> Result<ModuleLocation, ClassError> {
        let id = ClassId::parse(identifier)?;
        Ok(self
            .resolver
            .module_location(id.as_str(), &self.module_extension)?)
    }

    pub fn is_cached(&self, identifier: &str) -> bool {
        self.cache.contains_key(identifier)
    }

    /// Cached identifiers, sorted.
    pub fn cached_identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.cache.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn clear_cache(&self) {
        info!("Clearing class cache ({} entries)", self.cache.len());
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn resolver(&self) -> &Arc<NamespaceResolver> {
        &self.resolver
    }

    pub fn module_extension(&self) -> &str {
        &self.module_extension
    }
}

/// A definition built with a declared name may only be registered under it.
fn check_declared(definition: &Definition, identifier: &str) -> Result<(), ClassError> {
    match definition.declared_name() {
        Some(declared) if declared != identifier => Err(ClassError::NameMismatch {
            identifier: identifier.to_string(),
            declared: declared.to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
