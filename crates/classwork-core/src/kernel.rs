//! Runtime context owning every component of the construction pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use classwork_protocols::error::{ClassError, CompositionError, NamespaceError, RuntimeError};
use classwork_protocols::types::Value;

use crate::class::{ClassDef, ClassRef, Definition, MixinRef};
use crate::compose::Composer;
use crate::container::Container;
use crate::context::ConstructionConfig;
use crate::instance::Instance;
use crate::instantiate::Instantiator;
use crate::namespace::NamespaceResolver;
use crate::registry::{ClassRegistry, StaticModules, DEFAULT_MODULE_EXTENSION};

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;

/// An independent construction runtime.
///
/// Nothing is global: each runtime has its own namespaces, module table,
/// class cache and container.
pub struct Runtime {
    resolver: Arc<NamespaceResolver>,
    modules: Arc<StaticModules>,
    registry: Arc<ClassRegistry>,
    container: Arc<Container>,
    composer: Composer,
    instantiator: Instantiator,
}

impl Runtime {
    /// Create an empty runtime with the default module extension.
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_MODULE_EXTENSION)
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    fn with_extension(module_extension: &str) -> Self {
        let resolver = Arc::new(NamespaceResolver::new());
        let modules = Arc::new(StaticModules::new());
        let registry = Arc::new(ClassRegistry::new(
            resolver.clone(),
            modules.clone(),
            module_extension,
        ));
        let container = Arc::new(Container::new());
        Self {
            composer: Composer::new(registry.clone()),
            instantiator: Instantiator::new(registry.clone(), container.clone()),
            resolver,
            modules,
            registry,
            container,
        }
    }

    /// Map a namespace prefix to a module root.
    pub fn register_namespace(
        &self,
        prefix: &str,
        root: impl Into<PathBuf>,
    ) -> Result<(), NamespaceError> {
        self.resolver.register(prefix, root)
    }

    /// Put `definition` in the module table at the path `identifier` resolves to.
    pub fn define_module(
        &self,
        identifier: &str,
        definition: impl Into<Definition>,
    ) -> Result<PathBuf, ClassError> {
        let location = self.registry.locate(identifier)?;
        self.modules
            .register_definition(location.path.clone(), definition);
        Ok(location.path)
    }

    /// Like [`Runtime::define_module`], with a factory run on first load.
    pub fn define_module_with<F>(&self, identifier: &str, factory: F) -> Result<PathBuf, ClassError>
    where
        F: Fn(&ClassRegistry) -> Result<Definition, ClassError> + Send + Sync + 'static,
    {
        let location = self.registry.locate(identifier)?;
        self.modules.register(location.path.clone(), factory);
        Ok(location.path)
    }

    pub fn load(&self, identifier: &str) -> Result<Definition, ClassError> {
        self.registry.load(identifier)
    }

    pub fn compose<B, I, M>(&self, base: B, mixins: I) -> Result<Arc<ClassDef>, CompositionError>
    where
        B: Into<ClassRef>,
        I: IntoIterator<Item = M>,
        M: Into<MixinRef>,
    {
        self.composer.compose(base, mixins)
    }

    pub fn compose_as<B, I, M>(
        &self,
        identifier: &str,
        base: B,
        mixins: I,
    ) -> Result<Arc<ClassDef>, CompositionError>
    where
        B: Into<ClassRef>,
        I: IntoIterator<Item = M>,
        M: Into<MixinRef>,
    {
        self.composer.compose_as(identifier, base, mixins)
    }

    pub fn instantiate(
        &self,
        class: impl Into<ClassRef>,
        config: ConstructionConfig,
    ) -> Result<Instance, RuntimeError> {
        self.instantiator.instantiate(class, config)
    }

    pub fn instantiate_child(
        &self,
        parent: &Instance,
        class: impl Into<ClassRef>,
        config: ConstructionConfig,
    ) -> Result<Instance, RuntimeError> {
        self.instantiator.instantiate_child(parent, class, config)
    }

    pub fn namespaces(&self) -> &Arc<NamespaceResolver> {
        &self.resolver
    }

    pub fn modules(&self) -> &Arc<StaticModules> {
        &self.modules
    }

    pub fn registry(&self) -> &Arc<ClassRegistry> {
        &self.registry
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn instantiator(&self) -> &Instantiator {
        &self.instantiator
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    module_extension: String,
    namespaces: Vec<(String, PathBuf)>,
    values: Vec<(String, Value)>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            module_extension: DEFAULT_MODULE_EXTENSION.to_string(),
            namespaces: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn module_extension(mut self, extension: impl Into<String>) -> Self {
        self.module_extension = extension.into();
        self
    }

    pub fn namespace(mut self, prefix: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        self.namespaces.push((prefix.into(), root.into()));
        self
    }

    /// Static container value.
    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<Runtime, RuntimeError> {
        let runtime = Runtime::with_extension(&self.module_extension);
        for (prefix, root) in self.namespaces {
            runtime.register_namespace(&prefix, root)?;
        }
        for (name, value) in self.values {
            runtime.container.register_value(name, value);
        }
        info!(
            "Runtime ready: {} namespaces, {} container entries, module extension .{}",
            runtime.resolver.len(),
            runtime.container.len(),
            self.module_extension
        );
        Ok(runtime)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
