//! Instantiation service.

use std::sync::Arc;

use tracing::debug;

use classwork_protocols::error::{ClassError, RuntimeError};
use classwork_protocols::types::Identity;

use crate::class::ClassRef;
use crate::container::Container;
use crate::context::ConstructionConfig;
use crate::instance::Instance;
use crate::registry::ClassRegistry;

/// Creates instances, filling undeclared inputs from the container.
pub struct Instantiator {
    registry: Arc<ClassRegistry>,
    container: Arc<Container>,
}

impl Instantiator {
    pub fn new(registry: Arc<ClassRegistry>, container: Arc<Container>) -> Self {
        Self {
            registry,
            container,
        }
    }

    /// Load `class`, inject missing dependencies, and construct an instance.
    ///
    /// Values present in `config` always win over container values, including
    /// explicit nulls.
    pub fn instantiate(
        &self,
        class: impl Into<ClassRef>,
        config: ConstructionConfig,
    ) -> Result<Instance, RuntimeError> {
        self.create(class.into(), config, None)
    }

    /// Like [`Instantiator::instantiate`], recording `parent` as the creator.
    pub fn instantiate_child(
        &self,
        parent: &Instance,
        class: impl Into<ClassRef>,
        config: ConstructionConfig,
    ) -> Result<Instance, RuntimeError> {
        self.create(class.into(), config, Some(parent.identity()))
    }

    /// Declared inputs of `class` across its lineage and mixins.
    pub fn dependency_set(&self, class: impl Into<ClassRef>) -> Result<Vec<String>, ClassError> {
        Ok(self.registry.load_class(class)?.dependency_set())
    }

    fn create(
        &self,
        class: ClassRef,
        mut config: ConstructionConfig,
        parent: Option<&Identity>,
    ) -> Result<Instance, RuntimeError> {
        let class = self.registry.load_class(class)?;

        let missing: Vec<String> = class
            .dependency_set()
            .into_iter()
            .filter(|name| !config.contains_key(name))
            .collect();
        let injected = self.container.resolve_many(&missing)?;
        if !injected.is_empty() {
            debug!(
                "Injecting [{}] into {}",
                injected.keys().cloned().collect::<Vec<_>>().join(", "),
                class.display_name()
            );
        }
        for (name, value) in injected {
            config.insert(name, value);
        }

        let identity = Identity::new(class.display_name());
        config.set_identity(match parent {
            Some(parent) => identity.with_parent(parent),
            None => identity,
        });

        Ok(Instance::construct(class, config)?)
    }

    pub fn registry(&self) -> &Arc<ClassRegistry> {
        &self.registry
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }
}
