//! Loaded definitions and the input shapes accepted by the registry.

use std::sync::Arc;

use super::{ClassDef, Mixin};
use crate::instance::Instance;

/// A definition produced by a module.
#[derive(Clone, Debug)]
pub enum Definition {
    Class(Arc<ClassDef>),
    Mixin(Arc<Mixin>),
}

impl Definition {
    pub fn kind(&self) -> &'static str {
        match self {
            Definition::Class(_) => "class",
            Definition::Mixin(_) => "mixin",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Definition::Class(c) => c.name(),
            Definition::Mixin(m) => m.name(),
        }
    }

    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Definition::Class(c) => c.declared_name(),
            Definition::Mixin(m) => m.declared_name(),
        }
    }

    /// Attach the full identifier; returns false when already tagged.
    pub(crate) fn tag(&self, name: &str) -> bool {
        match self {
            Definition::Class(c) => c.tag(name),
            Definition::Mixin(m) => m.tag(name),
        }
    }

    pub fn as_class(&self) -> Option<&Arc<ClassDef>> {
        match self {
            Definition::Class(c) => Some(c),
            Definition::Mixin(_) => None,
        }
    }

    pub fn as_mixin(&self) -> Option<&Arc<Mixin>> {
        match self {
            Definition::Mixin(m) => Some(m),
            Definition::Class(_) => None,
        }
    }
}

impl From<Arc<ClassDef>> for Definition {
    fn from(c: Arc<ClassDef>) -> Self {
        Definition::Class(c)
    }
}

impl From<Arc<Mixin>> for Definition {
    fn from(m: Arc<Mixin>) -> Self {
        Definition::Mixin(m)
    }
}

/// Anything the registry can turn into a class definition.
#[derive(Clone, Debug)]
pub enum ClassRef {
    /// Full identifier, resolved through namespaces and the module source.
    Id(String),
    /// An already-loaded definition, returned as is.
    Class(Arc<ClassDef>),
}

impl From<&str> for ClassRef {
    fn from(id: &str) -> Self {
        ClassRef::Id(id.to_string())
    }
}

impl From<String> for ClassRef {
    fn from(id: String) -> Self {
        ClassRef::Id(id)
    }
}

impl From<&String> for ClassRef {
    fn from(id: &String) -> Self {
        ClassRef::Id(id.clone())
    }
}

impl From<Arc<ClassDef>> for ClassRef {
    fn from(c: Arc<ClassDef>) -> Self {
        ClassRef::Class(c)
    }
}

impl From<&Arc<ClassDef>> for ClassRef {
    fn from(c: &Arc<ClassDef>) -> Self {
        ClassRef::Class(c.clone())
    }
}

/// An instance stands for the class it was created from.
impl From<&Instance> for ClassRef {
    fn from(instance: &Instance) -> Self {
        ClassRef::Class(instance.class().clone())
    }
}

/// Anything the registry can turn into a mixin definition.
#[derive(Clone, Debug)]
pub enum MixinRef {
    Id(String),
    Mixin(Arc<Mixin>),
}

impl From<&str> for MixinRef {
    fn from(id: &str) -> Self {
        MixinRef::Id(id.to_string())
    }
}

impl From<String> for MixinRef {
    fn from(id: String) -> Self {
        MixinRef::Id(id)
    }
}

impl From<&String> for MixinRef {
    fn from(id: &String) -> Self {
        MixinRef::Id(id.clone())
    }
}

impl From<Arc<Mixin>> for MixinRef {
    fn from(m: Arc<Mixin>) -> Self {
        MixinRef::Mixin(m)
    }
}

impl From<&Arc<Mixin>> for MixinRef {
    fn from(m: &Arc<Mixin>) -> Self {
        MixinRef::Mixin(m.clone())
    }
}
