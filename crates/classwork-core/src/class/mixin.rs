//! Mixin (capability set) definitions.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use classwork_protocols::error::{CompositionError, LifecycleError};
use classwork_protocols::lifecycle::hooks;
use classwork_protocols::types::Value;

use super::MethodFn;
use crate::compose::{InvocationContext, MixinContext};
use crate::instance::Instance;

/// Named hook contributed by a mixin; lifecycle states and method chains run these.
pub type HookFn = Arc<dyn Fn(&mut Instance) -> Result<Value, LifecycleError> + Send + Sync>;

/// `before_composition` / `after_composition` hook.
pub type InvocationHookFn =
    Arc<dyn Fn(&InvocationContext<'_>) -> Result<(), CompositionError> + Send + Sync>;

/// `on_composition` hook.
pub type MixinHookFn = Arc<dyn Fn(&MixinContext<'_>) -> Result<(), CompositionError> + Send + Sync>;

/// An independently authored capability set.
pub struct Mixin {
    full_name: OnceCell<String>,
    declared_name: Option<String>,
    methods: IndexMap<String, MethodFn>,
    statics: IndexMap<String, Value>,
    hooks: IndexMap<String, HookFn>,
    before_composition: Option<InvocationHookFn>,
    on_composition: Option<MixinHookFn>,
    after_composition: Option<InvocationHookFn>,
    requires: Vec<String>,
}

impl Mixin {
    pub fn builder() -> MixinBuilder {
        MixinBuilder::new()
    }

    pub fn name(&self) -> Option<&str> {
        self.full_name
            .get()
            .map(String::as_str)
            .or(self.declared_name.as_deref())
    }

    pub fn declared_name(&self) -> Option<&str> {
        self.declared_name.as_deref()
    }

    pub fn display_name(&self) -> String {
        self.name().unwrap_or("<anonymous mixin>").to_string()
    }

    pub(crate) fn tag(&self, name: &str) -> bool {
        self.full_name.set(name.to_string()).is_ok()
    }

    pub fn methods(&self) -> &IndexMap<String, MethodFn> {
        &self.methods
    }

    pub fn statics(&self) -> &IndexMap<String, Value> {
        &self.statics
    }

    pub fn hook(&self, name: &str) -> Option<&HookFn> {
        self.hooks.get(name)
    }

    pub fn hook_names(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }

    /// Inputs this mixin's hooks read from the config store.
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    pub(crate) fn before_composition(&self) -> Option<&InvocationHookFn> {
        self.before_composition.as_ref()
    }

    pub(crate) fn on_composition(&self) -> Option<&MixinHookFn> {
        self.on_composition.as_ref()
    }

    pub(crate) fn after_composition(&self) -> Option<&InvocationHookFn> {
        self.after_composition.as_ref()
    }
}

impl fmt::Debug for Mixin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mixin")
            .field("name", &self.display_name())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .field("requires", &self.requires)
            .finish()
    }
}

/// Builder for [`Mixin`].
#[derive(Default)]
pub struct MixinBuilder {
    name: Option<String>,
    methods: IndexMap<String, MethodFn>,
    statics: IndexMap<String, Value>,
    hooks: IndexMap<String, HookFn>,
    before_composition: Option<InvocationHookFn>,
    on_composition: Option<MixinHookFn>,
    after_composition: Option<InvocationHookFn>,
    requires: Vec<String>,
}

impl MixinBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Instance method copied onto the host class.
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, LifecycleError> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(f));
        self
    }

    /// Class-level value copied onto the host class.
    pub fn static_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.statics.insert(name.into(), value.into());
        self
    }

    /// Named hook, run by lifecycle states or method chains of the same name.
    pub fn hook<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Instance) -> Result<Value, LifecycleError> + Send + Sync + 'static,
    {
        self.hooks.insert(name.into(), Arc::new(f));
        self
    }

    pub fn before_construct<F>(self, f: F) -> Self
    where
        F: Fn(&mut Instance) -> Result<Value, LifecycleError> + Send + Sync + 'static,
    {
        self.hook(hooks::BEFORE_CONSTRUCT, f)
    }

    pub fn after_construct<F>(self, f: F) -> Self
    where
        F: Fn(&mut Instance) -> Result<Value, LifecycleError> + Send + Sync + 'static,
    {
        self.hook(hooks::AFTER_CONSTRUCT, f)
    }

    pub fn before_ready<F>(self, f: F) -> Self
    where
        F: Fn(&mut Instance) -> Result<Value, LifecycleError> + Send + Sync + 'static,
    {
        self.hook(hooks::BEFORE_READY, f)
    }

    pub fn after_ready<F>(self, f: F) -> Self
    where
        F: Fn(&mut Instance) -> Result<Value, LifecycleError> + Send + Sync + 'static,
    {
        self.hook(hooks::AFTER_READY, f)
    }

    pub fn before_composition<F>(mut self, f: F) -> Self
    where
        F: Fn(&InvocationContext<'_>) -> Result<(), CompositionError> + Send + Sync + 'static,
    {
        self.before_composition = Some(Arc::new(f));
        self
    }

    pub fn on_composition<F>(mut self, f: F) -> Self
    where
        F: Fn(&MixinContext<'_>) -> Result<(), CompositionError> + Send + Sync + 'static,
    {
        self.on_composition = Some(Arc::new(f));
        self
    }

    pub fn after_composition<F>(mut self, f: F) -> Self
    where
        F: Fn(&InvocationContext<'_>) -> Result<(), CompositionError> + Send + Sync + 'static,
    {
        self.after_composition = Some(Arc::new(f));
        self
    }

    /// Declare config inputs read by this mixin's hooks.
    pub fn requires<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.requires.contains(&name) {
                self.requires.push(name);
            }
        }
        self
    }

    pub fn build(self) -> Arc<Mixin> {
        Arc::new(Mixin {
            full_name: OnceCell::new(),
            declared_name: self.name,
            methods: self.methods,
            statics: self.statics,
            hooks: self.hooks,
            before_composition: self.before_composition,
            on_composition: self.on_composition,
            after_composition: self.after_composition,
            requires: self.requires,
        })
    }
}
