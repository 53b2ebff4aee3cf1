//! Class definitions.

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use classwork_protocols::error::LifecycleError;
use classwork_protocols::stage::{ConstructOutcome, StageManifest};
use classwork_protocols::types::Value;

use crate::compose::ResultContext;
use crate::instance::{Args, Instance};

/// Construction-stage function of one class level.
pub type ConstructFn =
    Arc<dyn Fn(&mut Instance, &Args) -> Result<ConstructOutcome, LifecycleError> + Send + Sync>;

/// Ready override.
pub type ReadyFn = Arc<dyn Fn(&mut Instance) -> Result<(), LifecycleError> + Send + Sync>;

/// Instance method.
pub type MethodFn =
    Arc<dyn Fn(&mut Instance, &[Value]) -> Result<Value, LifecycleError> + Send + Sync>;

/// A class level's construction stage and the inputs it declares.
#[derive(Clone)]
pub struct ConstructStage {
    manifest: StageManifest,
    pub(crate) run: ConstructFn,
}

impl ConstructStage {
    pub fn manifest(&self) -> &StageManifest {
        &self.manifest
    }
}

/// A class definition.
pub struct ClassDef {
    full_name: OnceCell<String>,
    declared_name: Option<String>,
    parent: Option<Arc<ClassDef>>,
    construct: Option<ConstructStage>,
    ready: Option<ReadyFn>,
    methods: RwLock<IndexMap<String, MethodFn>>,
    statics: RwLock<IndexMap<String, Value>>,
    composition: OnceCell<Arc<ResultContext>>,
}

impl ClassDef {
    pub fn builder() -> ClassBuilder {
        ClassBuilder::new()
    }

    /// Empty subclass of `parent`, used as the target of a composition.
    pub(crate) fn subclass_of(parent: Arc<ClassDef>) -> Self {
        Self {
            full_name: OnceCell::new(),
            declared_name: None,
            parent: Some(parent),
            construct: None,
            ready: None,
            methods: RwLock::new(IndexMap::new()),
            statics: RwLock::new(IndexMap::new()),
            composition: OnceCell::new(),
        }
    }

    /// Full identifier: the registry tag, or the builder's declared name
    /// before the class has been loaded.
    pub fn name(&self) -> Option<&str> {
        self.full_name
            .get()
            .map(String::as_str)
            .or(self.declared_name.as_deref())
    }

    /// Name given to the builder, if any. The registry refuses to load the
    /// class under any other identifier.
    pub fn declared_name(&self) -> Option<&str> {
        self.declared_name.as_deref()
    }

    /// Name for diagnostics; composed classes without a tag describe their parts.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name() {
            return name.to_string();
        }
        if let Some(result) = self.composition() {
            let mixins: Vec<String> = result.mixins.iter().map(|m| m.display_name()).collect();
            return format!("{}<{}>", result.base.display_name(), mixins.join(", "));
        }
        match &self.parent {
            Some(parent) => format!("{}::<subclass>", parent.display_name()),
            None => "<anonymous>".to_string(),
        }
    }

    /// Attach the full identifier. Only the first tag sticks.
    pub(crate) fn tag(&self, name: &str) -> bool {
        self.full_name.set(name.to_string()).is_ok()
    }

    pub fn parent(&self) -> Option<&Arc<ClassDef>> {
        self.parent.as_ref()
    }

    /// This class followed by each ancestor, most-derived first.
    pub fn lineage(&self) -> impl Iterator<Item = &ClassDef> {
        std::iter::successors(Some(self), |c| c.parent.as_deref())
    }

    /// Whether this class or any ancestor carries `name`.
    pub fn is_subclass_of(&self, name: &str) -> bool {
        self.lineage().any(|c| c.name() == Some(name))
    }

    /// This level's own construction stage.
    pub fn construct_stage(&self) -> Option<&ConstructStage> {
        self.construct.as_ref()
    }

    /// The most-derived ready override in the lineage.
    pub fn ready_override(&self) -> Option<(String, ReadyFn)> {
        self.lineage()
            .find_map(|c| c.ready.clone().map(|f| (c.display_name(), f)))
    }

    /// Look up a method through the lineage (single dispatch).
    pub fn find_method(&self, name: &str) -> Option<MethodFn> {
        self.lineage()
            .find_map(|c| c.methods.read().get(name).cloned())
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.find_method(name).is_some()
    }

    /// Methods defined directly on this class, in definition order.
    pub fn own_method_names(&self) -> Vec<String> {
        self.methods.read().keys().cloned().collect()
    }

    pub fn define_method<F>(&self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, LifecycleError> + Send + Sync + 'static,
    {
        self.methods.write().insert(name.into(), Arc::new(f));
    }

    pub(crate) fn insert_method(&self, name: String, f: MethodFn) {
        self.methods.write().insert(name, f);
    }

    /// Look up a class-level value through the lineage.
    pub fn static_value(&self, name: &str) -> Option<Value> {
        self.lineage()
            .find_map(|c| c.statics.read().get(name).cloned())
    }

    pub fn set_static(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.statics.write().insert(name.into(), value.into());
    }

    /// Composition record, present on classes produced by the composer.
    pub fn composition(&self) -> Option<&Arc<ResultContext>> {
        self.composition.get()
    }

    pub(crate) fn attach_composition(&self, result: Arc<ResultContext>) -> bool {
        self.composition.set(result).is_ok()
    }

    /// Union of the inputs declared by every construction stage in the
    /// lineage and every mixin ever composed into it, in first-seen order.
    pub fn dependency_set(&self) -> Vec<String> {
        let mut names: IndexSet<String> = IndexSet::new();
        for level in self.lineage() {
            if let Some(stage) = &level.construct {
                names.extend(stage.manifest.names().map(str::to_string));
            }
        }
        for mixin in self.mixins() {
            names.extend(mixin.requires().iter().cloned());
        }
        names.into_iter().collect()
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.display_name())
            .field("parent", &self.parent.as_ref().map(|p| p.display_name()))
            .field("construct", &self.construct.as_ref().map(|s| &s.manifest))
            .field("ready", &self.ready.is_some())
            .field("methods", &self.own_method_names())
            .finish()
    }
}

/// Builder for [`ClassDef`].
#[derive(Default)]
pub struct ClassBuilder {
    name: Option<String>,
    parent: Option<Arc<ClassDef>>,
    construct: Option<ConstructStage>,
    ready: Option<ReadyFn>,
    methods: IndexMap<String, MethodFn>,
    statics: IndexMap<String, Value>,
}

impl ClassBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the class's full identifier up front.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn extends(mut self, parent: Arc<ClassDef>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set this level's construction stage.
    pub fn construct<F>(mut self, manifest: StageManifest, f: F) -> Self
    where
        F: Fn(&mut Instance, &Args) -> Result<ConstructOutcome, LifecycleError>
            + Send
            + Sync
            + 'static,
    {
        self.construct = Some(ConstructStage {
            manifest,
            run: Arc::new(f),
        });
        self
    }

    pub fn ready<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Instance) -> Result<(), LifecycleError> + Send + Sync + 'static,
    {
        self.ready = Some(Arc::new(f));
        self
    }

    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value, LifecycleError> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(f));
        self
    }

    pub fn static_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.statics.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Arc<ClassDef> {
        Arc::new(ClassDef {
            full_name: OnceCell::new(),
            declared_name: self.name,
            parent: self.parent,
            construct: self.construct,
            ready: self.ready,
            methods: RwLock::new(self.methods),
            statics: RwLock::new(self.statics),
            composition: OnceCell::new(),
        })
    }
}
