//! Constructed instances and the resolved inputs of a construction stage.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use uuid::Uuid;

use classwork_protocols::error::{LifecycleError, ValidationError};
use classwork_protocols::lifecycle::LifecycleState;
use classwork_protocols::stage::StageManifest;
use classwork_protocols::types::{Identity, ParentLink, Value, ValueKind};

use crate::class::ClassDef;
use crate::context::{ConfigStore, ConstructionConfig};

/// An instance of a class.
///
/// Framework data (identity and lifecycle state) is kept apart from the
/// config store and from the instance's own fields.
pub struct Instance {
    class: Arc<ClassDef>,
    identity: Identity,
    state: LifecycleState,
    config: ConfigStore,
    fields: IndexMap<String, Value>,
}

impl Instance {
    /// INIT: set up framework data and the config store.
    pub(crate) fn init(class: Arc<ClassDef>, config: ConstructionConfig) -> Self {
        let (entries, identity) = config.into_parts();
        let identity = identity.unwrap_or_else(|| Identity::new(class.display_name()));
        Self {
            class,
            identity,
            state: LifecycleState::Init,
            config: ConfigStore::from_entries(entries),
            fields: IndexMap::new(),
        }
    }

    pub fn class(&self) -> &Arc<ClassDef> {
        &self.class
    }

    pub fn class_name(&self) -> String {
        self.class.display_name()
    }

    pub fn id(&self) -> Uuid {
        self.identity.instance_id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn parent(&self) -> Option<&ParentLink> {
        self.identity.parent.as_ref()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: LifecycleState) {
        self.state = state;
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Whether the class or one of its ancestors is named `class_name`.
    pub fn instance_of(&self, class_name: &str) -> bool {
        self.class.is_subclass_of(class_name)
    }

    pub fn has_mixin(&self, name: &str) -> bool {
        self.class.has_mixin(name)
    }

    /// Call a method, looked up through the class chain.
    pub fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, LifecycleError> {
        let f = self
            .class
            .find_method(method)
            .ok_or_else(|| LifecycleError::MethodNotFound {
                class: self.class_name(),
                method: method.to_string(),
            })?;
        f(self, args)
    }

    /// Run the named hook of every contributing mixin against this instance.
    pub fn execute_chain(&mut self, name: &str) -> Result<IndexMap<String, Value>, LifecycleError> {
        let class = self.class.clone();
        class.execute_chain(name, self)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class_name())
            .field("id", &self.identity.instance_id)
            .field("state", &self.state)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Inputs handed to one construction stage, resolved by name from the
/// config store.
#[derive(Debug, Clone, Default)]
pub struct Args {
    values: IndexMap<String, Value>,
}

impl Args {
    /// Resolve every parameter of `manifest` against `store`.
    ///
    /// Defaults are persisted into the store on first use. Kinds are checked
    /// on non-null values only.
    pub(crate) fn resolve(
        manifest: &StageManifest,
        store: &ConfigStore,
        member: &str,
    ) -> Result<Self, ValidationError> {
        let mut values = IndexMap::new();
        for spec in manifest.params() {
            let value = match &spec.default {
                Some(default) => Some(store.get_or(&spec.name, default.clone())),
                None => store.get(&spec.name),
            };

            let Some(value) = value else {
                if spec.required {
                    return Err(ValidationError::Missing {
                        member: member.to_string(),
                        param: spec.name.clone(),
                    });
                }
                continue;
            };

            if let Some(kind) = &spec.kind {
                if !value.is_null() && !kind.matches(&value) {
                    return Err(match kind {
                        ValueKind::Instance { type_name, .. } => ValidationError::NotInstanceOf {
                            member: member.to_string(),
                            param: spec.name.clone(),
                            expected: type_name.to_string(),
                        },
                        _ => ValidationError::WrongType {
                            member: member.to_string(),
                            param: spec.name.clone(),
                            expected: kind.name().to_string(),
                            found: value.kind_name().to_string(),
                        },
                    });
                }
            }

            values.insert(spec.name.clone(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn downcast<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get(name).and_then(Value::downcast::<T>)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
