//! Dynamically typed values.
//!
//! Configuration entries, container registrations and stage settings all
//! carry a [`Value`]: either plain JSON-compatible data or a shared handle to
//! an arbitrary Rust object (a service, a client, another instance).

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A value flowing through configuration and the dependency container.
#[derive(Clone)]
pub enum Value {
    /// JSON-compatible data. `Data(Null)` is an explicit null.
    Data(serde_json::Value),
    /// A shared Rust object.
    Shared(Shared),
}

/// Shared, type-erased handle to a Rust object.
#[derive(Clone)]
pub struct Shared {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Shared {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name of the wrapped object.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `TypeId` of the wrapped object.
    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.inner.clone().downcast::<T>().ok()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &Shared) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared<{}>", self.type_name)
    }
}

impl Value {
    /// Explicit null.
    pub fn null() -> Self {
        Value::Data(serde_json::Value::Null)
    }

    /// Wrap an arbitrary object.
    pub fn shared<T: Any + Send + Sync>(value: T) -> Self {
        Value::Shared(Shared::new(value))
    }

    /// Wrap an object that is already shared.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Value::Shared(Shared::from_arc(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Data(serde_json::Value::Null))
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Data(v) => Some(v),
            Value::Shared(_) => None,
        }
    }

    pub fn as_shared(&self) -> Option<&Shared> {
        match self {
            Value::Shared(s) => Some(s),
            Value::Data(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(|v| v.as_str())
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_json().and_then(|v| v.as_i64())
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_json().and_then(|v| v.as_f64())
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_json().and_then(|v| v.as_bool())
    }

    /// Downcast a shared object to a concrete type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.as_shared().and_then(|s| s.downcast::<T>())
    }

    /// Deserialize JSON data into `T`.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.as_json()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Short description of the runtime kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Data(serde_json::Value::Null) => "null",
            Value::Data(serde_json::Value::Bool(_)) => "bool",
            Value::Data(serde_json::Value::Number(_)) => "number",
            Value::Data(serde_json::Value::String(_)) => "string",
            Value::Data(serde_json::Value::Array(_)) => "array",
            Value::Data(serde_json::Value::Object(_)) => "object",
            Value::Shared(s) => s.type_name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Shared(a), Value::Shared(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Data(v) => write!(f, "{}", v),
            Value::Shared(s) => s.fmt(f),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Data(v)
    }
}

impl From<Shared> for Value {
    fn from(v: Shared) -> Self {
        Value::Shared(v)
    }
}

macro_rules! impl_from_json {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Data(serde_json::Value::from(v))
                }
            }
        )*
    };
}

impl_from_json!(bool, i32, i64, u32, u64, f64, String, &str);

/// Expected kind of a value, checked when a construction stage declares one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    /// A shared object of a specific Rust type.
    Instance {
        type_id: TypeId,
        type_name: &'static str,
    },
}

impl ValueKind {
    pub fn instance_of<T: Any>() -> Self {
        ValueKind::Instance {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        use serde_json::Value as J;
        match (self, value) {
            (ValueKind::Null, Value::Data(J::Null)) => true,
            (ValueKind::Bool, Value::Data(J::Bool(_))) => true,
            (ValueKind::Number, Value::Data(J::Number(_))) => true,
            (ValueKind::String, Value::Data(J::String(_))) => true,
            (ValueKind::Array, Value::Data(J::Array(_))) => true,
            (ValueKind::Object, Value::Data(J::Object(_))) => true,
            (ValueKind::Instance { type_id, .. }, Value::Shared(s)) => s.type_id() == *type_id,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Instance { type_name, .. } => type_name,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
