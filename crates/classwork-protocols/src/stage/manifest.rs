//! Declared inputs of a construction stage.

use crate::types::{Value, ValueKind};

/// One named input of a construction stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    /// Used, and persisted into the config store, when the key is unset.
    pub default: Option<Value>,
    /// Fail construction when no value and no default is available.
    pub required: bool,
    /// Expected kind, checked when a value is present.
    pub kind: Option<ValueKind>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            required: false,
            kind: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Explicit list of the inputs a construction stage reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageManifest {
    params: Vec<ParamSpec>,
}

impl StageManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest of optional, untyped parameters.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            params: names.into_iter().map(ParamSpec::new).collect(),
        }
    }

    /// Add a parameter. A later spec with the same name replaces the earlier one.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        if let Some(existing) = self.params.iter_mut().find(|p| p.name == spec.name) {
            *existing = spec;
        } else {
            self.params.push(spec);
        }
        self
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_names() {
        let manifest = StageManifest::from_names(["logger", "port"]);
        assert_eq!(manifest.names().collect::<Vec<_>>(), ["logger", "port"]);
        assert!(manifest.params().iter().all(|p| !p.required && p.default.is_none()));
    }

    #[test]
    fn test_param_builder() {
        let manifest = StageManifest::new()
            .param(ParamSpec::new("port").with_default(8080).kind(ValueKind::Number))
            .param(ParamSpec::new("logger").required());

        let port = manifest.get("port").unwrap();
        assert_eq!(port.default, Some(Value::from(8080)));
        assert_eq!(port.kind, Some(ValueKind::Number));
        assert!(manifest.get("logger").unwrap().required);
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_param_replaces_same_name() {
        let manifest = StageManifest::from_names(["a"]).param(ParamSpec::new("a").required());
        assert_eq!(manifest.len(), 1);
        assert!(manifest.get("a").unwrap().required);
    }

    #[test]
    fn test_empty_manifest() {
        assert!(StageManifest::new().is_empty());
    }
}
