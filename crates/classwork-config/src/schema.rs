//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub namespaces: Vec<NamespaceConfig>,

    /// Static values registered in the dependency container.
    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
}

/// Runtime-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_module_extension")]
    pub module_extension: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            module_extension: default_module_extension(),
            log_level: default_log_level(),
        }
    }
}

fn default_module_extension() -> String {
    "class".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// One namespace prefix and the module root it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    pub prefix: String,
    pub root: String,
}

impl NamespaceConfig {
    pub fn new(prefix: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            root: root.into(),
        }
    }

    /// Root with `~` expanded.
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.root))
    }
}
