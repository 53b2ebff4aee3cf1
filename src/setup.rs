//! Building a runtime from loaded configuration.

use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use classwork_config::{Config, ConfigLoader};
use classwork_core::Runtime;
use classwork_protocols::error::RuntimeError;
use classwork_protocols::Value;

/// Load the configuration file.
///
/// An explicit path must exist. Without one the default location is tried
/// and a missing file falls back to the built-in defaults.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let path = ConfigLoader::default_path();
            if path.exists() {
                ConfigLoader::load(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))
            } else {
                info!("No config at {}, using defaults", path.display());
                Ok(Config::default())
            }
        }
    }
}

/// Build a runtime with the configured namespaces and container values.
pub(crate) fn build_runtime(config: &Config) -> Result<Runtime, RuntimeError> {
    let mut builder = Runtime::builder().module_extension(&config.runtime.module_extension);

    for ns in &config.namespaces {
        debug!("Namespace {} -> {}", ns.prefix, ns.root_path().display());
        builder = builder.namespace(&ns.prefix, ns.root_path());
    }
    for (name, value) in &config.values {
        builder = builder.value(name, Value::from(value.clone()));
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use classwork_config::{ConfigLoader, NamespaceConfig};
    use classwork_protocols::error::NamespaceError;

    use super::*;

    #[test]
    fn test_load_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[namespaces]]\nprefix = \"App\"\nroot = \"/srv/app\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.namespaces, [NamespaceConfig::new("App", "/srv/app")]);
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let err = load_config(Some(Path::new("/nonexistent/classwork.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/classwork.toml"));
    }

    #[test]
    fn test_build_from_default_config() {
        let runtime = build_runtime(&Config::default()).unwrap();
        assert!(runtime.namespaces().is_empty());
        assert!(runtime.container().is_empty());
        assert_eq!(runtime.registry().module_extension(), "class");
    }

    #[test]
    fn test_build_wires_namespaces_and_values() {
        let config = ConfigLoader::load_str(
            r#"
            [runtime]
            module_extension = "mod"

            [[namespaces]]
            prefix = "Core"
            root = "/lib/core"

            [[namespaces]]
            prefix = "Core.widgets"
            root = "/lib/widgets"

            [values]
            greeting = "hello"
            retries = 3
            "#,
        )
        .unwrap();

        let runtime = build_runtime(&config).unwrap();
        assert_eq!(runtime.namespaces().len(), 2);
        assert_eq!(
            runtime.namespaces().resolve("Core.widgets.Button").unwrap().root_path,
            PathBuf::from("/lib/widgets")
        );
        assert_eq!(
            runtime.registry().locate("Core.Util").unwrap().path,
            PathBuf::from("/lib/core/Util.mod")
        );
        assert_eq!(
            runtime.container().resolve("greeting").unwrap(),
            Value::from("hello")
        );
        assert_eq!(runtime.container().resolve("retries").unwrap(), Value::from(3));
    }

    #[test]
    fn test_build_rejects_empty_prefix() {
        let mut config = Config::default();
        config.namespaces.push(NamespaceConfig::new("", "/lib"));

        assert!(matches!(
            build_runtime(&config),
            Err(RuntimeError::Namespace(NamespaceError::InvalidPrefix(_)))
        ));
    }
}
