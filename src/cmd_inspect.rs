//! Inspection subcommand handlers.

use anyhow::bail;
use tracing::{info, warn};

use classwork_config::{Config, ConfigValidator};
use classwork_core::Runtime;

use crate::cli::OutputFormat;
use crate::setup::build_runtime;

/// Validate the configuration and make sure a runtime can be built from it.
pub(crate) fn check(config: &Config) -> anyhow::Result<()> {
    let result = ConfigValidator::validate(config)?;

    for warning in &result.warnings {
        warn!("{}: {}", warning.path, warning.message);
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    if !result.is_valid() {
        bail!("Configuration has {} error(s)", result.errors.len());
    }

    let runtime = build_runtime(config)?;
    info!("Configuration OK");
    println!(
        "OK: {} namespace(s), {} value(s), module extension .{}",
        runtime.namespaces().len(),
        runtime.container().len(),
        runtime.registry().module_extension()
    );
    Ok(())
}

/// Print where the module for `identifier` would be loaded from.
pub(crate) fn resolve(runtime: &Runtime, identifier: &str, format: OutputFormat) -> anyhow::Result<()> {
    let location = runtime.registry().locate(identifier)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&location)?),
        OutputFormat::Table => {
            let exists = if location.path.is_file() { "" } else { " (missing)" };
            println!("Identifier: {}", location.identifier);
            println!("Namespace:  {}", location.namespace.prefix);
            println!("Root:       {}", location.namespace.root_path.display());
            println!("Module:     {}", location.relative_path.display());
            println!("Path:       {}{}", location.path.display(), exists);
        }
    }
    Ok(())
}

/// List namespaces, most specific first.
pub(crate) fn namespaces(runtime: &Runtime, format: OutputFormat) -> anyhow::Result<()> {
    let entries = runtime.namespaces().entries();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No namespaces registered.");
        return Ok(());
    }

    let width = entries.iter().map(|e| e.prefix.len()).max().unwrap_or(0);
    println!("{:<width$}  ROOT", "PREFIX", width = width.max(6));
    for entry in &entries {
        println!(
            "{:<width$}  {}",
            entry.prefix,
            entry.root_path.display(),
            width = width.max(6)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use classwork_config::NamespaceConfig;

    #[test]
    fn test_check_default_config() {
        assert!(check(&Config::default()).is_ok());
    }

    #[test]
    fn test_check_invalid_config() {
        let mut config = Config::default();
        config.namespaces.push(NamespaceConfig::new("lower", "/tmp"));
        assert!(check(&config).is_err());
    }

    #[test]
    fn test_resolve_unknown_namespace() {
        let runtime = Runtime::new();
        assert!(resolve(&runtime, "Nowhere.Thing", OutputFormat::Table).is_err());
    }

    #[test]
    fn test_resolve_invalid_identifier() {
        let runtime = Runtime::builder().namespace("App", "/srv/app").build().unwrap();
        let err = resolve(&runtime, "App.Widgets.Button", OutputFormat::Table).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("App.Widgets.Button"), "{message}");
        assert!(message.contains("interior segments must start lower-case"), "{message}");
    }

    #[test]
    fn test_resolve_and_list() {
        let runtime = Runtime::builder().namespace("App", "/srv/app").build().unwrap();
        assert!(resolve(&runtime, "App.widgets.Button", OutputFormat::Json).is_ok());
        assert!(resolve(&runtime, "App.widgets.Button", OutputFormat::Table).is_ok());
        assert!(namespaces(&runtime, OutputFormat::Table).is_ok());
        assert!(namespaces(&runtime, OutputFormat::Json).is_ok());
    }
}
