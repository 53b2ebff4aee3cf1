use super::*;
use crate::schema::NamespaceConfig;

fn config_with(namespaces: &[(&str, &str)]) -> Config {
    let mut config = Config::default();
    for (prefix, root) in namespaces {
        config.namespaces.push(NamespaceConfig::new(*prefix, *root));
    }
    config
}

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_existing_root() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with(&[("Core", dir.path().to_str().unwrap())]);

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_missing_root_warning() {
    let config = config_with(&[("Core", "/nonexistent/classwork/core")]);

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "namespaces[0].root"));
}

#[test]
fn test_validate_empty_prefix() {
    let config = config_with(&[("..", "/tmp")]);

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "namespaces[0].prefix"));
}

#[test]
fn test_validate_malformed_prefix() {
    for prefix in ["Core..abstract", "Core.ab-c", "core"] {
        let config = config_with(&[(prefix, "/tmp")]);
        let result = ConfigValidator::validate(&config).unwrap();
        assert!(!result.is_valid(), "{prefix} should be rejected");
    }
}

#[test]
fn test_validate_duplicate_prefix() {
    let config = config_with(&[("Core", "/tmp"), ("Core.", "/tmp")]);

    let result = ConfigValidator::validate(&config).unwrap();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path, "namespaces[1].prefix");
}

#[test]
fn test_validate_empty_root() {
    let config = config_with(&[("Core", "")]);

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "namespaces[0].root"));
}

#[test]
fn test_validate_module_extension() {
    let mut config = Config::default();
    config.runtime.module_extension = String::new();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "runtime.module_extension"));

    config.runtime.module_extension = ".class".to_string();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
}

#[test]
fn test_validate_unknown_log_level_warning() {
    let mut config = Config::default();
    config.runtime.log_level = "chatty".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "runtime.log_level"));
}

#[test]
fn test_validate_value_names() {
    let mut config = Config::default();
    config
        .values
        .insert("db_url".to_string(), serde_json::json!("sqlite://"));
    config
        .values
        .insert("bad-name".to_string(), serde_json::json!(1));

    let result = ConfigValidator::validate(&config).unwrap();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path, "values.bad-name");
}

#[test]
fn test_into_result() {
    let config = config_with(&[("", "/tmp")]);
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(matches!(
        result.into_result(),
        Err(ConfigError::InvalidValue { .. })
    ));

    let result = ConfigValidator::validate(&Config::default()).unwrap();
    assert!(result.into_result().unwrap().is_empty());
}
