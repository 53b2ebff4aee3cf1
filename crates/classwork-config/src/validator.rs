//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::Config;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error as a [`ConfigError`], if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_runtime(config, &mut result);
        Self::validate_namespaces(config, &mut result);
        Self::validate_values(config, &mut result);

        Ok(result)
    }

    fn validate_runtime(config: &Config, result: &mut ValidationResult) {
        let extension = &config.runtime.module_extension;
        if extension.is_empty() {
            result.add_error(ValidationError::new(
                "runtime.module_extension",
                "Module extension cannot be empty",
            ));
        } else if extension.contains(['.', '/', '\\']) {
            result.add_error(ValidationError::new(
                "runtime.module_extension",
                format!("Module extension '{}' must not contain '.' or path separators", extension),
            ));
        }

        if !LOG_LEVELS.contains(&config.runtime.log_level.to_lowercase().as_str()) {
            result.add_warning(ValidationWarning::new(
                "runtime.log_level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.runtime.log_level, LOG_LEVELS
                ),
            ));
        }
    }

    fn validate_namespaces(config: &Config, result: &mut ValidationResult) {
        let mut seen = HashSet::new();

        for (i, ns) in config.namespaces.iter().enumerate() {
            let path = format!("namespaces[{}]", i);
            let prefix = ns.prefix.trim_matches('.');

            if prefix.is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.prefix", path),
                    "Prefix cannot be empty",
                ));
                continue;
            }

            let segments: Vec<&str> = prefix.split('.').collect();
            if segments.iter().any(|s| !is_identifier(s)) {
                result.add_error(ValidationError::new(
                    format!("{}.prefix", path),
                    format!("Prefix '{}' has an empty or malformed segment", ns.prefix),
                ));
            } else if !segments[0].starts_with(|c: char| c.is_ascii_uppercase()) {
                result.add_error(ValidationError::new(
                    format!("{}.prefix", path),
                    format!("Prefix '{}' must start with an upper-case segment", ns.prefix),
                ));
            }

            if !seen.insert(prefix.to_string()) {
                result.add_error(ValidationError::new(
                    format!("{}.prefix", path),
                    format!("Duplicate namespace prefix '{}'", prefix),
                ));
            }

            if ns.root.is_empty() {
                result.add_error(ValidationError::new(
                    format!("{}.root", path),
                    "Root cannot be empty",
                ));
            } else if !ns.root_path().is_dir() {
                result.add_warning(ValidationWarning::new(
                    format!("{}.root", path),
                    format!("Namespace root does not exist: {}", ns.root_path().display()),
                ));
            }
        }
    }

    fn validate_values(config: &Config, result: &mut ValidationResult) {
        for name in config.values.keys() {
            if !is_identifier(name) {
                result.add_error(ValidationError::new(
                    format!("values.{}", name),
                    format!("Value name '{}' is not a valid identifier", name),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
