//! Dependency container errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("Dependency not registered: {0}")]
    NotFound(String),

    #[error("Dependency alias cycle detected at: {0}")]
    AliasCycle(String),

    #[error("Singleton {0} depends on itself")]
    DependencyCycle(String),

    #[error("Factory for {name} failed: {message}")]
    FactoryFailed { name: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ContainerError::NotFound("logger".to_string());
        assert_eq!(err.to_string(), "Dependency not registered: logger");
    }

    #[test]
    fn test_factory_failed_error() {
        let err = ContainerError::FactoryFailed {
            name: "db".to_string(),
            message: "connection refused".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("db"));
        assert!(display.contains("connection refused"));
    }
}
