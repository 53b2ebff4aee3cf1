//! Mixin composition errors.

use thiserror::Error;

use super::ClassError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("Cannot compose: {0}")]
    Unresolved(#[from] ClassError),

    #[error("Composition hook {mixin}::{hook} failed: {message}")]
    HookFailed {
        mixin: String,
        hook: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_wraps_class_error() {
        let err = CompositionError::from(ClassError::NotFound {
            identifier: "App.mixin.Missing".to_string(),
            path: "app/mixin/Missing.class".to_string(),
        });
        let display = err.to_string();
        assert!(display.starts_with("Cannot compose"));
        assert!(display.contains("App.mixin.Missing"));
    }

    #[test]
    fn test_hook_failed_error() {
        let err = CompositionError::HookFailed {
            mixin: "App.mixin.Observable".to_string(),
            hook: "on_composition".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Composition hook App.mixin.Observable::on_composition failed: boom"
        );
    }
}
