//! Construction lifecycle errors.

use thiserror::Error;

use super::ValidationError;
use crate::lifecycle::LifecycleState;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{class} failed during {state}: {message}")]
    StageFailed {
        class: String,
        state: LifecycleState,
        message: String,
    },

    #[error("Hook {mixin}::{hook} failed: {message}")]
    HookFailed {
        mixin: String,
        hook: String,
        message: String,
    },

    #[error("Method not found: {class}::{method}")]
    MethodNotFound { class: String, method: String },

    #[error("{0}")]
    Custom(String),
}

impl LifecycleError {
    /// Shorthand for a free-form failure raised from user code.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
