//! Argument validation errors raised while resolving construction inputs.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{member}: missing required parameter `{param}`")]
    Missing { member: String, param: String },

    #[error("{member}: parameter `{param}` expected {expected}, found {found}")]
    WrongType {
        member: String,
        param: String,
        expected: String,
        found: String,
    },

    #[error("{member}: parameter `{param}` is not an instance of {expected}")]
    NotInstanceOf {
        member: String,
        param: String,
        expected: String,
    },
}

impl ValidationError {
    /// Name of the offending parameter.
    pub fn param(&self) -> &str {
        match self {
            Self::Missing { param, .. }
            | Self::WrongType { param, .. }
            | Self::NotInstanceOf { param, .. } => param,
        }
    }

    /// Fully qualified member that requested the parameter.
    pub fn member(&self) -> &str {
        match self {
            Self::Missing { member, .. }
            | Self::WrongType { member, .. }
            | Self::NotInstanceOf { member, .. } => member,
        }
    }
}
