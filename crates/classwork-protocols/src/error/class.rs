//! Class loading errors.

use thiserror::Error;

use super::NamespaceError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassError {
    #[error("Invalid class identifier {identifier:?}: {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("Class not found: {identifier} (looked for module {path})")]
    NotFound { identifier: String, path: String },

    #[error("{identifier} is a {found}, expected a {expected}")]
    KindMismatch {
        identifier: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{identifier} resolved to a definition declared as {declared}")]
    NameMismatch { identifier: String, declared: String },

    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}
