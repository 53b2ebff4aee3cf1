//! Namespace resolution errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("No namespace registered for identifier: {0}")]
    NotFound(String),

    #[error("Invalid namespace prefix: {0:?}")]
    InvalidPrefix(String),
}
