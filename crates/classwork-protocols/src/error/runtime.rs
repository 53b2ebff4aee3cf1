//! Umbrella error for operations that span several runtime components.

use thiserror::Error;

use super::{ClassError, CompositionError, ContainerError, LifecycleError, NamespaceError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error(transparent)]
    Class(#[from] ClassError),

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
