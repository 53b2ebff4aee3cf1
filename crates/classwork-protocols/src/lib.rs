//! # Classwork Protocols
//!
//! Shared vocabulary for the classwork runtime.
//! Contains only types, manifests and errors - no registries.
//!
//! ## Core Types
//!
//! - [`Value`] - Dynamically typed value carried through configuration and the container
//! - [`ClassId`] - Validated, dot-separated class identifier
//! - [`StageManifest`] - Declared inputs of a construction stage
//! - [`ConstructOutcome`] - Result of a construction stage
//! - [`LifecycleState`] - States of the construction protocol

pub mod error;
pub mod lifecycle;
pub mod stage;
pub mod types;

pub use error::{
    ClassError, CompositionError, ContainerError, LifecycleError, NamespaceError, RuntimeError,
    ValidationError,
};
pub use lifecycle::LifecycleState;
pub use stage::{ConstructOutcome, ParamSpec, Settings, StageManifest};
pub use types::*;
