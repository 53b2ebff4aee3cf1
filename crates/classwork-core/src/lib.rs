//! # Classwork Core
//!
//! Object composition and construction runtime.
//!
//! ## Components
//!
//! - [`NamespaceResolver`] - Maps dotted namespace prefixes to module roots
//! - [`ClassRegistry`] - Loads, tags and caches class and mixin definitions
//! - [`Composer`] - Merges a base class with mixins into a composed class
//! - [`Container`] - Lazily resolved singletons and static values
//! - [`Instantiator`] - Creates instances, injecting undeclared dependencies
//! - [`Instance`] - Runs the staged construction lifecycle
//! - [`Runtime`] - Explicitly constructed context owning all of the above
//!
//! ## Data Flow
//!
//! Namespace resolution feeds the class registry, the composer builds
//! composed classes from registry definitions, and the instantiator creates
//! instances whose construction lifecycle runs every contributed hook.

pub mod class;
pub mod compose;
pub mod container;
pub mod context;
pub mod instance;
pub mod instantiate;
pub mod kernel;
pub mod lifecycle;
pub mod namespace;
pub mod registry;

pub use class::{ClassBuilder, ClassDef, ClassRef, Definition, Mixin, MixinBuilder, MixinRef};
pub use compose::{Composer, InvocationContext, MixinContext, OperationContext, ResultContext};
pub use container::{Container, ContainerEntry};
pub use context::{ConfigStore, ConstructionConfig};
pub use instance::{Args, Instance};
pub use instantiate::Instantiator;
pub use kernel::{Runtime, RuntimeBuilder};
pub use namespace::{ModuleLocation, NamespaceEntry, NamespaceMatcher, NamespaceResolver};
pub use registry::{ClassRegistry, ModuleSource, StaticModules};
