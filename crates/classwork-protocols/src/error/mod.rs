//! Error types for the classwork runtime.

mod class;
mod composition;
mod container;
mod lifecycle;
mod namespace;
mod runtime;
mod validation;

pub use class::*;
pub use composition::*;
pub use container::*;
pub use lifecycle::*;
pub use namespace::*;
pub use runtime::*;
pub use validation::*;
