//! Class and mixin definitions.
//!
//! Definitions are plain data assembled by builders: a class carries its
//! parent, at most one construction stage, an optional ready override and
//! member tables; a mixin carries members, named hooks, composition hooks and
//! the inputs its hooks read.

mod definition;
mod mixin;
mod reference;

pub use definition::*;
pub use mixin::*;
pub use reference::*;
