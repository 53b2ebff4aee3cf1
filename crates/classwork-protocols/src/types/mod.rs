//! Common types used across the runtime.

mod identifier;
mod identity;
mod value;

pub use identifier::*;
pub use identity::*;
pub use value::*;
