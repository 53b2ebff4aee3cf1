//! # Classwork Config
//!
//! TOML configuration of a classwork runtime: namespace table, module
//! extension and static container values.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
