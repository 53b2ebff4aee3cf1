//! Construction stage declarations.
//!
//! A construction stage states its inputs explicitly through a
//! [`StageManifest`] and reports how construction should proceed through a
//! [`ConstructOutcome`].

mod manifest;
mod outcome;

pub use manifest::*;
pub use outcome::*;
