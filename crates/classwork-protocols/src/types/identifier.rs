//! Class identifier syntax.
//!
//! A class identifier is a dot-separated path such as `Core.abstract.Component`.
//! The first and final segments start with an upper-case letter, interior
//! segments start with a lower-case letter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClassError;

/// Separator between identifier segments.
pub const SEPARATOR: char = '.';

/// A validated class identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassId(String);

impl ClassId {
    /// Parse and validate an identifier.
    pub fn parse(identifier: impl Into<String>) -> Result<Self, ClassError> {
        let identifier = identifier.into();
        let invalid = |reason: &str| ClassError::InvalidIdentifier {
            identifier: identifier.clone(),
            reason: reason.to_string(),
        };

        if identifier.is_empty() {
            return Err(invalid("identifier is empty"));
        }

        let segments: Vec<&str> = identifier.split(SEPARATOR).collect();
        let last = segments.len() - 1;

        for (i, segment) in segments.iter().enumerate() {
            let Some(first) = segment.chars().next() else {
                return Err(invalid("empty segment"));
            };
            if !segment.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(invalid("segments may only contain letters, digits and '_'"));
            }
            let outer = i == 0 || i == last;
            if outer && !first.is_uppercase() {
                return Err(invalid("first and last segments must start upper-case"));
            }
            if !outer && !first.is_lowercase() {
                return Err(invalid("interior segments must start lower-case"));
            }
        }

        Ok(Self(identifier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// The final segment, i.e. the short class name.
    pub fn short_name(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(&self.0)
    }

    /// Remainder of the identifier after `prefix`, without a leading separator.
    pub fn strip_namespace(&self, prefix: &str) -> Option<&str> {
        self.0
            .strip_prefix(prefix)
            .map(|rest| rest.trim_start_matches(SEPARATOR))
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClassId {
    type Err = ClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClassId {
    type Error = ClassError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ClassId> for String {
    fn from(id: ClassId) -> Self {
        id.0
    }
}
