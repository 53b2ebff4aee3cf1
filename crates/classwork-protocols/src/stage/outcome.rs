//! Outcome of a single construction stage.

use indexmap::IndexMap;

use crate::types::Value;

/// Settings a stage hands back to the config store, in insertion order.
pub type Settings = IndexMap<String, Value>;

/// How construction proceeds after one level's stage has run.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConstructOutcome {
    /// Run the next ancestor's stage.
    #[default]
    Continue,
    /// Merge these settings into the config store, then continue.
    Merge(Settings),
    /// Skip every remaining ancestor stage.
    HaltAncestors,
}

impl ConstructOutcome {
    /// Build a `Merge` outcome from key/value pairs.
    pub fn merge<I, K, V>(settings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        ConstructOutcome::Merge(
            settings
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn halts(&self) -> bool {
        matches!(self, ConstructOutcome::HaltAncestors)
    }
}
