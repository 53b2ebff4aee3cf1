//! Reflection over the mixins composed into a class.

use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;

use classwork_protocols::error::LifecycleError;
use classwork_protocols::types::Value;

use super::ResultContext;
use crate::class::{ClassDef, HookFn, Mixin};
use crate::instance::Instance;

fn same_mixin(a: &Arc<Mixin>, b: &Arc<Mixin>) -> bool {
    Arc::ptr_eq(a, b) || (a.name().is_some() && a.name() == b.name())
}

impl ClassDef {
    /// Composition records of this class and its ancestors, eldest first.
    pub fn composition_chain(&self) -> Vec<Arc<ResultContext>> {
        let mut chain: Vec<_> = self
            .lineage()
            .filter_map(|c| c.composition().cloned())
            .collect();
        chain.reverse();
        chain
    }

    /// Every mixin ever composed into this class, eldest application first.
    ///
    /// A mixin applied again by a later composition keeps its first position.
    pub fn mixins(&self) -> Vec<Arc<Mixin>> {
        let mut out: Vec<Arc<Mixin>> = Vec::new();
        for result in self.composition_chain() {
            for mixin in &result.mixins {
                if !out.iter().any(|seen| same_mixin(seen, mixin)) {
                    out.push(mixin.clone());
                }
            }
        }
        out
    }

    pub fn has_mixin(&self, name: &str) -> bool {
        self.mixins().iter().any(|m| m.name() == Some(name))
    }

    pub fn has_mixin_matching(&self, pattern: &Regex) -> bool {
        self.mixins()
            .iter()
            .any(|m| m.name().is_some_and(|name| pattern.is_match(name)))
    }

    /// Same-named hooks of every contributing mixin, eldest first.
    ///
    /// Each entry is keyed by the mixin's name. Untagged mixins are keyed by
    /// their position in [`ClassDef::mixins`] so every contributor stays
    /// distinct.
    pub fn method_chain(&self, name: &str) -> Vec<(String, HookFn)> {
        self.mixins()
            .iter()
            .enumerate()
            .filter_map(|(i, m)| {
                let hook = m.hook(name)?.clone();
                let key = m
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("<anonymous mixin #{i}>"));
                Some((key, hook))
            })
            .collect()
    }

    /// Run a method chain against `target`, collecting one result per mixin.
    pub fn execute_chain(
        &self,
        name: &str,
        target: &mut Instance,
    ) -> Result<IndexMap<String, Value>, LifecycleError> {
        let mut results = IndexMap::new();
        for (mixin, hook) in self.method_chain(name) {
            let value = hook(&mut *target)?;
            results.insert(mixin, value);
        }
        Ok(results)
    }
}
