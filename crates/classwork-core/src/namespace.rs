//! Namespace resolution.
//!
//! Maps dotted namespace prefixes to module roots. Entries are kept sorted by
//! descending prefix length so the most specific prefix always matches first.

use std::path::PathBuf;

use parking_lot::RwLock;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use classwork_protocols::error::NamespaceError;
use classwork_protocols::types::SEPARATOR;

/// A registered namespace prefix and the root its modules live under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceEntry {
    pub prefix: String,
    pub root_path: PathBuf,
}

/// Where the module for a class identifier lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleLocation {
    pub identifier: String,
    pub namespace: NamespaceEntry,
    /// Path relative to the namespace root.
    pub relative_path: PathBuf,
    /// Namespace root joined with the relative path.
    pub path: PathBuf,
}

/// Selects entries for bulk removal.
#[derive(Debug, Clone)]
pub enum NamespaceMatcher {
    /// Entries whose prefix starts with this string.
    Prefix(String),
    /// Entries whose prefix matches this pattern.
    Pattern(Regex),
}

impl NamespaceMatcher {
    pub fn matches(&self, prefix: &str) -> bool {
        match self {
            NamespaceMatcher::Prefix(p) => prefix.starts_with(p.as_str()),
            NamespaceMatcher::Pattern(re) => re.is_match(prefix),
        }
    }
}

impl From<&str> for NamespaceMatcher {
    fn from(prefix: &str) -> Self {
        NamespaceMatcher::Prefix(prefix.to_string())
    }
}

impl From<Regex> for NamespaceMatcher {
    fn from(re: Regex) -> Self {
        NamespaceMatcher::Pattern(re)
    }
}

/// Namespace table, most specific prefix first.
pub struct NamespaceResolver {
    entries: RwLock<Vec<NamespaceEntry>>,
}

impl NamespaceResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Trim boundary separators from a prefix.
    pub fn normalize(prefix: &str) -> &str {
        prefix.trim_matches(SEPARATOR)
    }

    /// Register a prefix, replacing any entry with the identical prefix.
    pub fn register(
        &self,
        prefix: &str,
        root_path: impl Into<PathBuf>,
    ) -> Result<(), NamespaceError> {
        let normalized = Self::normalize(prefix);
        if normalized.is_empty() {
            return Err(NamespaceError::InvalidPrefix(prefix.to_string()));
        }

        let entry = NamespaceEntry {
            prefix: normalized.to_string(),
            root_path: root_path.into(),
        };
        info!("Registering namespace {} -> {}", entry.prefix, entry.root_path.display());

        let mut entries = self.entries.write();
        entries.retain(|e| e.prefix != entry.prefix);
        entries.push(entry);
        // Longest first; ties broken lexicographically so the order is stable
        entries.sort_by(|a, b| {
            b.prefix
                .len()
                .cmp(&a.prefix.len())
                .then_with(|| a.prefix.cmp(&b.prefix))
        });
        Ok(())
    }

    /// Remove the entry with exactly this prefix. Returns whether one was removed.
    pub fn remove_exact(&self, prefix: &str) -> bool {
        let normalized = Self::normalize(prefix);
        let mut entries = self.entries.write();
        let Some(index) = entries.iter().position(|e| e.prefix == normalized) else {
            return false;
        };
        entries.remove(index);
        info!("Removed namespace {}", normalized);
        true
    }

    /// Remove every entry selected by `matcher`. Returns whether any was removed.
    pub fn remove_matching(&self, matcher: impl Into<NamespaceMatcher>) -> bool {
        let matcher = matcher.into();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| !matcher.matches(&e.prefix));
        let removed = before - entries.len();
        if removed > 0 {
            info!("Removed {} namespaces matching {:?}", removed, matcher);
        }
        removed > 0
    }

    /// Find the most specific entry whose prefix is a literal prefix of `identifier`.
    pub fn resolve(&self, identifier: &str) -> Result<NamespaceEntry, NamespaceError> {
        let entries = self.entries.read();
        let entry = entries
            .iter()
            .find(|e| identifier.starts_with(e.prefix.as_str()))
            .cloned()
            .ok_or_else(|| NamespaceError::NotFound(identifier.to_string()))?;
        debug!("Resolved {} via namespace {}", identifier, entry.prefix);
        Ok(entry)
    }

    /// Resolve `identifier` to the module path it is loaded from.
    ///
    /// The non-prefix segments become path components and the last one
    /// receives `extension`.
    pub fn module_location(
        &self,
        identifier: &str,
        extension: &str,
    ) -> Result<ModuleLocation, NamespaceError> {
        let namespace = self.resolve(identifier)?;
        let remainder = identifier[namespace.prefix.len()..].trim_start_matches(SEPARATOR);
        let relative_path = relative_module_path(remainder, extension);
        let path = if relative_path.as_os_str().is_empty() {
            namespace.root_path.with_extension(extension)
        } else {
            namespace.root_path.join(&relative_path)
        };

        Ok(ModuleLocation {
            identifier: identifier.to_string(),
            namespace,
            relative_path,
            path,
        })
    }

    /// Snapshot of the entries in match order.
    pub fn entries(&self) -> Vec<NamespaceEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for NamespaceResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn relative_module_path(remainder: &str, extension: &str) -> PathBuf {
    if remainder.is_empty() {
        return PathBuf::new();
    }
    let mut path: PathBuf = remainder.split(SEPARATOR).collect();
    if !extension.is_empty() {
        path.set_extension(extension);
    }
    path
}

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;
