//! Status label lookup tables
//!
//! Maps status keys to display entries (label, color, icon). Tables are
//! injected constant data; an unknown key resolves to the table's fallback.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Display entry for one status key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub label: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl LabelEntry {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A status -> label table with a caller-specified fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTable {
    #[serde(default)]
    pub entries: IndexMap<String, LabelEntry>,
    pub fallback: LabelEntry,
}

impl LabelTable {
    pub fn new(fallback: LabelEntry) -> Self {
        Self {
            entries: IndexMap::new(),
            fallback,
        }
    }

    pub fn with_entry(mut self, key: impl Into<String>, entry: LabelEntry) -> Self {
        self.entries.insert(key.into(), entry);
        self
    }

    /// Entry for `key`, or the fallback for unknown keys
    pub fn resolve(&self, key: &str) -> &LabelEntry {
        self.entries.get(key).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_falls_back() {
        let table = LabelTable::new(LabelEntry::new("Unknown", "gray"))
            .with_entry("NEW", LabelEntry::new("New", "blue"))
            .with_entry("DONE", LabelEntry::new("Done", "green").with_icon("check"));

        assert_eq!(table.resolve("NEW").label, "New");
        assert_eq!(table.resolve("DONE").icon.as_deref(), Some("check"));
        assert_eq!(table.resolve("ARCHIVED").label, "Unknown");
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["NEW", "DONE"]);
    }
}
