//! Configuration loading and management
//!
//! Menu trees, status label tables and list declarations are static data,
//! loaded once from YAML and treated as immutable afterwards.
//!
//! ```yaml
//! menu_groups:
//!   - id: sales
//!     label: Sales
//!     items:
//!       - { id: quotes, name: Quotes, path: /sales/quotes }
//! lookups:
//!   ticket_status:
//!     fallback: { label: Unknown, color: gray }
//!     entries:
//!       NEW: { label: New, color: blue }
//! lists:
//!   tickets:
//!     searchable: [subject, customer]
//!     sortable:
//!       created_at: date
//!       priority: rank
//!     rank_tables:
//!       priority: { ranks: { low: 1, medium: 2, high: 3 } }
//!     default_sort: created_at
//!     default_direction: desc
//!     page_size: 10
//! ```

use crate::core::comparator::{RankTable, SortComparator};
use crate::core::error::ConfigError;
use crate::core::field_config::FieldConfig;
use crate::core::lookup::LabelTable;
use crate::core::query::{DEFAULT_PAGE_SIZE, ListQuery, SortDirection};
use crate::core::selection::MenuGroup;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Comparator kind declared for a sortable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    Date,
    Numeric,
    Rank,
    Text,
}

/// Declaration of one list view over JSON records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListDefinition {
    /// Fields matched by free-text search
    pub searchable: Vec<String>,

    /// Sortable fields and their comparator kind
    pub sortable: IndexMap<String, SortKind>,

    /// Rank tables for `rank` fields
    pub rank_tables: HashMap<String, RankTable>,

    /// Initial sort key
    pub default_sort: Option<String>,

    pub default_direction: SortDirection,

    /// Initial page size
    pub page_size: Option<i64>,
}

impl ListDefinition {
    /// Build the field config for JSON records
    ///
    /// A `rank` field without a rank table sorts as text; see
    /// [`ViewsConfig::validate`].
    pub fn field_config(&self) -> FieldConfig<Value> {
        let mut config =
            FieldConfig::<Value>::from_record().searchable(self.searchable.iter().cloned());

        for (field, kind) in &self.sortable {
            let comparator = match kind {
                SortKind::Date => SortComparator::Date,
                SortKind::Numeric => SortComparator::Numeric,
                SortKind::Text => SortComparator::Text,
                SortKind::Rank => match self.rank_tables.get(field) {
                    Some(table) => SortComparator::Rank(table.clone()),
                    None => SortComparator::Text,
                },
            };
            config = config.sort_comparator(field.clone(), comparator);
        }

        config
    }

    /// The query a view starts with
    pub fn default_query(&self) -> ListQuery {
        ListQuery {
            sort_key: self.default_sort.clone(),
            sort_direction: self.default_direction,
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            ..ListQuery::default()
        }
    }
}

/// Complete configuration for the views
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Menu/permission tree used by assignment views
    pub menu_groups: Vec<MenuGroup>,

    /// Status label tables by name
    pub lookups: HashMap<String, LabelTable>,

    /// List declarations by view name
    pub lists: HashMap<String, ListDefinition>,
}

impl ViewsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        tracing::debug!(
            menu_groups = config.menu_groups.len(),
            lookups = config.lookups.len(),
            lists = config.lists.len(),
            "views config loaded"
        );
        Ok(config)
    }

    /// Merge several configurations
    ///
    /// Later configs win for lookups and lists with the same name. Menu
    /// groups with the same id are merged: the later label wins and items
    /// whose id the group does not already hold are appended.
    pub fn merge(configs: Vec<ViewsConfig>) -> Self {
        let mut merged = ViewsConfig::default();

        for config in configs {
            for group in config.menu_groups {
                match merged.menu_groups.iter_mut().find(|g| g.id == group.id) {
                    Some(existing) => {
                        existing.label = group.label;
                        for item in group.items {
                            if !existing.contains(&item.id) {
                                existing.items.push(item);
                            }
                        }
                    }
                    None => merged.menu_groups.push(group),
                }
            }
            merged.lookups.extend(config.lookups);
            merged.lists.extend(config.lists);
        }

        merged
    }

    /// Check the configuration for inconsistencies
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for group in &self.menu_groups {
            for item in &group.items {
                if !seen.insert(item.id.as_str()) {
                    return Err(ConfigError::Invalid {
                        message: format!("duplicate menu item id '{}'", item.id),
                    });
                }
            }
        }

        let mut names: Vec<&String> = self.lists.keys().collect();
        names.sort();
        for name in names {
            let list = &self.lists[name];
            for (field, kind) in &list.sortable {
                if *kind == SortKind::Rank && !list.rank_tables.contains_key(field) {
                    return Err(ConfigError::Invalid {
                        message: format!(
                            "list '{}' sorts '{}' by rank but declares no rank table",
                            name, field
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn list(&self, name: &str) -> Option<&ListDefinition> {
        self.lists.get(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&LabelTable> {
        self.lookups.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;
    use serde_json::json;

    const YAML: &str = r#"
menu_groups:
  - id: sales
    label: Sales
    items:
      - { id: quotes, name: Quotes, path: /sales/quotes }
      - { id: orders, name: Orders, path: /sales/orders }
lookups:
  ticket_status:
    fallback: { label: Unknown, color: gray }
    entries:
      NEW: { label: New, color: blue }
lists:
  tickets:
    searchable: [subject]
    sortable:
      created_at: date
      priority: rank
    rank_tables:
      priority:
        ranks: { low: 1, medium: 2, high: 3 }
    default_sort: created_at
    default_direction: desc
    page_size: 10
"#;

    #[test]
    fn test_yaml_loading() {
        let config = ViewsConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.menu_groups.len(), 1);
        assert_eq!(config.menu_groups[0].items.len(), 2);
        assert_eq!(config.lookup("ticket_status").unwrap().resolve("X").label, "Unknown");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_query() {
        let config = ViewsConfig::from_yaml_str(YAML).unwrap();
        let query = config.list("tickets").unwrap().default_query();
        assert_eq!(query.sort_key.as_deref(), Some("created_at"));
        assert_eq!(query.sort_direction, SortDirection::Desc);
        assert_eq!(query.page_size(), 10);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_field_config_from_definition() {
        let config = ViewsConfig::from_yaml_str(YAML).unwrap();
        let fields = config.list("tickets").unwrap().field_config();
        assert!(matches!(*fields.comparator_for("priority"), SortComparator::Rank(_)));
        assert_eq!(
            fields.value(&json!({"subject": "Printer"}), "subject"),
            Some(FieldValue::from("Printer"))
        );
    }

    #[test]
    fn test_rank_without_table_is_invalid() {
        let yaml = r#"
lists:
  alerts:
    sortable:
      severity: rank
"#;
        let config = ViewsConfig::from_yaml_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_INVALID");
    }

    #[test]
    fn test_malformed_yaml() {
        let err = ViewsConfig::from_yaml_str("menu_groups: [").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_PARSE_ERROR");
    }
}
