//! Tests for loading and merging views configuration

use serde_json::json;
use std::io::Write;
use tabula::prelude::*;
use tempfile::NamedTempFile;

const BASE: &str = r#"
menu_groups:
  - id: sales
    label: Sales
    items:
      - { id: quotes, name: Quotes, path: /sales/quotes }
lookups:
  alert_status:
    fallback: { label: Unknown, color: gray }
    entries:
      OPEN: { label: Open, color: red, icon: bell }
      CLOSED: { label: Closed, color: green }
lists:
  alerts:
    searchable: [message, source]
    sortable:
      raised_at: date
      severity: rank
    rank_tables:
      severity:
        ranks: { info: 1, warning: 2, critical: 3 }
    default_sort: raised_at
    default_direction: desc
"#;

const OVERRIDE: &str = r#"
menu_groups:
  - id: sales
    label: Sales
    items:
      - { id: quotes, name: Quotes, path: /sales/quotes }
      - { id: orders, name: Orders, path: /sales/orders }
  - id: hr
    label: HR
    items:
      - { id: staff, name: Staff, path: /hr/staff }
lists:
  alerts:
    searchable: [message]
    page_size: 5
"#;

#[test]
fn test_merge_groups_by_id() {
    let base = ViewsConfig::from_yaml_str(BASE).unwrap();
    let extra = ViewsConfig::from_yaml_str(OVERRIDE).unwrap();
    let merged = ViewsConfig::merge(vec![base, extra]);

    assert_eq!(merged.menu_groups.len(), 2);
    let sales: Vec<&str> = merged.menu_groups[0]
        .items
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(sales, vec!["quotes", "orders"]);
    assert_eq!(merged.menu_groups[1].id, "hr");
}

#[test]
fn test_merge_later_group_label_wins() {
    let renamed = ViewsConfig::from_yaml_str(
        r#"
menu_groups:
  - id: sales
    label: Sales & Quotes
    items: []
"#,
    )
    .unwrap();
    let merged = ViewsConfig::merge(vec![ViewsConfig::from_yaml_str(BASE).unwrap(), renamed]);

    assert_eq!(merged.menu_groups.len(), 1);
    assert_eq!(merged.menu_groups[0].label, "Sales & Quotes");
    assert_eq!(merged.menu_groups[0].items.len(), 1);
}

#[test]
fn test_merge_later_list_wins() {
    let merged = ViewsConfig::merge(vec![
        ViewsConfig::from_yaml_str(BASE).unwrap(),
        ViewsConfig::from_yaml_str(OVERRIDE).unwrap(),
    ]);

    let alerts = merged.list("alerts").unwrap();
    assert_eq!(alerts.searchable, vec!["message".to_string()]);
    assert_eq!(alerts.default_query().page_size, 5);
    assert!(alerts.default_sort.is_none());

    // lookups only present in the base survive
    assert!(merged.lookup("alert_status").is_some());
}

#[test]
fn test_lookup_fallback() {
    let config = ViewsConfig::from_yaml_str(BASE).unwrap();
    let status = config.lookup("alert_status").unwrap();
    assert_eq!(status.resolve("OPEN").icon.as_deref(), Some("bell"));
    assert_eq!(status.resolve("CLOSED").color, "green");
    assert_eq!(status.resolve("ARCHIVED").label, "Unknown");
}

#[test]
fn test_list_definition_drives_engine() {
    let config = ViewsConfig::from_yaml_str(BASE).unwrap();
    let alerts = config.list("alerts").unwrap();
    let engine = ListQueryEngine::new(alerts.field_config());

    let records = vec![
        json!({"id": 1, "message": "disk full", "severity": "warning", "raised_at": "2024-06-01T10:00:00Z"}),
        json!({"id": 2, "message": "cpu spike", "severity": "critical", "raised_at": "2024-06-02T10:00:00Z"}),
        json!({"id": 3, "message": "disk slow", "severity": "info", "raised_at": "2024-05-30T10:00:00Z"}),
    ];

    let page = engine.apply(&records, &alerts.default_query());
    let ids: Vec<i64> = page.items.iter().filter_map(|r| r["id"].as_i64()).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    let query = alerts
        .default_query()
        .search("disk")
        .sort_by("severity", SortDirection::Desc);
    let ids: Vec<i64> = engine
        .apply(&records, &query)
        .items
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_validate_rejects_duplicate_items() {
    let yaml = r#"
menu_groups:
  - id: a
    label: A
    items: [{ id: x, name: X, path: /x }]
  - id: b
    label: B
    items: [{ id: x, name: X again, path: /x2 }]
"#;
    let config = ViewsConfig::from_yaml_str(yaml).unwrap();
    let err = config.validate().unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_INVALID");
    assert!(err.to_string().contains("'x'"));
}

#[test]
fn test_validate_rejects_rank_without_table() {
    let yaml = r#"
lists:
  tickets:
    sortable:
      priority: rank
"#;
    let config = ViewsConfig::from_yaml_str(yaml).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_from_yaml_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(BASE.as_bytes()).unwrap();

    let config = ViewsConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.menu_groups.len(), 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("views.yaml");

    let err = ViewsConfig::from_yaml_file(&path).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_IO_ERROR");
    assert!(err.to_string().contains("views.yaml"));
}

#[test]
fn test_malformed_yaml() {
    let err = ViewsConfig::from_yaml_str("menu_groups: {not: [a, list").unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_PARSE_ERROR");
}

#[test]
fn test_empty_yaml_is_default() {
    let config = ViewsConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, ViewsConfig::default());
}
