//! Record access
//!
//! The engine never reflects over records. Every field read goes through a
//! [`FieldConfig`](crate::core::field_config::FieldConfig) accessor, and
//! [`Record`] is the default source those accessors fall back to.

use crate::core::field::FieldValue;
use serde_json::{Map, Value};

/// Trait for types that expose named fields
pub trait Record {
    /// Get the value of a specific field by name
    ///
    /// Returns `None` when the record has no such field.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

impl Record for Map<String, Value> {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        lookup_path(self, field).map(FieldValue::from)
    }
}

impl Record for Value {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        self.as_object().and_then(|map| map.field_value(field))
    }
}

/// Resolve a field name, walking dotted paths into nested objects.
///
/// A literal key containing dots wins over the nested interpretation.
fn lookup_path<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(path) {
        return Some(value);
    }

    let mut parts = path.split('.');
    let mut current = map.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_access() {
        let record = json!({"id": 1, "status": "NEW", "note": null});
        assert_eq!(record.field_value("id"), Some(FieldValue::Integer(1)));
        assert_eq!(record.field_value("status"), Some(FieldValue::from("NEW")));
        assert_eq!(record.field_value("note"), Some(FieldValue::Null));
        assert_eq!(record.field_value("missing"), None);
    }

    #[test]
    fn test_dotted_path() {
        let record = json!({"customer": {"name": "Acme", "tier": {"level": 2}}});
        assert_eq!(
            record.field_value("customer.name"),
            Some(FieldValue::from("Acme"))
        );
        assert_eq!(
            record.field_value("customer.tier.level"),
            Some(FieldValue::Integer(2))
        );
        assert_eq!(record.field_value("customer.email"), None);
    }

    #[test]
    fn test_literal_dotted_key_wins() {
        let record = json!({"a.b": "literal", "a": {"b": "nested"}});
        assert_eq!(record.field_value("a.b"), Some(FieldValue::from("literal")));
    }

    #[test]
    fn test_non_object_has_no_fields() {
        assert_eq!(json!([1, 2, 3]).field_value("0"), None);
        assert_eq!(json!("text").field_value("len"), None);
    }
}
