//! Field value types read from records

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Null,
    /// Nested object or array
    Json(Value),
}

/// Naive formats accepted for date-like strings, interpreted as UTC
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a date-like string into milliseconds since epoch
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` (naive
/// values are UTC) and plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float (integers widen)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Numeric reading used by numeric sorts and range filters.
    ///
    /// Like [`as_float`](Self::as_float) but also parses numeric strings.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::String(s) => s.trim().parse::<f64>().ok(),
            other => other.as_float(),
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Milliseconds since epoch, for date-like values
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            FieldValue::DateTime(dt) => Some(dt.timestamp_millis()),
            FieldValue::Integer(ms) => Some(*ms),
            FieldValue::String(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub(crate) fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }

    /// Text used for substring search and lexicographic sorting
    pub fn to_search_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::DateTime(dt) => Some(dt.to_rfc3339()),
            FieldValue::Json(v) => Some(v.to_string()),
            FieldValue::Null => None,
        }
    }

    /// Exact-match equality used by field filters.
    ///
    /// Numbers compare numerically across variants, and a textual filter value
    /// matches a number, boolean or date when it parses to the same value.
    pub fn matches(&self, filter: &FieldValue) -> bool {
        if self == filter {
            return true;
        }

        // integers read as epoch milliseconds, as in `as_timestamp`
        if let (FieldValue::DateTime(dt), FieldValue::Integer(ms))
        | (FieldValue::Integer(ms), FieldValue::DateTime(dt)) = (self, filter)
        {
            return dt.timestamp_millis() == *ms;
        }

        if self.is_numeric() || filter.is_numeric() {
            return match (self.as_number(), filter.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };
        }

        match (self, filter) {
            (FieldValue::Boolean(b), FieldValue::String(s))
            | (FieldValue::String(s), FieldValue::Boolean(b)) => {
                s.trim().eq_ignore_ascii_case(if *b { "true" } else { "false" })
            }
            (FieldValue::DateTime(dt), FieldValue::String(s))
            | (FieldValue::String(s), FieldValue::DateTime(dt)) => {
                parse_timestamp(s) == Some(dt.timestamp_millis())
            }
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Integer(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Integer(i64::from(i))
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        i64::try_from(i)
            .map(FieldValue::Integer)
            .unwrap_or(FieldValue::Float(i as f64))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        FieldValue::DateTime(dt)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Null),
            },
            Value::String(s) => FieldValue::String(s),
            nested => FieldValue::Json(nested),
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        FieldValue::from(value.clone())
    }
}
