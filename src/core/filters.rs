//! Reusable filter predicates
//!
//! A predicate receives the record's field value (`None` when the field is
//! missing) and the filter value taken from the query. Predicates replace
//! the default exact-match rule for the field they are registered on.

use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// A shareable filter predicate
pub type FilterPredicate = Arc<dyn Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync>;

/// Comparison operator carried by a filter key suffix (`amount>=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Split a filter key into its field name and comparison operator
///
/// `"amount>="` -> `("amount", Gte)`, `"status"` -> `("status", Eq)`
pub fn split_filter_key(key: &str) -> (&str, FilterOp) {
    const SUFFIXES: [(&str, FilterOp); 4] = [
        (">=", FilterOp::Gte),
        ("<=", FilterOp::Lte),
        (">", FilterOp::Gt),
        ("<", FilterOp::Lt),
    ];

    for (suffix, op) in SUFFIXES {
        if let Some(field) = key.strip_suffix(suffix) {
            return (field.trim_end(), op);
        }
    }
    (key, FilterOp::Eq)
}

/// Whether a filter value means "no restriction" (`null`, empty, `"all"`)
pub fn is_unrestricted(filter: &FieldValue) -> bool {
    match filter {
        FieldValue::Null => true,
        FieldValue::String(s) => {
            let s = s.trim();
            s.is_empty() || s.eq_ignore_ascii_case("all")
        }
        _ => false,
    }
}

/// Apply a comparison operator, numerically when both sides are numbers and
/// by timestamp when both sides are dates. Incomparable values never match.
pub fn compare(value: Option<&FieldValue>, op: FilterOp, filter: &FieldValue) -> bool {
    let Some(value) = value else {
        return false;
    };

    if op == FilterOp::Eq {
        return value.matches(filter);
    }

    let ordering = match (value.as_number(), filter.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => match (value.as_timestamp(), filter.as_timestamp()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        },
    };

    let Some(ordering) = ordering else {
        return false;
    };

    match op {
        FilterOp::Eq => ordering.is_eq(),
        FilterOp::Gt => ordering.is_gt(),
        FilterOp::Gte => ordering.is_ge(),
        FilterOp::Lt => ordering.is_lt(),
        FilterOp::Lte => ordering.is_le(),
    }
}

/// Filter: exact match (the default rule)
pub fn equals() -> impl Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync + Clone {
    |value: Option<&FieldValue>, filter: &FieldValue| value.is_some_and(|v| v.matches(filter))
}

/// Filter: case-insensitive substring
pub fn contains_ci() -> impl Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync + Clone {
    |value: Option<&FieldValue>, filter: &FieldValue| {
        let Some(needle) = filter.to_search_text() else {
            return true;
        };
        value
            .and_then(FieldValue::to_search_text)
            .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase()))
    }
}

/// Filter: value is one of a comma-separated list (or JSON array)
pub fn one_of() -> impl Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync + Clone {
    |value: Option<&FieldValue>, filter: &FieldValue| {
        let Some(value) = value else {
            return false;
        };
        match filter {
            FieldValue::String(list) => list
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .any(|entry| value.matches(&FieldValue::from(entry))),
            FieldValue::Json(Value::Array(entries)) => entries
                .iter()
                .any(|entry| value.matches(&FieldValue::from(entry))),
            other => value.matches(other),
        }
    }
}

/// Filter: record value is at least the numeric filter value
pub fn at_least() -> impl Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync + Clone {
    |value: Option<&FieldValue>, filter: &FieldValue| compare(value, FilterOp::Gte, filter)
}

/// Filter: record value is at most the numeric filter value
pub fn at_most() -> impl Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync + Clone {
    |value: Option<&FieldValue>, filter: &FieldValue| compare(value, FilterOp::Lte, filter)
}

/// Filter: numeric inclusive range
///
/// The filter value is `"min..max"` (either side may be empty), a two-element
/// JSON array, or a `{"min", "max"}` object. An unparsable range does not
/// restrict.
pub fn range() -> impl Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync + Clone {
    |value: Option<&FieldValue>, filter: &FieldValue| {
        let Some(bounds) = parse_bounds(filter, FieldValue::as_number) else {
            tracing::debug!(?filter, "ignoring unparsable range filter");
            return true;
        };
        bounds.admits(value.and_then(FieldValue::as_number))
    }
}

/// Filter: date inclusive range, e.g. `"2024-01-01..2024-01-31"`
pub fn date_range() -> impl Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync + Clone {
    |value: Option<&FieldValue>, filter: &FieldValue| {
        let Some(bounds) = parse_bounds(filter, FieldValue::as_timestamp) else {
            tracing::debug!(?filter, "ignoring unparsable date range filter");
            return true;
        };
        bounds.admits(value.and_then(FieldValue::as_timestamp))
    }
}

/// Filter: named numeric buckets, as offered by a range select box
///
/// ```rust,ignore
/// let amount = buckets([
///     ("small", (None, Some(1_000.0))),
///     ("large", (Some(1_000.0), None)),
/// ]);
/// ```
///
/// An unknown bucket name does not restrict.
pub fn buckets<I, K>(
    buckets: I,
) -> impl Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync + Clone
where
    I: IntoIterator<Item = (K, (Option<f64>, Option<f64>))>,
    K: Into<String>,
{
    let table: Arc<IndexMap<String, Bounds<f64>>> = Arc::new(
        buckets
            .into_iter()
            .map(|(name, (min, max))| (name.into(), Bounds { min, max }))
            .collect(),
    );

    move |value: Option<&FieldValue>, filter: &FieldValue| {
        let Some(bounds) = filter.as_string().and_then(|name| table.get(name)) else {
            return true;
        };
        bounds.admits(value.and_then(FieldValue::as_number))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    fn admits(&self, value: Option<T>) -> bool {
        if self.min.is_none() && self.max.is_none() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

fn parse_bounds<T>(filter: &FieldValue, read: impl Fn(&FieldValue) -> Option<T>) -> Option<Bounds<T>> {
    let (low, high) = match filter {
        FieldValue::String(s) => {
            let (low, high) = s.split_once("..")?;
            (FieldValue::from(low.trim()), FieldValue::from(high.trim()))
        }
        FieldValue::Json(Value::Array(items)) if items.len() == 2 => {
            (FieldValue::from(&items[0]), FieldValue::from(&items[1]))
        }
        FieldValue::Json(Value::Object(map)) => {
            let side = |keys: [&str; 2]| {
                keys.iter()
                    .find_map(|k| map.get(*k))
                    .map(FieldValue::from)
                    .unwrap_or(FieldValue::Null)
            };
            (side(["min", "from"]), side(["max", "to"]))
        }
        _ => return None,
    };

    let bound = |side: FieldValue| -> Result<Option<T>, ()> {
        if is_blank(&side) {
            Ok(None)
        } else {
            read(&side).map(Some).ok_or(())
        }
    };

    Some(Bounds {
        min: bound(low).ok()?,
        max: bound(high).ok()?,
    })
}

fn is_blank(value: &FieldValue) -> bool {
    match value {
        FieldValue::Null => true,
        FieldValue::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
