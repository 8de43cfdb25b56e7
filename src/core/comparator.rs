//! Per-field sort comparators

use crate::core::field::FieldValue;
use crate::core::query::SortDirection;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Rank table for priority-like enum fields
///
/// Values are ordered by their rank, not lexicographically. Unknown or
/// missing values take `default_rank`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTable {
    /// Enum value -> rank
    #[serde(default)]
    pub ranks: IndexMap<String, i64>,

    /// Rank used for values absent from the table
    #[serde(default)]
    pub default_rank: i64,
}

impl RankTable {
    /// Create an empty rank table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rank table from `(value, rank)` pairs
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        Self {
            ranks: pairs.into_iter().map(|(k, r)| (k.into(), r)).collect(),
            default_rank: 0,
        }
    }

    pub fn with_rank(mut self, value: impl Into<String>, rank: i64) -> Self {
        self.ranks.insert(value.into(), rank);
        self
    }

    pub fn with_default(mut self, rank: i64) -> Self {
        self.default_rank = rank;
        self
    }

    /// Rank of a (possibly missing) field value
    pub fn rank_of(&self, value: Option<&FieldValue>) -> i64 {
        value
            .and_then(FieldValue::to_search_text)
            .and_then(|key| self.ranks.get(&key).copied())
            .unwrap_or(self.default_rank)
    }
}

/// Comparison rule for one sort key
#[derive(Debug, Clone, PartialEq)]
pub enum SortComparator {
    /// Parsed timestamp; missing or invalid dates are epoch 0
    Date,
    /// Numeric; missing or non-numeric values are 0
    Numeric,
    /// Caller-supplied rank table
    Rank(RankTable),
    /// Lexicographic text; missing values are the empty string. Two
    /// numbers still compare numerically.
    Text,
}

fn date_field_regex() -> &'static Regex {
    static DATE_FIELD_REGEX: OnceLock<Regex> = OnceLock::new();
    DATE_FIELD_REGEX.get_or_init(|| {
        // created_at, createdAt, due_date, timestamp, start_time, dueDate...
        Regex::new(r"(?i:(^|_)(date|time|datetime)(_|$|stamp))|_at$|[a-z0-9](At|Date|Time)$")
            .expect("valid date field pattern")
    })
}

impl SortComparator {
    /// Comparator implied by the field name alone
    pub fn infer(field: &str) -> Self {
        if Self::is_date_like(field) {
            SortComparator::Date
        } else {
            SortComparator::Text
        }
    }

    /// Whether a field name follows a date/time naming convention
    pub fn is_date_like(field: &str) -> bool {
        date_field_regex().is_match(field)
    }

    /// Compare two (possibly missing) values in ascending order
    pub fn compare_values(&self, a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        match self {
            SortComparator::Date => timestamp(a).cmp(&timestamp(b)),
            SortComparator::Numeric => number(a).total_cmp(&number(b)),
            SortComparator::Rank(table) => table.rank_of(a).cmp(&table.rank_of(b)),
            SortComparator::Text => match (a, b) {
                (Some(x), Some(y)) if x.is_numeric() && y.is_numeric() => {
                    number(a).total_cmp(&number(b))
                }
                _ => text(a).cmp(&text(b)),
            },
        }
    }

    /// Compare two values honoring the sort direction
    ///
    /// Ties stay `Equal` in both directions so a stable sort keeps input order.
    pub fn compare(
        &self,
        a: Option<&FieldValue>,
        b: Option<&FieldValue>,
        direction: SortDirection,
    ) -> Ordering {
        let ordering = self.compare_values(a, b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn timestamp(value: Option<&FieldValue>) -> i64 {
    value.and_then(FieldValue::as_timestamp).unwrap_or(0)
}

fn number(value: Option<&FieldValue>) -> f64 {
    value.and_then(FieldValue::as_number).unwrap_or(0.0)
}

fn text(value: Option<&FieldValue>) -> String {
    value.and_then(FieldValue::to_search_text).unwrap_or_default()
}
