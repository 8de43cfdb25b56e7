//! Per-view field configuration
//!
//! A [`FieldConfig`] tells the engine how to read fields from a record type
//! and which fields take part in search, filtering and sorting.
//!
//! # Example
//! ```rust,ignore
//! use tabula::prelude::*;
//!
//! let config = FieldConfig::<Ticket>::new()
//!     .accessor("subject", |t: &Ticket| t.subject.clone())
//!     .accessor("priority", |t: &Ticket| t.priority.clone())
//!     .accessor("created_at", |t: &Ticket| t.created_at)
//!     .searchable(["subject"])
//!     .rank_table("priority", RankTable::from_pairs([("low", 1), ("high", 2)]));
//! ```

use crate::core::comparator::{RankTable, SortComparator};
use crate::core::field::FieldValue;
use crate::core::filters::FilterPredicate;
use crate::core::record::Record;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Reads one field from a record
pub type Accessor<T> = Arc<dyn Fn(&T) -> Option<FieldValue> + Send + Sync>;

/// Reads any field by name, used when no explicit accessor is declared
pub type FallbackAccessor<T> = Arc<dyn Fn(&T, &str) -> Option<FieldValue> + Send + Sync>;

/// Field declarations for one record type
pub struct FieldConfig<T> {
    accessors: HashMap<String, Accessor<T>>,
    fallback: Option<FallbackAccessor<T>>,
    searchable: Vec<String>,
    predicates: HashMap<String, FilterPredicate>,
    comparators: HashMap<String, SortComparator>,
}

impl<T> FieldConfig<T> {
    /// Create a config with no accessors
    pub fn new() -> Self {
        Self {
            accessors: HashMap::new(),
            fallback: None,
            searchable: Vec::new(),
            predicates: HashMap::new(),
            comparators: HashMap::new(),
        }
    }

    /// Declare an explicit accessor for a field
    ///
    /// The accessor may return anything convertible to [`FieldValue`];
    /// `Option::None` reads as [`FieldValue::Null`].
    pub fn accessor<F, V>(mut self, field: impl Into<String>, read: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<FieldValue>,
    {
        self.accessors
            .insert(field.into(), Arc::new(move |record: &T| Some(read(record).into())));
        self
    }

    /// Fields matched by free-text search
    pub fn searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Replace the exact-match rule for a filter key
    pub fn filter_predicate<P>(mut self, field: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(Option<&FieldValue>, &FieldValue) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(field.into(), Arc::new(predicate));
        self
    }

    /// Declare the comparator for a sort key
    pub fn sort_comparator(mut self, field: impl Into<String>, comparator: SortComparator) -> Self {
        self.comparators.insert(field.into(), comparator);
        self
    }

    /// Sort a priority-like field by rank instead of lexicographically
    pub fn rank_table(self, field: impl Into<String>, table: RankTable) -> Self {
        self.sort_comparator(field, SortComparator::Rank(table))
    }

    /// Read a field from a record
    pub fn value(&self, record: &T, field: &str) -> Option<FieldValue> {
        match self.accessors.get(field) {
            Some(read) => read(record),
            None => self.fallback.as_ref().and_then(|read| read(record, field)),
        }
    }

    /// Comparator for a sort key: declared, else inferred from the name
    pub fn comparator_for(&self, field: &str) -> Cow<'_, SortComparator> {
        match self.comparators.get(field) {
            Some(comparator) => Cow::Borrowed(comparator),
            None => Cow::Owned(SortComparator::infer(field)),
        }
    }

    /// Predicate registered for a filter key
    pub fn predicate(&self, field: &str) -> Option<&FilterPredicate> {
        self.predicates.get(field)
    }

    pub fn searchable_fields(&self) -> &[String] {
        &self.searchable
    }
}

impl<T: Record + 'static> FieldConfig<T> {
    /// Create a config that reads every field through [`Record`]
    pub fn from_record() -> Self {
        let mut config = Self::new();
        config.fallback = Some(Arc::new(|record: &T, field: &str| record.field_value(field)));
        config
    }
}

impl<T> Default for FieldConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FieldConfig<T> {
    fn clone(&self) -> Self {
        Self {
            accessors: self.accessors.clone(),
            fallback: self.fallback.clone(),
            searchable: self.searchable.clone(),
            predicates: self.predicates.clone(),
            comparators: self.comparators.clone(),
        }
    }
}

impl<T> fmt::Debug for FieldConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut accessors: Vec<&String> = self.accessors.keys().collect();
        accessors.sort();
        let mut predicates: Vec<&String> = self.predicates.keys().collect();
        predicates.sort();

        f.debug_struct("FieldConfig")
            .field("accessors", &accessors)
            .field("record_fallback", &self.fallback.is_some())
            .field("searchable", &self.searchable)
            .field("predicates", &predicates)
            .field("comparators", &self.comparators)
            .finish()
    }
}
