//! List query engine: filter, sort and paginate an in-memory collection
//!
//! The engine is a pure function of `(records, query, config)`. It never
//! mutates the caller's collection and never fails: out-of-range pages are
//! empty and invalid page values are clamped to 1.

use crate::core::field::FieldValue;
use crate::core::field_config::FieldConfig;
use crate::core::filters::{self, FilterOp};
use crate::core::query::{ListQuery, PageResult};
use indexmap::IndexMap;
use std::sync::Arc;

/// Derives list views for one record type
pub struct ListQueryEngine<T> {
    config: Arc<FieldConfig<T>>,
}

impl<T> ListQueryEngine<T> {
    pub fn new(config: FieldConfig<T>) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create an engine over a config shared with other views
    pub fn from_shared(config: Arc<FieldConfig<T>>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FieldConfig<T> {
        &self.config
    }

    /// Search, filter and sort without paging
    pub fn filter<'a>(&self, records: &'a [T], query: &ListQuery) -> Vec<&'a T> {
        filter_and_sort(records, query, &self.config)
    }

    /// Produce one page of the filtered, sorted collection
    pub fn apply(&self, records: &[T], query: &ListQuery) -> PageResult<T>
    where
        T: Clone,
    {
        apply(records, query, &self.config)
    }

    /// Number of records per distinct value of a field, in first-seen order
    ///
    /// Missing values are counted under the empty string.
    pub fn facet_counts(&self, records: &[T], field: &str) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for record in records {
            let key = self
                .config
                .value(record, field)
                .and_then(|v| v.to_search_text())
                .unwrap_or_default();
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }
}

impl<T> Clone for ListQueryEngine<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
        }
    }
}

/// Produce one page of `records` for `query`
pub fn apply<T: Clone>(records: &[T], query: &ListQuery, config: &FieldConfig<T>) -> PageResult<T> {
    let page = query.page();
    let page_size = query.page_size();

    let filtered = filter_and_sort(records, query, config);
    let total_count = filtered.len();
    let page_count = if total_count == 0 {
        0
    } else {
        total_count.div_ceil(page_size)
    };

    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<T> = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    tracing::debug!(
        total_count,
        page_count,
        page,
        page_size,
        returned = items.len(),
        "list query applied"
    );

    PageResult {
        items,
        total_count,
        page_count,
        page,
        page_size,
    }
}

fn filter_and_sort<'a, T>(records: &'a [T], query: &ListQuery, config: &FieldConfig<T>) -> Vec<&'a T> {
    let needle = query.search_text.trim().to_lowercase();

    let mut filtered: Vec<&T> = records
        .iter()
        .filter(|record| needle.is_empty() || matches_search(*record, &needle, config))
        .filter(|record| matches_filters(*record, query, config))
        .collect();

    if let Some(key) = query.sort_key.as_deref() {
        let comparator = config.comparator_for(key);
        let mut keyed: Vec<(Option<FieldValue>, &T)> = filtered
            .into_iter()
            .map(|record| (config.value(record, key), record))
            .collect();
        // sort_by is stable: ties keep input order in both directions
        keyed.sort_by(|(a, _), (b, _)| comparator.compare(a.as_ref(), b.as_ref(), query.sort_direction));
        filtered = keyed.into_iter().map(|(_, record)| record).collect();
    }

    filtered
}

fn matches_search<T>(record: &T, needle: &str, config: &FieldConfig<T>) -> bool {
    config.searchable_fields().iter().any(|field| {
        config
            .value(record, field)
            .and_then(|value| value.to_search_text())
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

fn matches_filters<T>(record: &T, query: &ListQuery, config: &FieldConfig<T>) -> bool {
    query.filters.iter().all(|(key, filter)| {
        if filters::is_unrestricted(filter) {
            return true;
        }

        if let Some(predicate) = config.predicate(key) {
            return predicate(config.value(record, key).as_ref(), filter);
        }

        let (field, op) = filters::split_filter_key(key);
        let value = config.value(record, field);
        match op {
            FilterOp::Eq => value.is_some_and(|v| v.matches(filter)),
            op => filters::compare(value.as_ref(), op, filter),
        }
    })
}
