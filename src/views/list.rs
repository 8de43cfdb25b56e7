//! List view controller: raw records plus query state

use crate::core::engine::ListQueryEngine;
use crate::core::error::SourceError;
use crate::core::field::FieldValue;
use crate::core::field_config::FieldConfig;
use crate::core::filters;
use crate::core::query::{ListQuery, PageResult, QueryParams, SortDirection};
use crate::core::service::DataSource;
use crate::views::ViewStatus;
use indexmap::IndexMap;
use serde_json::Value;

/// State behind a filterable, sortable, paginated table
///
/// Every event handler mutates the query; [`page`](Self::page) derives the
/// visible rows on demand.
pub struct ListView<T> {
    records: Vec<T>,
    query: ListQuery,
    engine: ListQueryEngine<T>,
    status: ViewStatus,
}

impl<T: Clone> ListView<T> {
    pub fn new(config: FieldConfig<T>, query: ListQuery) -> Self {
        Self::with_engine(ListQueryEngine::new(config), query)
    }

    pub fn with_engine(engine: ListQueryEngine<T>, query: ListQuery) -> Self {
        Self {
            records: Vec::new(),
            query,
            engine,
            status: ViewStatus::Idle,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.status = ViewStatus::Ready;
    }

    /// Update the search text and go back to the first page
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
        self.query.page = 1;
    }

    /// Set a filter value and go back to the first page; `"all"` clears it
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        let field = field.into();
        let value = value.into();
        if filters::is_unrestricted(&value) {
            self.query.filters.shift_remove(&field);
        } else {
            self.query.filters.insert(field, value);
        }
        self.query.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.query.filters.clear();
        self.query.search_text.clear();
        self.query.page = 1;
    }

    /// Column header click: the same column flips direction, a new column
    /// starts ascending
    pub fn toggle_sort(&mut self, field: &str) {
        if self.query.sort_key.as_deref() == Some(field) {
            self.query.sort_direction = self.query.sort_direction.toggle();
        } else {
            self.query.sort_key = Some(field.to_string());
            self.query.sort_direction = SortDirection::Asc;
        }
    }

    pub fn set_page(&mut self, page: i64) {
        self.query.page = page;
    }

    /// Change the page size and go back to the first page
    pub fn set_page_size(&mut self, page_size: i64) {
        self.query.page_size = page_size;
        self.query.page = 1;
    }

    /// The visible page for the current query
    pub fn page(&self) -> PageResult<T> {
        self.engine.apply(&self.records, &self.query)
    }

    /// Record counts per value of a field, over all loaded records
    pub fn facet_counts(&self, field: &str) -> IndexMap<String, usize> {
        self.engine.facet_counts(&self.records, field)
    }
}

impl ListView<Value> {
    /// Fetch the raw collection from a data source
    ///
    /// On failure the previously loaded records are kept and the status
    /// records the error.
    pub async fn load(&mut self, source: &dyn DataSource, collection: &str) -> Result<(), SourceError> {
        self.status = ViewStatus::Loading;
        tracing::info!(collection, "loading list records");

        match source.list(collection, &QueryParams::default()).await {
            Ok(listing) => {
                tracing::info!(collection, total = listing.total, "list records loaded");
                self.records = listing.items;
                self.status = ViewStatus::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(collection, error = %e, "failed to load list records");
                self.status = ViewStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view() -> ListView<Value> {
        let mut view = ListView::new(
            FieldConfig::from_record().searchable(["subject"]),
            ListQuery::new().with_page_size(2),
        );
        view.set_records(vec![
            json!({"id": 1, "subject": "Printer jam", "status": "NEW"}),
            json!({"id": 2, "subject": "VPN down", "status": "OPEN"}),
            json!({"id": 3, "subject": "Printer toner", "status": "NEW"}),
        ]);
        view
    }

    #[test]
    fn test_toggle_sort() {
        let mut view = view();
        view.toggle_sort("subject");
        assert_eq!(view.query().sort_direction, SortDirection::Asc);
        view.toggle_sort("subject");
        assert_eq!(view.query().sort_direction, SortDirection::Desc);
        view.toggle_sort("id");
        assert_eq!(view.query().sort_key.as_deref(), Some("id"));
        assert_eq!(view.query().sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_filter_resets_page() {
        let mut view = view();
        view.set_page(2);
        view.set_filter("status", "NEW");
        assert_eq!(view.query().page, 1);
        assert_eq!(view.page().total_count, 2);

        view.set_filter("status", "all");
        assert!(view.query().filters.is_empty());
        assert_eq!(view.page().total_count, 3);
    }

    #[test]
    fn test_search_and_paging() {
        let mut view = view();
        assert_eq!(view.page().page_count, 2);
        view.set_search("printer");
        let page = view.page();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.page_count, 1);
    }

    #[test]
    fn test_facets() {
        let view = view();
        let counts = view.facet_counts("status");
        assert_eq!(counts.get("NEW"), Some(&2));
        assert_eq!(counts.get("OPEN"), Some(&1));
    }
}
