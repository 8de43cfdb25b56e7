//! Query parameters and pagination utilities

use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `asc` / `desc` (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    /// The opposite direction
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A list query: free-text search, field filters, sort and page window
///
/// `page` and `page_size` are kept as given; the [`page()`](Self::page) and
/// [`page_size()`](Self::page_size) getters clamp invalid values to 1.
///
/// # Example
/// ```rust,ignore
/// let query = ListQuery::new()
///     .search("acme")
///     .filter("status", "NEW")
///     .sort_by("created_at", SortDirection::Desc)
///     .with_page(2)
///     .with_page_size(10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Case-insensitive substring matched against searchable fields
    pub search_text: String,

    /// Field -> required value; `"all"` or empty means no restriction
    pub filters: IndexMap<String, FieldValue>,

    /// Field to sort by; `None` keeps input order
    pub sort_key: Option<String>,

    pub sort_direction: SortDirection,

    /// Page number (starts at 1)
    pub page: i64,

    /// Number of items per page
    pub page_size: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            filters: IndexMap::new(),
            sort_key: None,
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(field.into());
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        clamp_positive(self.page)
    }

    /// Get page size, ensuring minimum of 1
    pub fn page_size(&self) -> usize {
        clamp_positive(self.page_size)
    }

    /// Build a query from URL-style parameters
    pub fn from_params(params: &QueryParams) -> Self {
        let (sort_key, sort_direction) = params.sort_spec();
        Self {
            search_text: params.search.clone().unwrap_or_default(),
            filters: params.filter_map(),
            sort_key,
            sort_direction,
            page: params.page,
            page_size: params.limit,
        }
    }
}

fn clamp_positive(value: i64) -> usize {
    if value < 1 {
        tracing::debug!(value, "clamping non-positive page value to 1");
        1
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

/// Query parameters in their URL query string form
///
/// # Example
/// ```rust,ignore
/// GET /tickets?page=2&limit=10
/// GET /tickets?search=printer&filter={"status": "NEW"}&sort=created_at:desc
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: i64,

    /// Number of items per page
    pub limit: i64,

    /// Free-text search
    pub search: Option<String>,

    /// Filters as a JSON object, e.g. `{"status": "NEW", "amount>": 100}`
    pub filter: Option<String>,

    /// `field`, `field:asc` or `field:desc`
    pub sort: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            filter: None,
            sort: None,
        }
    }
}

impl QueryParams {
    /// Parse filter JSON string into Value
    pub fn filter_value(&self) -> Option<Value> {
        self.filter
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
    }

    /// Filters as field -> value; malformed or non-object JSON yields no filters
    pub fn filter_map(&self) -> IndexMap<String, FieldValue> {
        match self.filter_value() {
            Some(Value::Object(map)) => map
                .into_iter()
                .map(|(k, v)| (k, FieldValue::from(v)))
                .collect(),
            Some(_) | None => {
                if self.filter.is_some() {
                    tracing::debug!(filter = ?self.filter, "ignoring malformed filter parameter");
                }
                IndexMap::new()
            }
        }
    }

    /// Sort key and direction; an unknown direction sorts ascending
    pub fn sort_spec(&self) -> (Option<String>, SortDirection) {
        let Some(sort) = self.sort.as_deref() else {
            return (None, SortDirection::Asc);
        };

        let (field, direction) = match sort.rsplit_once(':') {
            Some((field, dir)) => (field, SortDirection::parse(dir).unwrap_or_default()),
            None => (sort, SortDirection::Asc),
        };

        let field = field.trim();
        if field.is_empty() {
            (None, direction)
        } else {
            (Some(field.to_string()), direction)
        }
    }
}

/// One page of a filtered, sorted collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Number of records after filtering
    pub total_count: usize,

    /// `ceil(total_count / page_size)`, 0 when empty
    pub page_count: usize,

    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,
}

impl<T> PageResult<T> {
    /// Whether the requested page lies past the last page
    pub fn is_past_end(&self) -> bool {
        self.page > self.page_count
    }

    /// Pagination metadata for this page
    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta::new(self.page, self.page_size, self.total_count)
    }

    /// Convert the item type, keeping the pagination fields
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_count: self.page_count,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        let start = (page - 1).saturating_mul(page_size);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: start.saturating_add(page_size) < total,
            has_prev: page > 1,
        }
    }
}
