//! # Tabula
//!
//! Client-side list management and hierarchical selection for business views.
//!
//! ## Features
//!
//! - **List Query Engine**: filter -> sort -> paginate over an in-memory collection
//! - **Explicit Field Access**: per-type accessor maps instead of reflection
//! - **Typed Comparators**: date, numeric, rank-table and text sort rules
//! - **Filter Predicates**: exact match, ranges, buckets, `field>=` comparison keys
//! - **Hierarchical Selection**: group/item multi-select with tri-state status
//! - **Configuration-Based**: menu trees, label tables and list declarations via YAML
//! - **Total by Construction**: malformed input never fails, it is clamped or ignored
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tabula::prelude::*;
//! use serde_json::json;
//!
//! let engine = ListQueryEngine::new(
//!     FieldConfig::<serde_json::Value>::from_record()
//!         .searchable(["subject", "customer"])
//!         .rank_table("priority", RankTable::from_pairs([("low", 1), ("high", 2)])),
//! );
//!
//! let records = vec![
//!     json!({"id": 1, "status": "NEW", "created_at": "2024-01-01"}),
//!     json!({"id": 2, "status": "DONE", "created_at": "2024-02-01"}),
//! ];
//!
//! let page = engine.apply(
//!     &records,
//!     &ListQuery::new().sort_by("created_at", SortDirection::Desc),
//! );
//! assert_eq!(page.total_count, 2);
//!
//! let model = HierarchicalSelectionModel::new(vec![MenuGroup::new(
//!     "g1",
//!     "Sales",
//!     vec![MenuItem::new("a", "Quotes", "/quotes"), MenuItem::new("b", "Orders", "/orders")],
//! )]);
//! let state = model.toggle_group_by_id(&SelectionState::new(), "g1");
//! assert_eq!(state.len(), 2);
//! ```

pub mod config;
pub mod core;
pub mod logging;
pub mod records;
pub mod storage;
pub mod views;

pub use crate::core::error::Result;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        comparator::{RankTable, SortComparator},
        engine::{ListQueryEngine, apply},
        error::{ConfigError, SourceError, TabulaError},
        field::FieldValue,
        field_config::FieldConfig,
        filters::{self, FilterOp, FilterPredicate},
        lookup::{LabelEntry, LabelTable},
        query::{ListQuery, PageResult, PaginationMeta, QueryParams, SortDirection},
        record::Record,
        selection::{
            GroupStatus, HierarchicalSelectionModel, MenuGroup, MenuItem, SelectionState,
            TriState, clear_all, group_status, select_all, toggle_group, toggle_item,
        },
        service::{DataSource, Listing, MutationSink},
    };

    // === Macros ===
    pub use crate::impl_record;

    // === Storage ===
    pub use crate::storage::{InMemoryDataSource, InMemoryMutationSink, Submission};

    // === Config ===
    pub use crate::config::{ListDefinition, SortKind, ViewsConfig};

    // === Views ===
    pub use crate::views::{AssignmentView, ListView, ViewStatus};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
