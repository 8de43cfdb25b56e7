//! Core module containing the list query engine, selection model and their types

pub mod comparator;
pub mod engine;
pub mod error;
pub mod field;
pub mod field_config;
pub mod filters;
pub mod lookup;
pub mod query;
pub mod record;
pub mod selection;
pub mod service;

pub use comparator::{RankTable, SortComparator};
pub use engine::ListQueryEngine;
pub use error::{ConfigError, SourceError, TabulaError};
pub use field::FieldValue;
pub use field_config::FieldConfig;
pub use filters::{FilterOp, FilterPredicate};
pub use lookup::{LabelEntry, LabelTable};
pub use query::{ListQuery, PageResult, PaginationMeta, QueryParams, SortDirection};
pub use record::Record;
pub use selection::{
    GroupStatus, HierarchicalSelectionModel, MenuGroup, MenuItem, SelectionState, TriState,
};
pub use service::{DataSource, Listing, MutationSink};
