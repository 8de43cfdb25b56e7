//! Typed error handling for tabula
//!
//! The list and selection logic in [`crate::core::engine`] and
//! [`crate::core::selection`] is total and never fails. Errors only come from
//! the edges of the crate:
//!
//! - [`ConfigError`]: loading or validating declarative view configuration
//! - [`SourceError`]: the external data source or mutation sink failed
//!
//! # Example
//!
//! ```rust,ignore
//! use tabula::prelude::*;
//!
//! match view.load(&source, "tickets").await {
//!     Ok(()) => {}
//!     Err(SourceError::NotFound { collection }) => {
//!         println!("no such collection: {}", collection);
//!     }
//!     Err(e) => eprintln!("load failed: {}", e),
//! }
//! ```

use thiserror::Error;

/// Result alias using [`TabulaError`]
pub type Result<T> = std::result::Result<T, TabulaError>;

/// The main error type for tabula
#[derive(Debug, Error)]
pub enum TabulaError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Collaborator (data source / mutation sink) errors
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl TabulaError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TabulaError::Config(e) => e.error_code(),
            TabulaError::Source(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be parsed
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration parsed but is inconsistent
    #[error("Invalid config: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_IO_ERROR",
            ConfigError::Yaml(_) => "CONFIG_PARSE_ERROR",
            ConfigError::Invalid { .. } => "CONFIG_INVALID",
        }
    }
}

// =============================================================================
// Source Errors
// =============================================================================

/// Errors reported by external collaborators
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The requested collection does not exist
    #[error("Collection '{collection}' not found")]
    NotFound { collection: String },

    /// The collaborator could not be reached
    #[error("Data source unavailable: {message}")]
    Unavailable { message: String },

    /// The collaborator refused a submission
    #[error("Submission for '{entity_id}' rejected: {message}")]
    Rejected { entity_id: String, message: String },
}

impl SourceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::NotFound { .. } => "COLLECTION_NOT_FOUND",
            SourceError::Unavailable { .. } => "SOURCE_UNAVAILABLE",
            SourceError::Rejected { .. } => "SUBMISSION_REJECTED",
        }
    }
}
