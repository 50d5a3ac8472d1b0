//! # Recall
//!
//! An in-memory repository for ad-hoc querying of already-loaded datasets.
//!
//! ## Features
//!
//! - **Mapping or sequence datasets**: wrap a keyed collection or an ordered
//!   list of records, iterated in insertion order
//! - **Lookup**: exact key lookup and first-match field search
//! - **Filtering**: strict and coercing field equality, plus like-matching
//!   with case-insensitive multiline regular expressions, over one field or
//!   many
//! - **Sorting**: stable sort by any field, including nested dot-paths
//!   (`"a.b.c"`), ascending or descending
//! - **Configurable output shape**: results as a keyed mapping or an ordered
//!   sequence, chosen per call
//! - **Context overrides**: point a single call at an alternate dataset
//!   without rebuilding the repository
//!
//! ## Quick Start
//!
//! ```
//! use recall::prelude::*;
//! use serde_json::json;
//!
//! let repo = Repository::from_value(json!({
//!     "1": {"name": "John", "city": "Paris"},
//!     "2": {"name": "Anna", "city": "Berlin"},
//! }))
//! .unwrap();
//!
//! // Exact key lookup
//! let john = repo.find_by_id(1).unwrap();
//! assert_eq!(john["city"], json!("Paris"));
//!
//! // Like-matching, shaped as a sequence
//! let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
//! let matched = repo.fetch_by_field_like("name", "jo", &settings).unwrap();
//! assert_eq!(matched.len(), 1);
//! ```

pub mod config;
pub mod core;
pub mod repository;

/// Re-exports of commonly used types
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        dataset::Dataset,
        error::{RepoError, RepoResult},
        key::Key,
    };

    // === Settings ===
    pub use crate::config::{OutputShape, QuerySettings, SortDirection, SortSettings};

    // === Repository ===
    pub use crate::repository::Repository;
}
