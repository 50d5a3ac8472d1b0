//! Typed error handling for the recall repository
//!
//! Lookups that find nothing are not errors here: they return `None` or an
//! empty result. `RepoError` covers the conditions that are genuinely
//! invalid input, so callers can match them specifically instead of dealing
//! with stringly-typed failures.

use thiserror::Error;

/// Errors surfaced by dataset construction, settings parsing, and
/// like-pattern compilation
#[derive(Debug, Error)]
pub enum RepoError {
    /// An output shape string was neither `mapping` nor `sequence`
    #[error("unrecognized output shape '{given}' (expected 'mapping' or 'sequence')")]
    UnknownShape { given: String },

    /// A like pattern failed to compile as a regular expression
    #[error("invalid like pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A dataset value was neither an object nor an array
    #[error("dataset must be an object or an array, got {kind}")]
    InvalidDataset { kind: &'static str },

    /// A settings document failed to parse
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::InvalidSettings(err.to_string())
    }
}

impl From<serde_yaml::Error> for RepoError {
    fn from(err: serde_yaml::Error) -> Self {
        RepoError::InvalidSettings(err.to_string())
    }
}

/// A specialized Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
