//! Core types: keys, datasets, record-value helpers, and errors

pub mod dataset;
pub mod error;
pub mod key;
pub mod value;

pub use dataset::Dataset;
pub use error::{RepoError, RepoResult};
pub use key::Key;
