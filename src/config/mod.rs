//! Per-call query settings
//!
//! Settings are an explicit struct with defaulted fields rather than an
//! ad-hoc merged bag: a caller supplies only what it wants to change and
//! every other field keeps its default, including fields nested under
//! `sort`. Settings documents can also be loaded from JSON or YAML strings.

use crate::core::dataset::Dataset;
use crate::core::error::{RepoError, RepoResult};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Container shape of a query result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputShape {
    /// Keyed form: original mapping keys, or sequence indices
    #[default]
    Mapping,
    /// Ordered list of records
    Sequence,
}

impl FromStr for OutputShape {
    type Err = RepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mapping" => Ok(OutputShape::Mapping),
            "sequence" => Ok(OutputShape::Sequence),
            _ => Err(RepoError::UnknownShape {
                given: s.to_string(),
            }),
        }
    }
}

// Strict on purpose: an unrecognized shape in a settings document is a
// caller configuration error and fails the parse.
impl<'de> Deserialize<'de> for OutputShape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Sort direction for `filter` results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse leniently: `asc` or `desc` in any case, anything else falls
    /// back to ascending
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => {
                tracing::warn!(direction = other, "unrecognized sort direction, using asc");
                SortDirection::Asc
            }
        }
    }

    /// Orient a natural (ascending) comparison in this direction
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SortDirection::parse_lenient(&s))
    }
}

/// Sort block of the settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettings {
    pub direction: SortDirection,
}

/// Per-call query configuration.
///
/// Defaults: `Mapping` output shape, no context override, ascending sort.
///
/// # Example
///
/// ```
/// use recall::config::{OutputShape, QuerySettings, SortDirection};
///
/// let settings = QuerySettings::new()
///     .with_shape(OutputShape::Sequence)
///     .with_direction(SortDirection::Desc);
/// assert!(settings.context.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Desired output container shape
    pub shape: OutputShape,

    /// Alternate dataset to query instead of the repository's own, for this
    /// call only; never merged with the instance dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Dataset>,

    /// Sort directives
    pub sort: SortSettings,
}

impl QuerySettings {
    /// Settings with every field at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an output shape
    pub fn with_shape(mut self, shape: OutputShape) -> Self {
        self.shape = shape;
        self
    }

    /// Supply a context override
    pub fn with_context(mut self, context: impl Into<Dataset>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the sort direction
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.sort.direction = direction;
        self
    }

    /// Load settings from a JSON string
    pub fn from_json_str(json: &str) -> RepoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> RepoResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
