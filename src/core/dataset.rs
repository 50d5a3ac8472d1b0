//! Datasets: the collections a repository queries
//!
//! A dataset is either a keyed mapping of records or an ordered sequence of
//! records, mirroring the two container forms callers load data in. Mappings
//! preserve insertion order, and that order is the iteration order every
//! query scans in.

use crate::config::OutputShape;
use crate::core::error::{RepoError, RepoResult};
use crate::core::key::Key;
use crate::core::value::kind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A collection of records, keyed or ordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dataset {
    /// Records addressed by key, in insertion order
    Mapping(IndexMap<Key, Value>),
    /// Records addressed by position
    Sequence(Vec<Value>),
}

impl Dataset {
    /// Build a dataset from a JSON value: objects become mappings, arrays
    /// become sequences, anything else is rejected
    pub fn from_value(value: Value) -> RepoResult<Self> {
        match value {
            Value::Object(map) => Ok(Dataset::Mapping(
                map.into_iter().map(|(k, v)| (Key::from(k), v)).collect(),
            )),
            Value::Array(items) => Ok(Dataset::Sequence(items)),
            other => Err(RepoError::InvalidDataset { kind: kind(&other) }),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            Dataset::Mapping(map) => map.len(),
            Dataset::Sequence(items) => items.len(),
        }
    }

    /// Whether the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up one record by key.
    ///
    /// On a sequence, integer keys address positions; text keys never match.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match self {
            Dataset::Mapping(map) => map.get(key),
            Dataset::Sequence(items) => {
                let index = usize::try_from(key.as_integer()?).ok()?;
                items.get(index)
            }
        }
    }

    /// Iterate records in iteration order
    pub fn records(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Dataset::Mapping(map) => Box::new(map.values()),
            Dataset::Sequence(items) => Box::new(items.iter()),
        }
    }

    /// Iterate `(key, record)` pairs in iteration order; sequence indices
    /// appear as integer keys
    pub fn entries(&self) -> Box<dyn Iterator<Item = (Key, &Value)> + '_> {
        match self {
            Dataset::Mapping(map) => Box::new(map.iter().map(|(k, v)| (k.clone(), v))),
            Dataset::Sequence(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Key::from(i), v)),
            ),
        }
    }

    /// Clone the records into a sequence, in iteration order
    pub fn to_sequence(&self) -> Vec<Value> {
        self.records().cloned().collect()
    }

    /// Clone the records into a mapping; sequence indices become the keys
    pub fn to_mapping(&self) -> IndexMap<Key, Value> {
        self.entries().map(|(k, v)| (k, v.clone())).collect()
    }

    /// Convert into the requested output shape.
    ///
    /// A mapping keeps its keys when the shape is already `Mapping`; a
    /// sequence converted to `Mapping` is keyed by its indices, so original
    /// keys are only preserved when the data never left mapping form.
    pub fn into_shape(self, shape: OutputShape) -> Dataset {
        match (self, shape) {
            (ds @ Dataset::Mapping(_), OutputShape::Mapping) => ds,
            (ds @ Dataset::Sequence(_), OutputShape::Sequence) => ds,
            (Dataset::Sequence(items), OutputShape::Mapping) => Dataset::Mapping(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (Key::from(i), v))
                    .collect(),
            ),
            (Dataset::Mapping(map), OutputShape::Sequence) => {
                Dataset::Sequence(map.into_values().collect())
            }
        }
    }
}

impl From<IndexMap<Key, Value>> for Dataset {
    fn from(map: IndexMap<Key, Value>) -> Self {
        Dataset::Mapping(map)
    }
}

impl From<Vec<Value>> for Dataset {
    fn from(items: Vec<Value>) -> Self {
        Dataset::Sequence(items)
    }
}

impl FromIterator<(Key, Value)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Dataset::Mapping(iter.into_iter().collect())
    }
}

impl FromIterator<Value> for Dataset {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Dataset::Sequence(iter.into_iter().collect())
    }
}
