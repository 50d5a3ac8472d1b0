//! Read-only queries over a wrapped dataset
//!
//! A [`Repository`] owns one dataset and answers lookup, filter, and sort
//! queries over it without ever mutating it. Every operation resolves a
//! context first (the repository's own dataset, or a per-call override from
//! the settings), then performs a single scan or one stable sort over that
//! context and converts the result to the requested output shape.

use crate::config::QuerySettings;
use crate::core::dataset::Dataset;
use crate::core::error::{RepoError, RepoResult};
use crate::core::key::Key;
use crate::core::value::{compare_values, loose_eq, matchable_str, nested_value};
use regex::{Regex, RegexBuilder};
use serde_json::Value;

/// In-memory repository over a keyed or ordered dataset
///
/// # Example
///
/// ```
/// use recall::prelude::*;
/// use serde_json::json;
///
/// let repo = Repository::from_value(json!({
///     "1": {"name": "John", "city": "Paris"},
///     "2": {"name": "Anna", "city": "Berlin"},
/// }))
/// .unwrap();
///
/// assert_eq!(repo.find_by_id(1), Some(&json!({"name": "John", "city": "Paris"})));
/// assert_eq!(repo.find_by_id(9), None);
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    data: Dataset,
}

impl Repository {
    /// Wrap a dataset. The repository holds it for its lifetime and never
    /// mutates it.
    pub fn new(data: impl Into<Dataset>) -> Self {
        Self { data: data.into() }
    }

    /// Wrap a JSON object or array
    pub fn from_value(value: Value) -> RepoResult<Self> {
        Ok(Self::new(Dataset::from_value(value)?))
    }

    /// The wrapped dataset
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Look up one record by exact key.
    ///
    /// Always searches the repository's own dataset; context overrides do
    /// not apply. A missing key is `None`, never an error.
    pub fn find_by_id(&self, id: impl Into<Key>) -> Option<&Value> {
        self.data.get(&id.into())
    }

    /// First record whose named field strictly equals `value`, in iteration
    /// order of the resolved context.
    ///
    /// `property` is a single field name; nested paths are not walked here.
    /// Strict means no coercion: `5` does not match `"5"`.
    pub fn find_by_field_strict(
        &self,
        property: &str,
        value: &Value,
        settings: &QuerySettings,
    ) -> Option<Value> {
        self.context(settings)
            .records()
            .find(|record| record.get(property) == Some(value))
            .cloned()
    }

    /// Every record in the resolved context, converted to the requested
    /// shape. Mapping keys survive when the context is a mapping and the
    /// shape is `Mapping`.
    pub fn fetch_all(&self, settings: &QuerySettings) -> Dataset {
        self.context(settings).clone().into_shape(settings.shape)
    }

    /// All records whose named field loosely equals `value` (numeric
    /// coercion between numbers, numeric strings, and booleans), in
    /// iteration order, shaped per settings.
    pub fn fetch_by_field_strict(
        &self,
        property: &str,
        value: &Value,
        settings: &QuerySettings,
    ) -> Dataset {
        let matches: Vec<Value> = self
            .context(settings)
            .records()
            .filter(|record| {
                record
                    .get(property)
                    .is_some_and(|field| loose_eq(field, value))
            })
            .cloned()
            .collect();
        tracing::debug!(property, matches = matches.len(), "field equality fetch");
        Dataset::from(matches).into_shape(settings.shape)
    }

    /// All records whose named field like-matches `pattern`.
    ///
    /// The pattern is compiled as a case-insensitive, multiline regular
    /// expression and tested against the field's string form; records where
    /// the field is absent or has no string form are excluded. An
    /// uncompilable pattern is [`RepoError::InvalidPattern`].
    pub fn fetch_by_field_like(
        &self,
        property: &str,
        pattern: &str,
        settings: &QuerySettings,
    ) -> RepoResult<Dataset> {
        let regex = like_regex(pattern)?;
        let matches: Vec<Value> = self
            .context(settings)
            .records()
            .filter(|record| {
                record
                    .get(property)
                    .and_then(matchable_str)
                    .is_some_and(|text| regex.is_match(&text))
            })
            .cloned()
            .collect();
        tracing::debug!(property, pattern, matches = matches.len(), "like fetch");
        Ok(Dataset::from(matches).into_shape(settings.shape))
    }

    /// All records where at least one of `properties` like-matches
    /// `pattern`.
    ///
    /// A record contributes at most once: the first matching field wins and
    /// the scan moves to the next record. Records that are null in the
    /// context are skipped before any field is inspected.
    pub fn fetch_by_many_fields_like(
        &self,
        properties: &[&str],
        pattern: &str,
        settings: &QuerySettings,
    ) -> RepoResult<Dataset> {
        let regex = like_regex(pattern)?;
        let mut matches = Vec::new();
        for record in self.context(settings).records() {
            if record.is_null() {
                continue;
            }
            let hit = properties.iter().any(|property| {
                record
                    .get(property)
                    .and_then(matchable_str)
                    .is_some_and(|text| regex.is_match(&text))
            });
            if hit {
                matches.push(record.clone());
            }
        }
        tracing::debug!(
            fields = properties.len(),
            pattern,
            matches = matches.len(),
            "multi-field like fetch"
        );
        Ok(Dataset::from(matches).into_shape(settings.shape))
    }

    /// Every record in the resolved context, ordered by the value at
    /// `property`.
    ///
    /// `property` may use dot notation to address nested fields
    /// (`"a.b.c"`). The sort is stable, so records that compare equal keep
    /// their relative order, as do records whose path does not resolve.
    /// Unresolvable paths order below every present value: first ascending,
    /// last descending.
    pub fn filter(&self, property: &str, settings: &QuerySettings) -> Dataset {
        let direction = settings.sort.direction;
        let mut records = self.context(settings).to_sequence();
        records.sort_by(|a, b| {
            direction.apply(compare_values(
                nested_value(a, property),
                nested_value(b, property),
            ))
        });
        Dataset::from(records).into_shape(settings.shape)
    }

    /// The dataset this call operates over: the override from the settings
    /// if present (used verbatim, never merged), otherwise the repository's
    /// own dataset.
    fn context<'a>(&'a self, settings: &'a QuerySettings) -> &'a Dataset {
        settings.context.as_ref().unwrap_or(&self.data)
    }
}

/// Compile a like pattern: case-insensitive and multiline
fn like_regex(pattern: &str) -> RepoResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|source| RepoError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputShape, SortDirection};
    use serde_json::json;

    fn people_repo() -> Repository {
        Repository::from_value(json!({
            "1": {"name": "John", "city": "Paris", "age": 34},
            "2": {"name": "Anna", "city": "Berlin", "age": 28},
            "3": {"name": "Paul", "city": "Parma", "age": 34},
        }))
        .unwrap()
    }

    // === find_by_id() ===

    #[test]
    fn test_find_by_id_present() {
        let repo = people_repo();
        assert_eq!(repo.find_by_id(2).unwrap()["name"], json!("Anna"));
    }

    #[test]
    fn test_find_by_id_absent_is_none() {
        let repo = people_repo();
        assert_eq!(repo.find_by_id(99), None);
        assert_eq!(repo.find_by_id("nope"), None);
    }

    #[test]
    fn test_find_by_id_ignores_context_override() {
        let repo = people_repo();
        // find_by_id has no settings parameter at all; the instance dataset
        // is the only thing it ever consults.
        assert!(repo.find_by_id(1).is_some());
    }

    #[test]
    fn test_find_by_id_on_sequence_uses_position() {
        let repo = Repository::from_value(json!([{"n": "a"}, {"n": "b"}])).unwrap();
        assert_eq!(repo.find_by_id(1).unwrap()["n"], json!("b"));
        assert_eq!(repo.find_by_id(5), None);
    }

    // === find_by_field_strict() ===

    #[test]
    fn test_find_by_field_strict_first_match_wins() {
        let repo = people_repo();
        let settings = QuerySettings::new();
        let found = repo
            .find_by_field_strict("age", &json!(34), &settings)
            .unwrap();
        assert_eq!(found["name"], json!("John"));
    }

    #[test]
    fn test_find_by_field_strict_no_coercion() {
        let repo = people_repo();
        let settings = QuerySettings::new();
        assert!(repo
            .find_by_field_strict("age", &json!("34"), &settings)
            .is_none());
    }

    #[test]
    fn test_find_by_field_strict_absent_field() {
        let repo = people_repo();
        let settings = QuerySettings::new();
        assert!(repo
            .find_by_field_strict("height", &json!(180), &settings)
            .is_none());
    }

    // === fetch_all() ===

    #[test]
    fn test_fetch_all_mapping_keeps_keys() {
        let repo = people_repo();
        let result = repo.fetch_all(&QuerySettings::new());
        assert_eq!(result, repo.data().clone());
    }

    #[test]
    fn test_fetch_all_as_sequence() {
        let repo = people_repo();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
        let Dataset::Sequence(records) = repo.fetch_all(&settings) else {
            panic!("expected sequence");
        };
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["name"], json!("John"));
    }

    #[test]
    fn test_fetch_all_context_override_used_verbatim() {
        let repo = people_repo();
        let override_data = Dataset::from(vec![json!({"name": "Solo"})]);
        let settings = QuerySettings::new()
            .with_context(override_data)
            .with_shape(OutputShape::Sequence);

        let result = repo.fetch_all(&settings);
        assert_eq!(result.len(), 1);
        // The instance dataset is untouched
        assert_eq!(repo.data().len(), 3);
    }

    // === fetch_by_field_strict() ===

    #[test]
    fn test_fetch_by_field_strict_all_matches_in_order() {
        let repo = people_repo();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
        let Dataset::Sequence(records) = repo.fetch_by_field_strict("age", &json!(34), &settings)
        else {
            panic!("expected sequence");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], json!("John"));
        assert_eq!(records[1]["name"], json!("Paul"));
    }

    #[test]
    fn test_fetch_by_field_strict_coerces_numeric_strings() {
        let repo = people_repo();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
        let result = repo.fetch_by_field_strict("age", &json!("28"), &settings);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_fetch_by_field_strict_no_match_is_empty() {
        let repo = people_repo();
        let result = repo.fetch_by_field_strict("age", &json!(99), &QuerySettings::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_fetch_by_field_strict_mapping_keyed_by_match_index() {
        let repo = people_repo();
        let Dataset::Mapping(map) =
            repo.fetch_by_field_strict("age", &json!(34), &QuerySettings::new())
        else {
            panic!("expected mapping");
        };
        // Matches were collected as a sequence, so keys are match indices
        assert_eq!(map.get(&Key::Integer(0)).unwrap()["name"], json!("John"));
        assert_eq!(map.get(&Key::Integer(1)).unwrap()["name"], json!("Paul"));
    }

    // === fetch_by_field_like() ===

    #[test]
    fn test_fetch_by_field_like_case_insensitive_substring() {
        let repo = people_repo();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
        let result = repo.fetch_by_field_like("name", "jo", &settings).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.to_sequence()[0]["name"], json!("John"));
    }

    #[test]
    fn test_fetch_by_field_like_matches_number_display_form() {
        let repo = people_repo();
        let result = repo
            .fetch_by_field_like("age", "^3", &QuerySettings::new())
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_fetch_by_field_like_absent_field_excluded() {
        let repo = people_repo();
        let result = repo
            .fetch_by_field_like("missing", ".*", &QuerySettings::new())
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_fetch_by_field_like_invalid_pattern() {
        let repo = people_repo();
        let err = repo
            .fetch_by_field_like("name", "(unclosed", &QuerySettings::new())
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidPattern { .. }));
    }

    // === fetch_by_many_fields_like() ===

    #[test]
    fn test_fetch_by_many_fields_record_contributes_once() {
        let repo = Repository::from_value(json!({
            "1": {"name": "Parker", "city": "Paris"},
            "2": {"name": "Anna", "city": "Berlin"},
        }))
        .unwrap();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
        // "par" hits both Parker's name and city; the record appears once
        let result = repo
            .fetch_by_many_fields_like(&["name", "city"], "par", &settings)
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.to_sequence()[0]["name"], json!("Parker"));
    }

    #[test]
    fn test_fetch_by_many_fields_skips_null_records() {
        let repo = Repository::from_value(json!({
            "a": {"name": "Paris item"},
            "b": null,
            "c": {"city": "Paris"},
        }))
        .unwrap();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
        let result = repo
            .fetch_by_many_fields_like(&["name", "city"], "paris", &settings)
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_fetch_by_many_fields_empty_property_list() {
        let repo = people_repo();
        let result = repo
            .fetch_by_many_fields_like(&[], "anything", &QuerySettings::new())
            .unwrap();
        assert!(result.is_empty());
    }

    // === filter() ===

    #[test]
    fn test_filter_sorts_by_nested_value_desc() {
        let repo = Repository::from_value(json!([
            {"a": {"b": 3}},
            {"a": {"b": 1}},
            {"a": {"b": 2}},
        ]))
        .unwrap();
        let settings = QuerySettings::new()
            .with_shape(OutputShape::Sequence)
            .with_direction(SortDirection::Desc);

        let sorted = repo.filter("a.b", &settings).to_sequence();
        let values: Vec<_> = sorted.iter().map(|r| r["a"]["b"].clone()).collect();
        assert_eq!(values, vec![json!(3), json!(2), json!(1)]);
    }

    #[test]
    fn test_filter_asc_default() {
        let repo = people_repo();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
        let sorted = repo.filter("name", &settings).to_sequence();
        let names: Vec<_> = sorted.iter().map(|r| r["name"].clone()).collect();
        assert_eq!(names, vec![json!("Anna"), json!("John"), json!("Paul")]);
    }

    #[test]
    fn test_filter_stable_on_ties() {
        let repo = people_repo();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
        let sorted = repo.filter("age", &settings).to_sequence();
        // Anna (28) first; John and Paul tie at 34 and keep dataset order
        let names: Vec<_> = sorted.iter().map(|r| r["name"].clone()).collect();
        assert_eq!(names, vec![json!("Anna"), json!("John"), json!("Paul")]);
    }

    #[test]
    fn test_filter_broken_path_sorts_first_asc() {
        let repo = Repository::from_value(json!([
            {"a": {"b": 2}},
            {"c": 1},
            {"a": {"b": 1}},
        ]))
        .unwrap();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);
        let sorted = repo.filter("a.b", &settings).to_sequence();
        // The record without the path comes first ascending, and nothing
        // panics on the broken walk
        assert_eq!(sorted[0], json!({"c": 1}));
        assert_eq!(sorted[1]["a"]["b"], json!(1));
        assert_eq!(sorted[2]["a"]["b"], json!(2));
    }

    #[test]
    fn test_filter_broken_path_sorts_last_desc() {
        let repo = Repository::from_value(json!([
            {"a": {"b": 2}},
            {"c": 1},
            {"a": {"b": 1}},
        ]))
        .unwrap();
        let settings = QuerySettings::new()
            .with_shape(OutputShape::Sequence)
            .with_direction(SortDirection::Desc);
        let sorted = repo.filter("a.b", &settings).to_sequence();
        assert_eq!(sorted[2], json!({"c": 1}));
    }

    // === idempotence ===

    #[test]
    fn test_identical_calls_yield_identical_results() {
        let repo = people_repo();
        let settings = QuerySettings::new().with_shape(OutputShape::Sequence);

        let first = repo.fetch_by_field_like("name", "a", &settings).unwrap();
        let second = repo.fetch_by_field_like("name", "a", &settings).unwrap();
        assert_eq!(first, second);

        let first = repo.filter("age", &settings);
        let second = repo.filter("age", &settings);
        assert_eq!(first, second);
    }
}
