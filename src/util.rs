//! Small shared utilities: the insertion-ordered attribute map used to carry
//! unknown schema JSON keys through a parse/re-emit round trip.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fmt::{self, Debug};

/// A string-keyed map that preserves first-insertion order and overwrites
/// in place on re-insertion of an existing key, used to carry unknown
/// Avro-schema JSON attributes through a parse/re-emit round trip without
/// scrambling their original order.
#[derive(Clone, Default, PartialEq)]
pub struct OrderedMap(IndexMap<String, JsonValue>);

impl OrderedMap {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        OrderedMap(IndexMap::new())
    }

    /// Inserts `value` at `key`. If `key` already exists, its value is
    /// overwritten in place and its position in the iteration order is
    /// unchanged.
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) {
        self.0.insert(key.into(), value);
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// True if the map has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of attributes carried.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates attributes in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Debug for OrderedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl FromIterator<(String, JsonValue)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        OrderedMap(iter.into_iter().collect())
    }
}
