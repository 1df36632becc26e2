// crates/textlocale-core/src/core/dictionary.rs
// ============================================================================
// Module: TextLocale Dictionary
// Description: Flat key/value string map for one (domain, language) pair.
// Purpose: Decode dictionary documents and merge system and user layers.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Dictionary`] is a flat JSON object of string keys to string values.
//! Nested objects, arrays, numbers, and metadata envelopes are rejected at
//! decode time. The cached dictionary for a pair is the shallow merge of the
//! system layer with the user layer on top.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Dictionary
// ============================================================================

/// Flat key/value dictionary.
///
/// # Invariants
/// - Keys are unique; iteration order is lexicographic by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(BTreeMap<String, String>);

impl Dictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Decodes a dictionary from a flat JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the document is not a JSON object
    /// whose values are all strings.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Inserts or replaces an entry, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Overlays `overrides` on top of `self`; entries in `overrides` win.
    #[must_use]
    pub fn merged_with(mut self, overrides: Self) -> Self {
        self.0.extend(overrides.0);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for dictionary decoding and layer merging.

    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use super::*;

    /// Tests user entries win on key collision while system-only keys remain.
    #[test]
    fn user_layer_overrides_system_layer() {
        let system: Dictionary = [("a", "1"), ("b", "2")].into_iter().collect();
        let user: Dictionary = [("a", "X")].into_iter().collect();
        let merged = system.merged_with(user);
        let expected: Dictionary = [("a", "X"), ("b", "2")].into_iter().collect();
        assert_eq!(merged, expected);
    }

    /// Tests nested values are rejected instead of being flattened.
    #[test]
    fn nested_documents_are_rejected() {
        assert!(Dictionary::from_json_slice(br#"{"a": {"b": "c"}}"#).is_err());
        assert!(Dictionary::from_json_slice(br#"{"a": 1}"#).is_err());
        assert!(Dictionary::from_json_slice(br#"["a"]"#).is_err());
    }

    /// Tests a flat object decodes into entries.
    #[test]
    fn flat_document_decodes() {
        let dictionary = Dictionary::from_json_slice(br#"{"greet": "Hello"}"#).unwrap();
        assert_eq!(dictionary.get("greet"), Some("Hello"));
        assert_eq!(dictionary.len(), 1);
    }
}
