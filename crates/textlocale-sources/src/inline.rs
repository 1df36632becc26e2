// crates/textlocale-sources/src/inline.rs
// ============================================================================
// Module: TextLocale Inline Source
// Description: In-memory dictionary source.
// Purpose: Serve embedded catalogs without I/O.
// Dependencies: textlocale-core
// ============================================================================

//! ## Overview
//! [`InlineSource`] answers fetches from a table built up front. Pairs that
//! were never added fail with [`LoadError::NotFound`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use textlocale_core::Dictionary;
use textlocale_core::DictionarySource;
use textlocale_core::Domain;
use textlocale_core::LanguageTag;
use textlocale_core::LoadError;

use crate::MAX_DICTIONARY_BYTES;
use crate::parse_dictionary;

// ============================================================================
// SECTION: Inline Source
// ============================================================================

/// In-memory dictionary source.
#[derive(Debug, Clone, Default)]
pub struct InlineSource {
    /// Dictionaries keyed by (domain, tag).
    entries: HashMap<(Domain, LanguageTag), Dictionary>,
}

impl InlineSource {
    /// Creates an empty inline source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the dictionary for a pair.
    #[must_use]
    pub fn with_dictionary(
        mut self,
        domain: Domain,
        tag: LanguageTag,
        dictionary: Dictionary,
    ) -> Self {
        self.entries.insert((domain, tag), dictionary);
        self
    }

    /// Decodes and adds an embedded JSON document for a pair.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the document is oversized or not a flat
    /// JSON object of strings.
    pub fn with_json(
        self,
        domain: Domain,
        tag: LanguageTag,
        json: &str,
    ) -> Result<Self, LoadError> {
        let dictionary = parse_dictionary(json.as_bytes(), MAX_DICTIONARY_BYTES)?;
        Ok(self.with_dictionary(domain, tag, dictionary))
    }

    /// Returns the number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no pair is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl DictionarySource for InlineSource {
    async fn fetch(&self, domain: &Domain, tag: &LanguageTag) -> Result<Dictionary, LoadError> {
        self.entries
            .get(&(domain.clone(), tag.clone()))
            .cloned()
            .ok_or_else(|| LoadError::NotFound(format!("{domain}/{tag}")))
    }
}
