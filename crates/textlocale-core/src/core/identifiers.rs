// crates/textlocale-core/src/core/identifiers.rs
// ============================================================================
// Module: TextLocale Identifiers
// Description: Language tags and dictionary domains used as cache keys.
// Purpose: Provide normalized, strongly typed lookup keys with stable wire forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`LanguageTag`] is the lowercase, hyphen-delimited tag (`en`, `ja-jp`)
//! used to index dictionaries. Normalization happens once at construction so
//! that every later comparison is a plain string comparison. [`Domain`] is an
//! opaque dictionary namespace.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::iter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Language attempted last when no tag-specific dictionary has the key.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Path segment removed when deriving a domain from an installation path.
const BEHAVIORS_SEGMENT: &str = "behaviors/";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned when a language tag cannot be normalized.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// Input was empty after trimming.
    #[error("language tag is empty")]
    Empty,
    /// A hyphen-delimited segment was empty or not ASCII alphanumeric.
    #[error("invalid language tag segment in {0}")]
    InvalidSegment(String),
}

// ============================================================================
// SECTION: Language Tag
// ============================================================================

/// Normalized language tag.
///
/// # Invariants
/// - Lowercase ASCII alphanumeric segments joined by single hyphens.
/// - Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Normalizes `value` into a language tag.
    ///
    /// Accepts BCP 47 style (`ja-JP`) and POSIX locale style (`ja_JP.UTF-8`)
    /// input; both normalize to `ja-jp`.
    ///
    /// # Errors
    ///
    /// Returns [`TagError`] when the input is empty or has malformed segments.
    pub fn new(value: &str) -> Result<Self, TagError> {
        let trimmed = value.trim();
        let base = trimmed.split(['.', '@']).next().unwrap_or(trimmed);
        if base.is_empty() {
            return Err(TagError::Empty);
        }
        let normalized = base.replace('_', "-").to_ascii_lowercase();
        let valid = normalized.split('-').all(|segment| {
            !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_alphanumeric())
        });
        if !valid {
            return Err(TagError::InvalidSegment(trimmed.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Returns the tag for [`FALLBACK_LANGUAGE`].
    #[must_use]
    pub fn fallback() -> Self {
        Self(FALLBACK_LANGUAGE.to_string())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when this tag is [`FALLBACK_LANGUAGE`].
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_LANGUAGE
    }

    /// Returns the tag with its rightmost hyphen segment removed.
    ///
    /// `ja-jp-kansai` narrows to `ja-jp`; `ja` has no narrower tag.
    #[must_use]
    pub fn narrower(&self) -> Option<Self> {
        self.0.rsplit_once('-').map(|(head, _)| Self(head.to_string()))
    }

    /// Iterates this tag followed by each successively narrower tag.
    pub fn narrowings(&self) -> impl Iterator<Item = Self> + use<> {
        iter::successors(Some(self.clone()), Self::narrower)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageTag {
    type Err = TagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

// ============================================================================
// SECTION: Domain
// ============================================================================

/// Dictionary namespace identifier.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization is applied by [`Domain::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    /// Creates a new domain identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives a domain from a behavior installation path.
    ///
    /// Every `behaviors/` segment is removed and surrounding slashes are
    /// trimmed, so `behaviors/default` becomes `default`.
    #[must_use]
    pub fn from_behavior_path(path: &str) -> Self {
        let stripped = path.replace(BEHAVIORS_SEGMENT, "");
        Self(stripped.trim_matches('/').to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
