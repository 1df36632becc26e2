// crates/textlocale-core/src/runtime/detect.rs
// ============================================================================
// Module: TextLocale Language Detection
// Description: Preferred-language detectors for the resolver.
// Purpose: Replace ambient globals with injectable detection capabilities.
// Dependencies: sys-locale, url
// ============================================================================

//! ## Overview
//! [`PreferredLanguage`] applies the production precedence: an explicit
//! override, then the `lang` query parameter of the page URL, then the
//! ambient system locale, then [`crate::FALLBACK_LANGUAGE`]. Unparseable
//! candidates are skipped. [`FixedLanguage`] always answers with one tag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use url::Url;

use crate::core::identifiers::LanguageTag;
use crate::interfaces::LanguageDetector;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Query parameter consulted on the page URL.
pub const LANG_QUERY_PARAM: &str = "lang";

// ============================================================================
// SECTION: Fixed Language
// ============================================================================

/// Detector that always returns the same tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLanguage(LanguageTag);

impl FixedLanguage {
    /// Creates a detector for `tag`.
    #[must_use]
    pub const fn new(tag: LanguageTag) -> Self {
        Self(tag)
    }
}

impl LanguageDetector for FixedLanguage {
    fn detect(&self) -> LanguageTag {
        self.0.clone()
    }
}

// ============================================================================
// SECTION: Preferred Language
// ============================================================================

/// Detector applying override > URL `lang` > ambient locale precedence.
#[derive(Debug, Clone)]
pub struct PreferredLanguage {
    /// Explicit override, highest precedence.
    explicit: Option<LanguageTag>,
    /// Page URL whose `lang` query parameter is consulted.
    page_url: Option<Url>,
    /// Ambient locale reader.
    ambient: fn() -> Option<String>,
}

impl Default for PreferredLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferredLanguage {
    /// Creates a detector reading the ambient system locale.
    #[must_use]
    pub fn new() -> Self {
        Self {
            explicit: None,
            page_url: None,
            ambient: sys_locale::get_locale,
        }
    }

    /// Sets the explicit override.
    #[must_use]
    pub fn with_override(mut self, tag: Option<LanguageTag>) -> Self {
        self.explicit = tag;
        self
    }

    /// Sets the page URL consulted for the `lang` query parameter.
    #[must_use]
    pub fn with_page_url(mut self, url: Url) -> Self {
        self.page_url = Some(url);
        self
    }

    /// Replaces the ambient locale reader.
    #[must_use]
    pub fn with_ambient(mut self, ambient: fn() -> Option<String>) -> Self {
        self.ambient = ambient;
        self
    }

    /// Returns the tag named by the page URL query, if any.
    fn query_language(&self) -> Option<LanguageTag> {
        let url = self.page_url.as_ref()?;
        url.query_pairs()
            .find(|(name, _)| name == LANG_QUERY_PARAM)
            .and_then(|(_, value)| LanguageTag::new(&value).ok())
    }

    /// Returns the ambient locale tag, if it normalizes.
    fn ambient_language(&self) -> Option<LanguageTag> {
        (self.ambient)().and_then(|value| LanguageTag::new(&value).ok())
    }
}

impl LanguageDetector for PreferredLanguage {
    fn detect(&self) -> LanguageTag {
        self.explicit
            .clone()
            .or_else(|| self.query_language())
            .or_else(|| self.ambient_language())
            .unwrap_or_else(LanguageTag::fallback)
    }
}
