// crates/textlocale-sources/src/layout.rs
// ============================================================================
// Module: TextLocale URL Layouts
// Description: Mapping from (domain, language) to dictionary locations.
// Purpose: Share one path vocabulary between HTTP and file sources.
// Dependencies: textlocale-core, serde, url
// ============================================================================

//! ## Overview
//! Two layouts are supported:
//! - [`UrlLayout::Domain`]: `<base>/<domain>/<tag>.json`
//! - [`UrlLayout::Locales`]: `<base>/locales/<tag>/localizable-strings.json`
//!
//! Invariants:
//! - Every produced segment is non-empty and free of traversal components.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use textlocale_core::Domain;
use textlocale_core::LanguageTag;
use textlocale_core::LoadError;
use url::Url;

use crate::SourceError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Sub-directory joined onto an application base URL during setup.
pub const ASSETS_LOCALES_DIR: &str = "assets/locales";

/// Directory holding per-language folders in the locales layout.
pub const LOCALES_DIR: &str = "locales";

/// File name of a dictionary in the locales layout.
pub const LOCALES_FILE_NAME: &str = "localizable-strings.json";

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Dictionary location scheme under a base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlLayout {
    /// `<base>/<domain>/<tag>.json`.
    #[default]
    Domain,
    /// `<base>/locales/<tag>/localizable-strings.json`; the domain is ignored.
    Locales,
}

impl UrlLayout {
    /// Returns the relative path segments for a pair.
    ///
    /// Domains may span several `/`-separated segments.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidLocation`] when a segment is empty or
    /// would escape the base.
    pub fn segments(self, domain: &Domain, tag: &LanguageTag) -> Result<Vec<String>, LoadError> {
        match self {
            Self::Domain => {
                let mut segments = Vec::new();
                for part in domain.as_str().split('/') {
                    segments.push(checked_segment(part)?.to_string());
                }
                segments.push(format!("{}.json", checked_segment(tag.as_str())?));
                Ok(segments)
            }
            Self::Locales => Ok(vec![
                LOCALES_DIR.to_string(),
                checked_segment(tag.as_str())?.to_string(),
                LOCALES_FILE_NAME.to_string(),
            ]),
        }
    }
}

/// Joins [`ASSETS_LOCALES_DIR`] onto an application base URL.
///
/// A missing trailing slash on `base` is tolerated.
///
/// # Errors
///
/// Returns [`SourceError::InvalidBase`] when `base` cannot carry a path.
pub fn assets_base(base: &Url) -> Result<Url, SourceError> {
    let mut joined = base.clone();
    joined
        .path_segments_mut()
        .map_err(|()| SourceError::InvalidBase(base.to_string()))?
        .pop_if_empty()
        .extend(ASSETS_LOCALES_DIR.split('/'));
    Ok(joined)
}

/// Rejects segments that are empty or would traverse out of the base.
fn checked_segment(segment: &str) -> Result<&str, LoadError> {
    let invalid = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['\\', '?', '#', '%', ':']);
    if invalid {
        return Err(LoadError::InvalidLocation(segment.to_string()));
    }
    Ok(segment)
}
