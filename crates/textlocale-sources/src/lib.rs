// crates/textlocale-sources/src/lib.rs
// ============================================================================
// Module: TextLocale Sources Library
// Description: Concrete dictionary sources for the TextLocale engine.
// Purpose: Fetch dictionary layers over HTTP, from disk, or from memory.
// Dependencies: textlocale-core, reqwest, tokio, url
// ============================================================================

//! ## Overview
//! Ready-made [`textlocale_core::DictionarySource`] implementations:
//! [`HttpSource`] for remote dictionary hosts, [`FileSource`] for local
//! trees, and [`InlineSource`] for embedded catalogs. Remote and on-disk
//! sources share one [`UrlLayout`] vocabulary.
//! Invariants:
//! - Dictionary bodies are capped at a configurable byte limit
//!   (default [`MAX_DICTIONARY_BYTES`]).
//! - Domains and tags are validated before they become path segments.
//! - Every document is decoded with [`parse_dictionary`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod file;
pub mod http;
pub mod inline;
pub mod layout;

// ============================================================================
// SECTION: Imports
// ============================================================================

use textlocale_core::Dictionary;
use textlocale_core::LoadError;
use thiserror::Error;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use file::FileSource;
pub use http::HttpSource;
pub use http::HttpSourceConfig;
pub use inline::InlineSource;
pub use layout::ASSETS_LOCALES_DIR;
pub use layout::UrlLayout;
pub use layout::assets_base;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum dictionary document size (1 MiB).
pub const MAX_DICTIONARY_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing a source.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Fetch-time failures use [`LoadError`] instead.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP client construction failed.
    #[error("http client error: {0}")]
    Http(String),
    /// Base location cannot host dictionary paths.
    #[error("invalid base location: {0}")]
    InvalidBase(String),
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes a dictionary document, enforcing `max_bytes`.
///
/// # Errors
///
/// Returns [`LoadError::TooLarge`] when the document exceeds `max_bytes`, or
/// [`LoadError::Parse`] when it is not a flat JSON object of strings.
pub fn parse_dictionary(bytes: &[u8], max_bytes: usize) -> Result<Dictionary, LoadError> {
    if bytes.len() > max_bytes {
        return Err(LoadError::TooLarge {
            limit: max_bytes,
        });
    }
    Ok(Dictionary::from_json_slice(bytes)?)
}
