// crates/textlocale-core/src/interfaces/mod.rs
// ============================================================================
// Module: TextLocale Interfaces
// Description: Seams between the resolution engine and its collaborators.
// Purpose: Abstract dictionary transport and preferred-language detection.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! [`DictionarySource`] is the single I/O boundary of the engine: it fetches
//! one dictionary layer for a (domain, language) pair. [`LanguageDetector`]
//! supplies the caller's preferred language. Both are injected so tests can
//! substitute deterministic implementations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::dictionary::Dictionary;
use crate::core::identifiers::Domain;
use crate::core::identifiers::LanguageTag;

// ============================================================================
// SECTION: Load Errors
// ============================================================================

/// Errors produced while fetching a dictionary layer.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Never surfaced past [`crate::DictionaryStore::load`]; collapsed to an
///   empty dictionary there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Transport failed before a response was received.
    #[error("dictionary transport failure: {0}")]
    Transport(String),
    /// Remote responded with a non-success status.
    #[error("dictionary request returned status {0}")]
    Status(u16),
    /// No dictionary exists at the resolved location.
    #[error("dictionary not found: {0}")]
    NotFound(String),
    /// Document is not a flat JSON object of strings.
    #[error("dictionary parse failure: {0}")]
    Parse(String),
    /// Document exceeds the configured size limit.
    #[error("dictionary exceeds size limit of {limit} bytes")]
    TooLarge {
        /// Maximum allowed size in bytes.
        limit: usize,
    },
    /// Local I/O failed.
    #[error("dictionary io failure: {0}")]
    Io(String),
    /// Domain or tag cannot be mapped to a safe location.
    #[error("invalid dictionary location: {0}")]
    InvalidLocation(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

// ============================================================================
// SECTION: Layers
// ============================================================================

/// Provenance layer of a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Bundled dictionaries (lower priority).
    System,
    /// Project-level overrides (higher priority).
    User,
}

impl Layer {
    /// Returns a stable label for logging.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Dictionary Source
// ============================================================================

/// Fetches one dictionary layer for a (domain, language) pair.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Fetches the dictionary stored for `domain` and `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the dictionary cannot be fetched or decoded.
    async fn fetch(&self, domain: &Domain, tag: &LanguageTag) -> Result<Dictionary, LoadError>;
}

// ============================================================================
// SECTION: Language Detection
// ============================================================================

/// Supplies the caller's preferred language.
pub trait LanguageDetector: Send + Sync {
    /// Returns the preferred language tag.
    fn detect(&self) -> LanguageTag;
}
