// crates/textlocale-core/src/lib.rs
// ============================================================================
// Module: TextLocale Core Library
// Description: Dictionary cache, language-tag narrowing, and key resolution.
// Purpose: Resolve symbolic text keys to display strings without ever failing.
// Dependencies: async-trait, serde, serde_json, sys-locale, thiserror, tokio, tracing, url
// ============================================================================

//! ## Overview
//! `textlocale-core` resolves a text key to a human-readable string for a
//! (domain, language) pair. Dictionaries are fetched through a
//! [`DictionarySource`], merged from a system and a user layer, and cached
//! by [`DictionaryStore`]. [`TranslationResolver`] narrows language tags and
//! falls back to [`FALLBACK_LANGUAGE`] before echoing the key itself.
//! Invariants:
//! - [`TranslationResolver::localize`] is synchronous and never performs I/O.
//! - A stored dictionary is never removed, replaced, or re-fetched.
//! - Load failures collapse to empty dictionaries at the store boundary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::dictionary::Dictionary;
pub use crate::core::identifiers::Domain;
pub use crate::core::identifiers::FALLBACK_LANGUAGE;
pub use crate::core::identifiers::LanguageTag;
pub use crate::core::identifiers::TagError;
pub use crate::interfaces::DictionarySource;
pub use crate::interfaces::LanguageDetector;
pub use crate::interfaces::Layer;
pub use crate::interfaces::LoadError;
pub use crate::runtime::detect::FixedLanguage;
pub use crate::runtime::detect::PreferredLanguage;
pub use crate::runtime::resolver::FallbackPolicy;
pub use crate::runtime::resolver::TranslationResolver;
pub use crate::runtime::store::DictionaryStore;
pub use crate::runtime::store::DomainEntries;
pub use crate::runtime::store::LoadState;
