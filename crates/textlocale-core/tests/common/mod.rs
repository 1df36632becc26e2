// crates/textlocale-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared dictionary sources for textlocale-core tests.
// Purpose: Provide deterministic, observable sources for store and resolver tests.
// Dependencies: textlocale-core, async-trait, tokio
// ============================================================================

//! ## Overview
//! Provides in-memory [`DictionarySource`] implementations that count
//! requests, fail on demand, or park until released.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only helpers are shared across test binaries."
)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use textlocale_core::Dictionary;
use textlocale_core::DictionarySource;
use textlocale_core::Domain;
use textlocale_core::LanguageTag;
use textlocale_core::LoadError;
use tokio::sync::Notify;

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Parses a language tag, panicking on invalid input.
pub fn tag(value: &str) -> LanguageTag {
    LanguageTag::new(value).expect("valid tag")
}

/// Builds a dictionary from string pairs.
pub fn dict(entries: &[(&str, &str)]) -> Dictionary {
    entries.iter().copied().collect()
}

// ============================================================================
// SECTION: Map Source
// ============================================================================

/// In-memory source that counts fetches per (domain, tag).
#[derive(Clone, Default)]
pub struct MapSource {
    /// Dictionaries keyed by (domain, tag).
    entries: HashMap<(String, String), Dictionary>,
    /// Total fetch count.
    fetches: Arc<AtomicUsize>,
}

impl MapSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a dictionary for a pair.
    pub fn with(mut self, domain: &str, language: &str, entries: &[(&str, &str)]) -> Self {
        self.entries.insert((domain.to_string(), tag(language).to_string()), dict(entries));
        self
    }

    /// Returns a shared handle to the fetch counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetches)
    }
}

#[async_trait]
impl DictionarySource for MapSource {
    async fn fetch(&self, domain: &Domain, tag: &LanguageTag) -> Result<Dictionary, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.entries
            .get(&(domain.to_string(), tag.to_string()))
            .cloned()
            .ok_or_else(|| LoadError::Status(404))
    }
}

// ============================================================================
// SECTION: Failing Source
// ============================================================================

/// Source whose every fetch fails with a transport error.
#[derive(Clone, Default)]
pub struct UnreachableSource {
    /// Total fetch count.
    pub fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl DictionarySource for UnreachableSource {
    async fn fetch(&self, _domain: &Domain, _tag: &LanguageTag) -> Result<Dictionary, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Err(LoadError::Transport("connection refused".to_string()))
    }
}

// ============================================================================
// SECTION: Gated Source
// ============================================================================

/// Source that parks every fetch until the gate is opened.
#[derive(Clone)]
pub struct GatedSource {
    /// Dictionary returned once released.
    dictionary: Dictionary,
    /// Release signal.
    pub gate: Arc<Notify>,
}

impl GatedSource {
    /// Creates a gated source returning `entries`.
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            dictionary: dict(entries),
            gate: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl DictionarySource for GatedSource {
    async fn fetch(&self, _domain: &Domain, _tag: &LanguageTag) -> Result<Dictionary, LoadError> {
        self.gate.notified().await;
        Ok(self.dictionary.clone())
    }
}
