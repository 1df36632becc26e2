// crates/textlocale-core/src/runtime/resolver.rs
// ============================================================================
// Module: TextLocale Translation Resolver
// Description: Language-tag narrowing and fallback-chain resolution.
// Purpose: Map a key to a display string for a domain and language.
// Dependencies: tokio, tracing
// ============================================================================

//! ## Overview
//! [`TranslationResolver`] answers [`TranslationResolver::localize`] from
//! already-cached dictionaries only. The candidate chain is the requested tag,
//! each narrower tag, then the fallback language; the key itself closes the
//! chain so the call always yields a displayable string.
//! Invariants:
//! - `localize` never suspends and never performs I/O.
//! - A narrower tag is preferred over the fallback language.
//! - Empty values are treated as missing.
//! - Under [`FallbackPolicy::Strict`], a non-empty dictionary for the
//!   requested tag (or a narrowing) that lacks the key shadows the fallback
//!   language.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tokio::runtime::Handle;
use tracing::debug;
use tracing::trace;

use crate::core::identifiers::Domain;
use crate::core::identifiers::LanguageTag;
use crate::interfaces::LanguageDetector;
use crate::runtime::store::DictionaryStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default domain for core library strings.
pub const DEFAULT_CORE_DOMAIN: &str = "core";

// ============================================================================
// SECTION: Fallback Policy
// ============================================================================

/// Behavior when the requested tag's dictionary exists but lacks the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Echo the key; the fallback language is consulted only when no
    /// non-empty dictionary exists for the requested tag or its narrowings.
    #[default]
    Strict,
    /// Always consult the fallback language after the narrowing chain misses.
    FallThrough,
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves text keys against a [`DictionaryStore`].
///
/// # Invariants
/// - Owns its store; independent resolvers never share cache state.
pub struct TranslationResolver {
    /// Dictionary cache.
    store: DictionaryStore,
    /// Preferred-language detector.
    detector: Arc<dyn LanguageDetector>,
    /// Domain used when the caller names none.
    default_domain: Domain,
    /// Domain used by [`TranslationResolver::localize_core`].
    core_domain: Domain,
    /// Language attempted after the narrowing chain.
    fallback_language: LanguageTag,
    /// Tie-break policy.
    policy: FallbackPolicy,
}

impl TranslationResolver {
    /// Creates a resolver owning `store`.
    #[must_use]
    pub fn new(
        store: DictionaryStore,
        detector: impl LanguageDetector + 'static,
        default_domain: Domain,
    ) -> Self {
        Self {
            store,
            detector: Arc::new(detector),
            default_domain,
            core_domain: Domain::new(DEFAULT_CORE_DOMAIN),
            fallback_language: LanguageTag::fallback(),
            policy: FallbackPolicy::default(),
        }
    }

    /// Sets the tie-break policy.
    #[must_use]
    pub const fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the fallback language.
    #[must_use]
    pub fn with_fallback_language(mut self, tag: LanguageTag) -> Self {
        self.fallback_language = tag;
        self
    }

    /// Replaces the core library domain.
    #[must_use]
    pub fn with_core_domain(mut self, domain: Domain) -> Self {
        self.core_domain = domain;
        self
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &DictionaryStore {
        &self.store
    }

    /// Returns the domain used when the caller names none.
    #[must_use]
    pub const fn default_domain(&self) -> &Domain {
        &self.default_domain
    }

    /// Returns the detected preferred language.
    #[must_use]
    pub fn default_language(&self) -> LanguageTag {
        self.detector.detect()
    }

    /// Returns the fallback language.
    #[must_use]
    pub const fn fallback_language(&self) -> &LanguageTag {
        &self.fallback_language
    }

    /// Returns the tie-break policy.
    #[must_use]
    pub const fn fallback_policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Resolves `key` for a domain and language.
    ///
    /// Missing arguments default to [`Self::default_domain`] and
    /// [`Self::default_language`]. Returns `key` unchanged when no cached
    /// dictionary in the chain has a value.
    #[must_use]
    pub fn localize(
        &self,
        key: &str,
        domain: Option<&Domain>,
        language: Option<&LanguageTag>,
    ) -> String {
        let domain = domain.unwrap_or(&self.default_domain);
        let tag = language.cloned().unwrap_or_else(|| self.detector.detect());
        self.resolve(key, domain, &tag).unwrap_or_else(|| {
            trace!(%domain, %tag, key, "no translation; echoing key");
            key.to_string()
        })
    }

    /// Resolves `key` for a caller-supplied language string.
    ///
    /// The string is normalized like [`LanguageTag::new`]. A string that does
    /// not form a valid tag is ignored and the detected language is used, so
    /// the call still yields a translation or the key.
    #[must_use]
    pub fn localize_str(&self, key: &str, domain: Option<&Domain>, language: &str) -> String {
        match LanguageTag::new(language) {
            Ok(tag) => self.localize(key, domain, Some(&tag)),
            Err(err) => {
                trace!(language, error = %err, "invalid language; using detected language");
                self.localize(key, domain, None)
            }
        }
    }

    /// Resolves `key` in the core library domain.
    #[must_use]
    pub fn localize_core(&self, key: &str, language: Option<&LanguageTag>) -> String {
        self.localize(key, Some(&self.core_domain), language)
    }

    /// Resolves `key` and schedules a background load for unseen domains.
    ///
    /// The returned string reflects the cache at call time. When called
    /// inside a tokio runtime and no load has been requested for the domain,
    /// an [`Self::ensure_loaded`] task is spawned so later calls can hit.
    /// Registering a domain through [`DictionaryStore::ensure`] does not
    /// suppress this load.
    #[must_use]
    pub fn localize_or_load(
        self: &Arc<Self>,
        key: &str,
        domain: Option<&Domain>,
        language: Option<&LanguageTag>,
    ) -> String {
        let domain = domain.unwrap_or(&self.default_domain).clone();
        let tag = language.cloned().unwrap_or_else(|| self.detector.detect());
        let value = self.localize(key, Some(&domain), Some(&tag));
        let Ok(handle) = Handle::try_current() else {
            return value;
        };
        if self.store.claim_first_load(&domain) {
            debug!(%domain, %tag, "first use of domain; scheduling load");
            let resolver = Arc::clone(self);
            drop(handle.spawn(async move {
                resolver.ensure_loaded(&domain, Some(&tag)).await;
            }));
        }
        value
    }

    /// Loads the fallback language and the preferred language for `domain`.
    ///
    /// When the preferred tag resolves to an empty dictionary, narrower tags
    /// are loaded until one is non-empty. Safe to call repeatedly; cached
    /// pairs are not fetched again.
    pub async fn ensure_loaded(&self, domain: &Domain, language: Option<&LanguageTag>) {
        self.store.load(domain, &self.fallback_language).await;
        let preferred = language.cloned().unwrap_or_else(|| self.detector.detect());
        for candidate in preferred.narrowings() {
            let dictionary = self.store.load(domain, &candidate).await;
            if !dictionary.is_empty() {
                break;
            }
        }
    }

    /// Loads the default domain for the fallback and preferred languages.
    pub async fn bootstrap(&self) {
        let domain = self.default_domain.clone();
        self.ensure_loaded(&domain, None).await;
    }

    /// Walks the candidate chain for `key`.
    fn resolve(&self, key: &str, domain: &Domain, tag: &LanguageTag) -> Option<String> {
        let mut shadowed = false;
        for candidate in tag.narrowings() {
            let Some(dictionary) = self.store.lookup(domain, &candidate) else {
                continue;
            };
            if let Some(value) = dictionary.get(key).filter(|value| !value.is_empty()) {
                return Some(value.to_string());
            }
            shadowed |= !dictionary.is_empty();
        }
        if shadowed && self.policy == FallbackPolicy::Strict {
            return None;
        }
        let fallback = self.store.lookup(domain, &self.fallback_language)?;
        fallback.get(key).filter(|value| !value.is_empty()).map(str::to_string)
    }
}
