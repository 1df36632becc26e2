// crates/textlocale-core/src/runtime/store.rs
// ============================================================================
// Module: TextLocale Dictionary Store
// Description: Process-lifetime cache of merged dictionaries.
// Purpose: Load, merge, and serve dictionaries per (domain, language) pair.
// Dependencies: tokio, tracing
// ============================================================================

//! ## Overview
//! [`DictionaryStore`] owns a single table keyed by (domain, language tag).
//! Each entry is a write-once cell: it is filled by the merge-on-load step
//! and never mutated, replaced, or evicted afterwards.
//! Invariants:
//! - [`DictionaryStore::lookup`] never performs I/O and never blocks on a load.
//! - Readers observe either no dictionary or the fully merged dictionary.
//! - At most one fetch per layer is issued for a pair, including under
//!   concurrent [`DictionaryStore::load`] calls.
//! - Layer failures are logged and collapse to empty dictionaries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tokio::sync::OnceCell;
use tracing::debug;
use tracing::warn;

use crate::core::dictionary::Dictionary;
use crate::core::identifiers::Domain;
use crate::core::identifiers::LanguageTag;
use crate::interfaces::DictionarySource;
use crate::interfaces::Layer;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Write-once cell holding the merged dictionary for one pair.
type Slot = Arc<OnceCell<Arc<Dictionary>>>;

/// Composite cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Dictionary namespace.
    domain: Domain,
    /// Normalized language tag.
    tag: LanguageTag,
}

/// Cache table guarded by the store mutex.
#[derive(Default)]
struct Table {
    /// Domains registered through `ensure`, `load`, or first use.
    domains: BTreeSet<Domain>,
    /// Domains whose first-use load has been claimed.
    scheduled: BTreeSet<Domain>,
    /// Load cells keyed by (domain, tag).
    slots: HashMap<CacheKey, Slot>,
}

/// Load progress for a single (domain, language) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load has been requested.
    Unloaded,
    /// A load is in flight; lookups still miss.
    Loading,
    /// A merged dictionary is stored permanently.
    Loaded,
}

/// Read-only snapshot of the dictionaries stored for one domain.
///
/// # Invariants
/// - Contains only pairs whose load has completed.
#[derive(Debug, Clone)]
pub struct DomainEntries {
    /// Domain the snapshot was taken for.
    domain: Domain,
    /// Loaded dictionaries keyed by language tag.
    languages: BTreeMap<LanguageTag, Arc<Dictionary>>,
}

impl DomainEntries {
    /// Returns the domain of this snapshot.
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Returns the stored dictionary for `tag`.
    #[must_use]
    pub fn get(&self, tag: &LanguageTag) -> Option<&Dictionary> {
        self.languages.get(tag).map(Arc::as_ref)
    }

    /// Iterates loaded language tags in order.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageTag> {
        self.languages.keys()
    }

    /// Returns true when no language has been loaded for the domain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

// ============================================================================
// SECTION: Dictionary Store
// ============================================================================

/// Cache of merged system/user dictionaries.
///
/// # Invariants
/// - Entries are created lazily and live for the lifetime of the store.
/// - Stored dictionaries are immutable.
pub struct DictionaryStore {
    /// Bundled, lower-priority layer.
    system: Arc<dyn DictionarySource>,
    /// Optional project-level override layer.
    user: Option<Arc<dyn DictionarySource>>,
    /// Cache table.
    table: Mutex<Table>,
}

impl DictionaryStore {
    /// Creates a store backed by a system layer only.
    #[must_use]
    pub fn new(system: impl DictionarySource + 'static) -> Self {
        Self::from_sources(Arc::new(system), None)
    }

    /// Creates a store from shared layer sources.
    #[must_use]
    pub fn from_sources(
        system: Arc<dyn DictionarySource>,
        user: Option<Arc<dyn DictionarySource>>,
    ) -> Self {
        Self {
            system,
            user,
            table: Mutex::new(Table::default()),
        }
    }

    /// Adds the user override layer.
    #[must_use]
    pub fn with_user_layer(mut self, user: impl DictionarySource + 'static) -> Self {
        self.user = Some(Arc::new(user));
        self
    }

    /// Registers `domain` and returns its loaded dictionaries.
    ///
    /// Never fails; an unknown domain yields an empty snapshot.
    #[must_use]
    pub fn ensure(&self, domain: &Domain) -> DomainEntries {
        let mut table = self.table();
        table.domains.insert(domain.clone());
        let languages = table
            .slots
            .iter()
            .filter(|(key, _)| &key.domain == domain)
            .filter_map(|(key, slot)| slot.get().map(|dict| (key.tag.clone(), Arc::clone(dict))))
            .collect();
        drop(table);
        DomainEntries {
            domain: domain.clone(),
            languages,
        }
    }

    /// Claims the first-use load for `domain`.
    ///
    /// Returns true only for the first claim on a domain that has no load
    /// cell yet. Registration through [`Self::ensure`] does not count as a
    /// claim.
    pub(crate) fn claim_first_load(&self, domain: &Domain) -> bool {
        let mut table = self.table();
        table.domains.insert(domain.clone());
        let requested = table.slots.keys().any(|key| &key.domain == domain);
        table.scheduled.insert(domain.clone()) && !requested
    }

    /// Returns true when `domain` has been registered.
    #[must_use]
    pub fn knows_domain(&self, domain: &Domain) -> bool {
        self.table().domains.contains(domain)
    }

    /// Returns every registered domain in order.
    #[must_use]
    pub fn domains(&self) -> Vec<Domain> {
        self.table().domains.iter().cloned().collect()
    }

    /// Returns the stored dictionary for the exact pair, without I/O.
    #[must_use]
    pub fn lookup(&self, domain: &Domain, tag: &LanguageTag) -> Option<Arc<Dictionary>> {
        let key = CacheKey {
            domain: domain.clone(),
            tag: tag.clone(),
        };
        self.table().slots.get(&key).and_then(|slot| slot.get().map(Arc::clone))
    }

    /// Returns the load progress for the exact pair.
    #[must_use]
    pub fn state(&self, domain: &Domain, tag: &LanguageTag) -> LoadState {
        let key = CacheKey {
            domain: domain.clone(),
            tag: tag.clone(),
        };
        match self.table().slots.get(&key) {
            None => LoadState::Unloaded,
            Some(slot) if slot.initialized() => LoadState::Loaded,
            Some(_) => LoadState::Loading,
        }
    }

    /// Loads, merges, and stores the dictionary for a pair.
    ///
    /// Returns the stored dictionary. When the pair is already stored no
    /// request is issued; concurrent callers for the same pair share one
    /// in-flight fetch. Layer failures are logged and treated as empty.
    pub async fn load(&self, domain: &Domain, tag: &LanguageTag) -> Arc<Dictionary> {
        let slot = self.slot(domain, tag);
        if let Some(stored) = slot.get() {
            debug!(%domain, %tag, "dictionary already cached");
            return Arc::clone(stored);
        }
        let stored = slot.get_or_init(|| self.fetch_merged(domain, tag)).await;
        Arc::clone(stored)
    }

    /// Returns the cell for a pair, creating it and registering the domain.
    fn slot(&self, domain: &Domain, tag: &LanguageTag) -> Slot {
        let mut table = self.table();
        table.domains.insert(domain.clone());
        let key = CacheKey {
            domain: domain.clone(),
            tag: tag.clone(),
        };
        Arc::clone(table.slots.entry(key).or_default())
    }

    /// Fetches both layers and merges the user layer over the system layer.
    async fn fetch_merged(&self, domain: &Domain, tag: &LanguageTag) -> Arc<Dictionary> {
        let system = fetch_layer(self.system.as_ref(), Layer::System, domain, tag).await;
        let user = match &self.user {
            Some(source) => fetch_layer(source.as_ref(), Layer::User, domain, tag).await,
            None => Dictionary::new(),
        };
        let merged = system.merged_with(user);
        debug!(%domain, %tag, entries = merged.len(), "dictionary stored");
        Arc::new(merged)
    }

    /// Locks the table, recovering from poisoning.
    fn table(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Fetches one layer, collapsing any failure to an empty dictionary.
async fn fetch_layer(
    source: &dyn DictionarySource,
    layer: Layer,
    domain: &Domain,
    tag: &LanguageTag,
) -> Dictionary {
    match source.fetch(domain, tag).await {
        Ok(dictionary) => dictionary,
        Err(err) => {
            warn!(%domain, %tag, %layer, error = %err, "dictionary layer unavailable");
            Dictionary::new()
        }
    }
}
