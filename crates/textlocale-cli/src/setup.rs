// crates/textlocale-cli/src/setup.rs
// ============================================================================
// Module: TextLocale CLI Setup
// Description: Builds stores, detectors, and resolvers from configuration.
// Purpose: Keep config-to-runtime wiring out of the command dispatcher.
// Dependencies: textlocale-core, textlocale-config, textlocale-sources, thiserror
// ============================================================================

//! ## Overview
//! Converts a validated [`TextLocaleConfig`] into a ready
//! [`TranslationResolver`]. Remote bases become [`HttpSource`]s and local
//! bases become [`FileSource`]s; both share the configured layout and size
//! limit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use textlocale_config::BaseLocation;
use textlocale_config::ConfigError;
use textlocale_config::ResolverConfig;
use textlocale_config::SourcesConfig;
use textlocale_config::TextLocaleConfig;
use textlocale_core::DictionarySource;
use textlocale_core::DictionaryStore;
use textlocale_core::PreferredLanguage;
use textlocale_core::TranslationResolver;
use textlocale_sources::FileSource;
use textlocale_sources::HttpSource;
use textlocale_sources::HttpSourceConfig;
use textlocale_sources::SourceError;
use textlocale_sources::assets_base;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while wiring the resolver.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration values were rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A source could not be constructed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// No system base was configured.
    #[error("sources.system_base is required (set it in the config or pass --system-base)")]
    MissingSystemBase,
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds a dictionary source for one base.
///
/// # Errors
///
/// Returns [`SetupError`] when an HTTP source cannot be constructed.
pub fn build_source(
    location: BaseLocation,
    sources: &SourcesConfig,
) -> Result<Arc<dyn DictionarySource>, SetupError> {
    match location {
        BaseLocation::Remote(url) => {
            let base = if sources.assets_dir { assets_base(&url)? } else { url };
            debug!(%base, layout = ?sources.layout, "using http dictionary source");
            let config = HttpSourceConfig {
                timeout: sources.timeout(),
                max_bytes: sources.max_dictionary_bytes,
            };
            Ok(Arc::new(HttpSource::with_config(base, sources.layout, config)?))
        }
        BaseLocation::Local(root) => {
            debug!(root = %root.display(), layout = ?sources.layout, "using file source");
            Ok(Arc::new(
                FileSource::new(root, sources.layout).with_max_bytes(sources.max_dictionary_bytes),
            ))
        }
    }
}

/// Builds the two-layer dictionary store.
///
/// # Errors
///
/// Returns [`SetupError`] when no system base is configured or a source
/// cannot be constructed.
pub fn build_store(sources: &SourcesConfig) -> Result<DictionaryStore, SetupError> {
    let system = sources.system_location()?.ok_or(SetupError::MissingSystemBase)?;
    let system = build_source(system, sources)?;
    let user = sources.user_location()?.map(|user| build_source(user, sources)).transpose()?;
    Ok(DictionaryStore::from_sources(system, user))
}

/// Builds the preferred-language detector.
///
/// # Errors
///
/// Returns [`SetupError`] when the override or page URL is malformed.
pub fn build_detector(resolver: &ResolverConfig) -> Result<PreferredLanguage, SetupError> {
    let mut detector = PreferredLanguage::new().with_override(resolver.language_override()?);
    if let Some(url) = resolver.page_url()? {
        detector = detector.with_page_url(url);
    }
    Ok(detector)
}

/// Builds a resolver from a validated configuration.
///
/// # Errors
///
/// Returns [`SetupError`] when sources or resolver settings are invalid.
pub fn build_resolver(config: &TextLocaleConfig) -> Result<TranslationResolver, SetupError> {
    let store = build_store(&config.sources)?;
    let detector = build_detector(&config.resolver)?;
    Ok(TranslationResolver::new(store, detector, config.resolver.default_domain())
        .with_core_domain(config.resolver.core_domain())
        .with_fallback_language(config.resolver.fallback_tag()?)
        .with_fallback_policy(config.resolver.fallback_policy))
}
