// crates/textlocale-sources/src/http.rs
// ============================================================================
// Module: TextLocale HTTP Source
// Description: HTTP-backed dictionary source.
// Purpose: Fetch dictionary documents via HTTP GET under a base URL.
// Dependencies: textlocale-core, reqwest, tracing, url
// ============================================================================

//! ## Overview
//! [`HttpSource`] maps a (domain, language) pair to a URL under its base via
//! a [`UrlLayout`] and issues one GET per fetch.
//! Invariants:
//! - Non-success status codes fail with [`LoadError::Status`].
//! - Bodies are read incrementally and abandoned once they exceed the limit.
//! - The configured timeout bounds every request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Response;
use textlocale_core::Dictionary;
use textlocale_core::DictionarySource;
use textlocale_core::Domain;
use textlocale_core::LanguageTag;
use textlocale_core::LoadError;
use tracing::debug;
use url::Url;

use crate::MAX_DICTIONARY_BYTES;
use crate::SourceError;
use crate::layout::UrlLayout;
use crate::parse_dictionary;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Client settings for [`HttpSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSourceConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// Maximum accepted body size in bytes.
    pub max_bytes: usize,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_bytes: MAX_DICTIONARY_BYTES,
        }
    }
}

// ============================================================================
// SECTION: HTTP Source
// ============================================================================

/// HTTP-backed dictionary source.
///
/// # Invariants
/// - `base` can carry path segments.
#[derive(Debug, Clone)]
pub struct HttpSource {
    /// HTTP client configured with timeouts.
    client: Client,
    /// Root URL dictionaries are resolved under.
    base: Url,
    /// Location scheme under `base`.
    layout: UrlLayout,
    /// Maximum accepted body size in bytes.
    max_bytes: usize,
}

impl HttpSource {
    /// Builds an HTTP source with default client settings.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the base URL cannot carry a path or the
    /// HTTP client cannot be constructed.
    pub fn new(base: Url, layout: UrlLayout) -> Result<Self, SourceError> {
        Self::with_config(base, layout, HttpSourceConfig::default())
    }

    /// Builds an HTTP source with explicit client settings.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the base URL cannot carry a path or the
    /// HTTP client cannot be constructed.
    pub fn with_config(
        base: Url,
        layout: UrlLayout,
        config: HttpSourceConfig,
    ) -> Result<Self, SourceError> {
        if base.cannot_be_a_base() {
            return Err(SourceError::InvalidBase(base.to_string()));
        }
        match base.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(SourceError::InvalidBase(format!("unsupported scheme: {scheme}")));
            }
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| SourceError::Http(err.to_string()))?;
        Ok(Self {
            client,
            base,
            layout,
            max_bytes: config.max_bytes,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Returns the URL a pair is fetched from.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidLocation`] when the pair cannot be mapped.
    pub fn dictionary_url(&self, domain: &Domain, tag: &LanguageTag) -> Result<Url, LoadError> {
        let segments = self.layout.segments(domain, tag)?;
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| LoadError::InvalidLocation(self.base.to_string()))?
            .pop_if_empty()
            .extend(&segments);
        Ok(url)
    }
}

#[async_trait]
impl DictionarySource for HttpSource {
    async fn fetch(&self, domain: &Domain, tag: &LanguageTag) -> Result<Dictionary, LoadError> {
        let url = self.dictionary_url(domain, tag)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| LoadError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        if let Some(length) = response.content_length()
            && usize::try_from(length).ok().is_none_or(|length| length > self.max_bytes)
        {
            return Err(LoadError::TooLarge {
                limit: self.max_bytes,
            });
        }
        let body = read_body_with_limit(response, self.max_bytes).await?;
        debug!(%url, bytes = body.len(), "dictionary document fetched");
        parse_dictionary(&body, self.max_bytes)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body while enforcing a hard byte limit.
async fn read_body_with_limit(mut response: Response, limit: usize) -> Result<Vec<u8>, LoadError> {
    let mut body = Vec::new();
    while let Some(chunk) =
        response.chunk().await.map_err(|err| LoadError::Transport(err.to_string()))?
    {
        let next_total = body.len().saturating_add(chunk.len());
        if next_total > limit {
            return Err(LoadError::TooLarge {
                limit,
            });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
