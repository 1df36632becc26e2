// crates/textlocale-config/src/config.rs
// ============================================================================
// Module: TextLocale Configuration
// Description: Configuration loading and validation for TextLocale.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: textlocale-core, textlocale-sources, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then [`CONFIG_ENV_VAR`], then
//! [`DEFAULT_CONFIG_NAME`] in the working directory. Unknown keys are
//! rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use textlocale_core::Domain;
use textlocale_core::FallbackPolicy;
use textlocale_core::LanguageTag;
use textlocale_core::runtime::resolver::DEFAULT_CORE_DOMAIN;
use textlocale_sources::MAX_DICTIONARY_BYTES;
use textlocale_sources::UrlLayout;
use textlocale_sources::http::DEFAULT_TIMEOUT_MS;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "textlocale.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "TEXTLOCALE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 300_000;
/// Upper bound for `sources.max_dictionary_bytes`.
pub(crate) const MAX_DICTIONARY_BYTES_LIMIT: usize = 16 * 1024 * 1024;
/// Domain used when neither `default_domain` nor `behavior_path` is set.
pub const DEFAULT_DOMAIN: &str = "default";

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root configuration for TextLocale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextLocaleConfig {
    /// Dictionary source configuration.
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Resolver defaults.
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl TextLocaleConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(content)
    }

    /// Loads configuration, returning defaults when no file was requested
    /// and the default file is absent.
    ///
    /// An explicit path or [`CONFIG_ENV_VAR`] must point at a readable file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let implicit = path.is_none() && env::var_os(CONFIG_ENV_VAR).is_none();
        if implicit && !Path::new(DEFAULT_CONFIG_NAME).exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sources.validate()?;
        self.resolver.validate()
    }
}

// ============================================================================
// SECTION: Sources
// ============================================================================

/// Dictionary source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    /// Base URL or directory of bundled dictionaries.
    #[serde(default)]
    pub system_base: Option<String>,
    /// Base URL or directory of project overrides.
    #[serde(default)]
    pub user_base: Option<String>,
    /// Location scheme under each base.
    #[serde(default)]
    pub layout: UrlLayout,
    /// Join `assets/locales` onto remote bases.
    #[serde(default)]
    pub assets_dir: bool,
    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum dictionary document size in bytes.
    #[serde(default = "default_max_dictionary_bytes")]
    pub max_dictionary_bytes: usize,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            system_base: None,
            user_base: None,
            layout: UrlLayout::default(),
            assets_dir: false,
            timeout_ms: default_timeout_ms(),
            max_dictionary_bytes: default_max_dictionary_bytes(),
        }
    }
}

impl SourcesConfig {
    /// Validates source settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.system_base {
            BaseLocation::parse("sources.system_base", base)?;
        }
        if let Some(base) = &self.user_base {
            BaseLocation::parse("sources.user_base", base)?;
        }
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "sources.timeout_ms must be between 1 and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.max_dictionary_bytes == 0 || self.max_dictionary_bytes > MAX_DICTIONARY_BYTES_LIMIT
        {
            return Err(ConfigError::Invalid(format!(
                "sources.max_dictionary_bytes must be between 1 and {MAX_DICTIONARY_BYTES_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Returns the parsed system base, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base is malformed.
    pub fn system_location(&self) -> Result<Option<BaseLocation>, ConfigError> {
        self.system_base
            .as_deref()
            .map(|base| BaseLocation::parse("sources.system_base", base))
            .transpose()
    }

    /// Returns the parsed user base, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base is malformed.
    pub fn user_location(&self) -> Result<Option<BaseLocation>, ConfigError> {
        self.user_base
            .as_deref()
            .map(|base| BaseLocation::parse("sources.user_base", base))
            .transpose()
    }

    /// Returns the HTTP request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Parsed dictionary base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseLocation {
    /// `http` or `https` base URL.
    Remote(Url),
    /// Local directory.
    Local(PathBuf),
}

impl BaseLocation {
    /// Parses a base as a remote URL, a `file` URL, or a directory path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the base is empty, too long, or
    /// uses an unsupported URL scheme.
    pub fn parse(field: &str, raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        validate_path_string(field, trimmed)?;
        let Ok(url) = Url::parse(trimmed) else {
            return Ok(Self::Local(PathBuf::from(trimmed)));
        };
        match url.scheme() {
            "http" | "https" => Ok(Self::Remote(url)),
            "file" => url
                .to_file_path()
                .map(Self::Local)
                .map_err(|()| ConfigError::Invalid(format!("{field} is not a local file url"))),
            // Single-letter schemes are Windows drive prefixes.
            scheme if scheme.len() == 1 => Ok(Self::Local(PathBuf::from(trimmed))),
            scheme => Err(ConfigError::Invalid(format!("{field} has unsupported scheme {scheme}"))),
        }
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolver defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Domain used when a call names none.
    #[serde(default)]
    pub default_domain: Option<String>,
    /// Installation path the default domain is derived from.
    #[serde(default)]
    pub behavior_path: Option<String>,
    /// Domain of core library strings.
    #[serde(default = "default_core_domain")]
    pub core_domain: String,
    /// Language tried after the narrowing chain.
    #[serde(default = "default_fallback_language")]
    pub fallback_language: String,
    /// Behavior when the requested dictionary lacks a key.
    #[serde(default)]
    pub fallback_policy: FallbackPolicy,
    /// Explicit preferred-language override.
    #[serde(default)]
    pub language: Option<String>,
    /// Page URL whose `lang` query parameter is consulted.
    #[serde(default)]
    pub page_url: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_domain: None,
            behavior_path: None,
            core_domain: default_core_domain(),
            fallback_language: default_fallback_language(),
            fallback_policy: FallbackPolicy::default(),
            language: None,
            page_url: None,
        }
    }
}

impl ResolverConfig {
    /// Validates resolver settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_domain.is_some() && self.behavior_path.is_some() {
            return Err(ConfigError::Invalid(
                "resolver.default_domain and resolver.behavior_path are mutually exclusive"
                    .to_string(),
            ));
        }
        if self.default_domain().as_str().is_empty() {
            return Err(ConfigError::Invalid(
                "resolver default domain must be non-empty".to_string(),
            ));
        }
        if self.core_domain.trim().is_empty() {
            return Err(ConfigError::Invalid("resolver.core_domain must be non-empty".to_string()));
        }
        self.fallback_tag()?;
        self.language_override()?;
        self.page_url()?;
        Ok(())
    }

    /// Returns the default domain, deriving it from `behavior_path` if set.
    #[must_use]
    pub fn default_domain(&self) -> Domain {
        match (&self.default_domain, &self.behavior_path) {
            (Some(domain), _) => Domain::new(domain.trim()),
            (None, Some(path)) => Domain::from_behavior_path(path.trim()),
            (None, None) => Domain::new(DEFAULT_DOMAIN),
        }
    }

    /// Returns the core library domain.
    #[must_use]
    pub fn core_domain(&self) -> Domain {
        Domain::new(self.core_domain.trim())
    }

    /// Returns the parsed fallback language.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the tag is malformed.
    pub fn fallback_tag(&self) -> Result<LanguageTag, ConfigError> {
        parse_tag("resolver.fallback_language", &self.fallback_language)
    }

    /// Returns the parsed language override, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the tag is malformed.
    pub fn language_override(&self) -> Result<Option<LanguageTag>, ConfigError> {
        self.language.as_deref().map(|value| parse_tag("resolver.language", value)).transpose()
    }

    /// Returns the parsed page URL, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL is malformed.
    pub fn page_url(&self) -> Result<Option<Url>, ConfigError> {
        self.page_url
            .as_deref()
            .map(|value| {
                Url::parse(value.trim())
                    .map_err(|err| ConfigError::Invalid(format!("resolver.page_url: {err}")))
            })
            .transpose()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a base string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Parses a language tag field.
fn parse_tag(field: &str, value: &str) -> Result<LanguageTag, ConfigError> {
    LanguageTag::new(value).map_err(|err| ConfigError::Invalid(format!("{field}: {err}")))
}

/// Default HTTP timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default dictionary size limit.
const fn default_max_dictionary_bytes() -> usize {
    MAX_DICTIONARY_BYTES
}

/// Default core library domain.
fn default_core_domain() -> String {
    DEFAULT_CORE_DOMAIN.to_string()
}

/// Default fallback language.
fn default_fallback_language() -> String {
    textlocale_core::FALLBACK_LANGUAGE.to_string()
}
