// crates/textlocale-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Route user-facing CLI strings through the TextLocale engine.
// Dependencies: textlocale-core, textlocale-sources
// ============================================================================

//! ## Overview
//! The CLI keeps its own user-facing strings in an embedded catalog served
//! by an [`InlineSource`] under [`CLI_DOMAIN`], and resolves them with the
//! same [`TranslationResolver`] it exposes to users. All runtime output
//! should go through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog must be loaded with [`load_catalog`] before messages resolve;
//!   until then keys are echoed.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve argument order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use textlocale_core::Dictionary;
use textlocale_core::DictionaryStore;
use textlocale_core::Domain;
use textlocale_core::FallbackPolicy;
use textlocale_core::FixedLanguage;
use textlocale_core::LanguageTag;
use textlocale_core::TranslationResolver;
use textlocale_sources::InlineSource;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Domain holding the CLI's own messages.
pub const CLI_DOMAIN: &str = "textlocale-cli";

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Parses a locale value, tolerating case and region subtags.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let tag = LanguageTag::new(value).ok()?;
        match tag.narrowings().last()?.as_str() {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }

    /// Returns the language tag used for catalog lookups.
    #[must_use]
    pub fn tag(self) -> LanguageTag {
        LanguageTag::new(self.as_str()).unwrap_or_else(|_| LanguageTag::fallback())
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces (for example, `path`).
    pub key: &'static str,
    /// Preformatted value substituted for the placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`].
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "textlocale {version}"),
    ("i18n.lang.invalid_env", "Invalid {env} value: {value} (expected en or ca)."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: CLI messages in this language may be incomplete; missing ones are shown in \
         English.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("language.invalid", "Invalid language tag {value}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("setup.failed", "Failed to configure dictionary sources: {error}"),
    ("show.encode_failed", "Failed to encode dictionary for {domain}: {error}"),
    ("show.empty", "No entries loaded for domain {domain} in language {lang}."),
];

/// Catalan catalog.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "textlocale {version}"),
    ("i18n.lang.invalid_env", "Valor de {env} no vàlid: {value} (s'esperava en o ca)."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: els missatges en aquesta llengua poden ser incomplets; els que falten es mostren \
         en anglès.",
    ),
    ("output.stream.stdout", "sortida estàndard"),
    ("output.stream.stderr", "sortida d'error"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("language.invalid", "Etiqueta de llengua no vàlida {value}: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("config.validate.ok", "Configuració vàlida."),
    ("setup.failed", "No s'han pogut configurar les fonts de diccionaris: {error}"),
    ("show.empty", "No hi ha entrades per al domini {domain} en la llengua {lang}."),
];

/// Returns the static entries for a locale.
const fn entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the CLI message resolver.
#[must_use]
pub fn catalog() -> &'static TranslationResolver {
    static CATALOG: OnceLock<TranslationResolver> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let domain = Domain::new(CLI_DOMAIN);
        let source = SUPPORTED_LOCALES.iter().fold(InlineSource::new(), |source, locale| {
            let dictionary: Dictionary = entries_for(*locale).iter().copied().collect();
            source.with_dictionary(domain.clone(), locale.tag(), dictionary)
        });
        TranslationResolver::new(
            DictionaryStore::new(source),
            FixedLanguage::new(LanguageTag::fallback()),
            domain.clone(),
        )
        .with_core_domain(domain)
        .with_fallback_policy(FallbackPolicy::FallThrough)
    })
}

/// Loads every supported locale of the CLI catalog.
pub async fn load_catalog() {
    let domain = Domain::new(CLI_DOMAIN);
    for locale in SUPPORTED_LOCALES {
        catalog().ensure_loaded(&domain, Some(&locale.tag())).await;
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().localize_core(key, Some(&current_locale().tag()));
    args.into_iter().fold(template, |message, arg| {
        message.replace(&format!("{{{}}}", arg.key), &arg.value)
    })
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
