// crates/textlocale-cli/tests/setup.rs
// ============================================================================
// Module: CLI Setup Tests
// Description: Config-to-resolver wiring against on-disk dictionaries.
// Purpose: Validate the resolver the CLI builds behaves end to end.
// ============================================================================

//! Integration tests for resolver wiring.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use textlocale_cli::setup::SetupError;
use textlocale_cli::setup::build_detector;
use textlocale_cli::setup::build_resolver;
use textlocale_config::TextLocaleConfig;
use textlocale_core::Domain;
use textlocale_core::LanguageDetector;
use textlocale_core::LanguageTag;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes `<root>/<domain>/<tag>.json`.
fn write_dictionary(root: &Path, domain: &str, tag: &str, json: &str) {
    let dir = root.join(domain);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{tag}.json")), json).unwrap();
}

/// Builds a system tree with English and Japanese `ui` dictionaries.
fn system_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_dictionary(
        dir.path(),
        "ui",
        "en",
        r#"{"greeting": "Hello", "farewell": "Goodbye", "only_en": "English only"}"#,
    );
    write_dictionary(dir.path(), "ui", "ja", r#"{"greeting": "こんにちは", "farewell": "さようなら"}"#);
    dir
}

/// Parses a config naming `system` and extra TOML lines.
fn config_for(system: &Path, extra: &str) -> TextLocaleConfig {
    let content = format!("[sources]\nsystem_base = \"{}\"\n{extra}", system.display());
    TextLocaleConfig::parse(&content).unwrap()
}

/// Parses a language tag.
fn tag(value: &str) -> LanguageTag {
    LanguageTag::new(value).unwrap()
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Tests a file-backed resolver narrows a regional tag to its language.
#[tokio::test]
async fn file_resolver_localizes_after_load() {
    let system = system_tree();
    let config = config_for(system.path(), "\n[resolver]\ndefault_domain = \"ui\"\n");
    let resolver = build_resolver(&config).unwrap();
    assert_eq!(resolver.default_domain(), &Domain::new("ui"));

    let ja = tag("ja-JP");
    resolver.ensure_loaded(&Domain::new("ui"), Some(&ja)).await;
    assert_eq!(resolver.localize("greeting", None, Some(&ja)), "こんにちは");
    assert_eq!(resolver.localize("missing", None, Some(&ja)), "missing");
}

/// Tests the strict default hides English keys behind a non-empty dictionary.
#[tokio::test]
async fn strict_policy_is_default() {
    let system = system_tree();
    let resolver = build_resolver(&config_for(system.path(), "")).unwrap();
    let domain = Domain::new("ui");
    let ja = tag("ja");
    resolver.ensure_loaded(&domain, Some(&ja)).await;
    assert_eq!(resolver.localize("only_en", Some(&domain), Some(&ja)), "only_en");
}

/// Tests the fall-through policy reaches the fallback language.
#[tokio::test]
async fn fall_through_policy_reaches_fallback() {
    let system = system_tree();
    let config = config_for(system.path(), "\n[resolver]\nfallback_policy = \"fall_through\"\n");
    let resolver = build_resolver(&config).unwrap();
    let domain = Domain::new("ui");
    let ja = tag("ja");
    resolver.ensure_loaded(&domain, Some(&ja)).await;
    assert_eq!(resolver.localize("only_en", Some(&domain), Some(&ja)), "English only");
}

/// Tests user dictionaries override system values key by key.
#[tokio::test]
async fn user_base_overrides_system_values() {
    let system = system_tree();
    let user = TempDir::new().unwrap();
    write_dictionary(user.path(), "ui", "ja", r#"{"greeting": "やあ"}"#);
    let extra = format!("user_base = \"{}\"\n", user.path().display());
    let resolver = build_resolver(&config_for(system.path(), &extra)).unwrap();
    let domain = Domain::new("ui");
    let ja = tag("ja");
    resolver.ensure_loaded(&domain, Some(&ja)).await;
    assert_eq!(resolver.localize("greeting", Some(&domain), Some(&ja)), "やあ");
    assert_eq!(resolver.localize("farewell", Some(&domain), Some(&ja)), "さようなら");
}

/// Tests the behavior path derives the default domain.
#[test]
fn behavior_path_derives_default_domain() {
    let system = system_tree();
    let extra = "\n[resolver]\nbehavior_path = \"behaviors/checkout\"\n";
    let config = config_for(system.path(), extra);
    let resolver = build_resolver(&config).unwrap();
    assert_eq!(resolver.default_domain().as_str(), "checkout");
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// Tests a config without a system base is rejected.
#[test]
fn missing_system_base_is_rejected() {
    let config = TextLocaleConfig::default();
    match build_resolver(&config) {
        Err(SetupError::MissingSystemBase) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected missing system base"),
    }
}

/// Tests an unreachable directory degrades to key echoes.
#[tokio::test]
async fn missing_directory_echoes_keys() {
    let system = TempDir::new().unwrap();
    let absent = system.path().join("absent");
    let resolver = build_resolver(&config_for(&absent, "")).unwrap();
    let domain = Domain::new("ui");
    resolver.ensure_loaded(&domain, Some(&tag("en"))).await;
    assert_eq!(resolver.localize("greeting", Some(&domain), Some(&tag("en"))), "greeting");
}

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Tests the configured language override wins.
#[test]
fn detector_uses_language_override() {
    let content = "[resolver]\nlanguage = \"fr_CA\"\npage_url = \"https://app.test/?lang=de\"\n";
    let config = TextLocaleConfig::parse(content).unwrap();
    let detector = build_detector(&config.resolver).unwrap();
    assert_eq!(detector.detect().as_str(), "fr-ca");
}

/// Tests the page URL query parameter is consulted without an override.
#[test]
fn detector_reads_page_url_query() {
    let content = "[resolver]\npage_url = \"https://app.test/checkout?lang=de-AT\"\n";
    let config = TextLocaleConfig::parse(content).unwrap();
    let detector = build_detector(&config.resolver).unwrap();
    assert_eq!(detector.detect().as_str(), "de-at");
}
