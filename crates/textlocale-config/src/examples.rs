// crates/textlocale-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the CLI.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `textlocale.toml`. The example is parsed and validated
//! by the crate tests so it cannot drift from the model.

/// Returns a canonical example `textlocale.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[sources]
system_base = "https://cdn.example.com/app"
# user_base = "./locales"
layout = "domain"
assets_dir = true
timeout_ms = 10000
max_dictionary_bytes = 1048576

[resolver]
behavior_path = "behaviors/default"
core_domain = "core"
fallback_language = "en"
fallback_policy = "strict"
# language = "fr-ca"
# page_url = "https://app.example.com/?lang=de"
"#,
    )
}
