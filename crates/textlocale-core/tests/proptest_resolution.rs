// crates/textlocale-core/tests/proptest_resolution.rs
// ============================================================================
// Module: Resolution Property-Based Tests
// Description: Property tests for tag narrowing and key echo.
// Purpose: Detect panics and invariant breaks across wide input ranges.
// ============================================================================

//! Property-based tests for resolution invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use common::MapSource;
use common::tag;
use proptest::prelude::*;
use textlocale_core::DictionaryStore;
use textlocale_core::Domain;
use textlocale_core::FixedLanguage;
use textlocale_core::LanguageTag;
use textlocale_core::TranslationResolver;

/// Generates hyphen-joined alphanumeric tags in mixed case.
fn tag_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z0-9]{1,8}", 1 .. 5).prop_map(|parts| parts.join("-"))
}

proptest! {
    #[test]
    fn narrowings_end_at_primary_subtag(raw in tag_strategy()) {
        let parsed = LanguageTag::new(&raw).unwrap();
        let chain: Vec<LanguageTag> = parsed.narrowings().collect();
        let primary = raw.split('-').next().unwrap().to_ascii_lowercase();

        prop_assert_eq!(chain.len(), raw.split('-').count());
        prop_assert_eq!(chain.first(), Some(&parsed));
        prop_assert_eq!(chain.last().map(LanguageTag::as_str), Some(primary.as_str()));
        for pair in chain.windows(2) {
            prop_assert!(pair[0].as_str().starts_with(pair[1].as_str()));
            prop_assert!(pair[0].as_str().len() > pair[1].as_str().len());
        }
    }

    #[test]
    fn normalization_is_idempotent(raw in tag_strategy()) {
        let once = LanguageTag::new(&raw).unwrap();
        let twice = LanguageTag::new(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn unloaded_keys_are_echoed(key in ".*", raw in tag_strategy()) {
        let resolver = TranslationResolver::new(
            DictionaryStore::new(MapSource::new().with("ui", "en", &[("known", "value")])),
            FixedLanguage::new(tag("en")),
            Domain::new("ui"),
        );
        let language = LanguageTag::new(&raw).unwrap();
        prop_assert_eq!(resolver.localize(&key, None, Some(&language)), key);
    }
}
