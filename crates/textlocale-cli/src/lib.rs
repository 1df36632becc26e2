// crates/textlocale-cli/src/lib.rs
// ============================================================================
// Module: TextLocale CLI Library
// Description: Shared helpers for the TextLocale CLI binary.
// Purpose: Expose localized messages and resolver wiring for reuse and tests.
// Dependencies: textlocale-core, textlocale-config, textlocale-sources
// ============================================================================

//! ## Overview
//! Hosts the CLI message catalog ([`i18n`]) and the wiring that turns a
//! validated configuration into a resolver ([`setup`]).

pub mod i18n;
pub mod setup;
