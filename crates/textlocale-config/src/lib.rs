// crates/textlocale-config/src/lib.rs
// ============================================================================
// Module: TextLocale Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for textlocale.toml semantics.
// Dependencies: textlocale-core, textlocale-sources, serde, toml, url
// ============================================================================

//! ## Overview
//! `textlocale-config` defines the configuration model for the TextLocale
//! engine: where dictionaries are fetched from and how the resolver picks
//! domains and languages. Loading is strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
